//! # slotflow-core
//!
//! Pure building blocks for application state - THE LOGIC.
//!
//! This crate implements two small, independent mechanisms that application
//! objects compose as they see fit:
//!
//! - [`lazy`] - a per-instance, compute-once value cache with an ordered
//!   registry of tracked keys and a whole-instance invalidation trigger.
//! - [`ordered`] - runtime-declared enumerations carrying a deterministic
//!   total order and an optional directed transition graph, with ordering
//!   comparisons and allowed-transition queries.
//!
//! ## Architectural Constraints
//!
//! - Pure Rust: NO async, NO network dependencies, NO I/O
//! - Deterministic: `BTreeMap`/`BTreeSet` only, integer arithmetic only
//! - A lazy cache is owned exclusively by its instance; nothing mutates it
//!   except `read`, `invalidate`, and the trigger
//! - Enum tables are frozen by `build()` and never mutated afterwards; shared
//!   handles are safe for unsynchronized concurrent reads

// =============================================================================
// MODULES
// =============================================================================

pub mod lazy;
pub mod ordered;
pub mod types;

// =============================================================================
// RE-EXPORTS: Lazy Cache
// =============================================================================

pub use lazy::LazyCache;

// =============================================================================
// RE-EXPORTS: Ordered Enums
// =============================================================================

pub use ordered::{Member, TaggedEnum, TaggedEnumBuilder};

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{SlotKey, SlotState, SlotflowError};
