//! # Core Type Definitions
//!
//! This module contains the shared vocabulary of the crate:
//! - Slot identifiers and slot observations (`SlotKey`, `SlotState`)
//! - Error types (`SlotflowError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` where they are used as `BTreeMap` keys

use thiserror::Error;

// =============================================================================
// SLOT IDENTIFIERS
// =============================================================================

/// Stable identifier of a lazily computed property.
///
/// Keys are code-level names, so they wrap a `&'static str` and stay `Copy`.
/// A key identifies one cache cell per owning instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey(pub &'static str);

impl SlotKey {
    /// Create a new slot key from a property name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Get the key as a string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

// =============================================================================
// SLOT STATE
// =============================================================================

/// Observation of a single cache cell.
///
/// A slot is `Empty` until its compute function succeeds, `Computed`
/// thereafter, and `Empty` again after the owning instance is invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState<'a, V> {
    /// No value has been computed since the last invalidation.
    Empty,
    /// A value was computed and cached.
    Computed(&'a V),
}

impl<'a, V> SlotState<'a, V> {
    /// Check whether a value is cached.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }

    /// Get the cached value, if any.
    #[must_use]
    pub fn value(self) -> Option<&'a V> {
        match self {
            Self::Empty => None,
            Self::Computed(value) => Some(value),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors surfaced by the slotflow core.
///
/// - Declaration-time errors are fatal to `build()`: the enum type never
///   becomes usable (fail fast, not lazily on first use)
/// - Use-time errors (incomparable types) are recoverable by the caller
/// - Lazy compute failures are NOT represented here: `LazyCache::read`
///   propagates the caller's own error type verbatim and caches nothing
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SlotflowError {
    /// An explicit ordering is not a permutation of the declared members.
    #[error("ordering spec mismatch: {0}")]
    OrderSpec(String),

    /// A name in an ordering, flow spec, or lookup is not a declared member.
    #[error("unknown member: {0}")]
    UnknownMember(String),

    /// The same member name was declared twice.
    #[error("duplicate member: {0}")]
    DuplicateMember(String),

    /// An ordering or transition query spanned two different enum types.
    #[error("cannot compare members of {left} and {right}")]
    IncomparableTypes {
        /// Enum type name on the left-hand side.
        left: String,
        /// Enum type name on the right-hand side.
        right: String,
    },
}

// =============================================================================
// TESTS
// =============================================================================
