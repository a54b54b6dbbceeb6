//! # Ordered Tagged Enums
//!
//! Runtime-declared enumerations with a total order and optional transition
//! flows.
//!
//! A [`TaggedEnumBuilder`] collects `(name, value)` member pairs, an optional
//! explicit ordering, and an optional flows mapping, then validates and
//! freezes everything into an immutable [`TaggedEnum`] descriptor table.
//! [`Member`] handles expose:
//!
//! - ordering comparisons over the resolved order index
//! - `precedes`/`follows` edge queries against the declared flows (degrading
//!   to pure order comparison when no flows were declared)
//! - neighbor and range accessors over the resolved order
//!
//! ## State Machine Framing
//!
//! Members are states and flows are the allowed-edge set of a directed graph
//! over them. `precedes`/`follows` are edge-membership queries, not
//! transition execution: nothing is mutated by calling them, and the graph is
//! not required to be acyclic or to respect the numeric order.

mod builder;
mod member;

pub use builder::TaggedEnumBuilder;
pub use member::{Member, TaggedEnum};
