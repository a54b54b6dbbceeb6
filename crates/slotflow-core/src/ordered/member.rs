//! # Enum Tables and Member Handles
//!
//! The frozen descriptor table behind a declared enum, and the `Member`
//! handles that query it.
//!
//! - Tables are immutable after `build()` and shared via `Arc`; reads need no
//!   synchronization
//! - Order indexes are unique and contiguous `0..N-1` in the resolved order
//! - Transition sets are indexed by order index and may point anywhere in the
//!   member set (the graph is policy, not monotonic)

use crate::types::SlotflowError;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

// =============================================================================
// DESCRIPTOR TABLE
// =============================================================================

/// One member's record in the resolved order.
#[derive(Debug)]
pub(crate) struct MemberRecord<V> {
    /// Declared member name.
    pub(crate) name: String,
    /// Declared member value.
    pub(crate) value: V,
}

/// Frozen descriptor table for one declared enum type.
///
/// `members` is stored in resolved order, so a member's position IS its
/// order index. `flows` is `None` when no transition graph was declared,
/// which switches `precedes`/`follows` to pure order comparison.
#[derive(Debug)]
pub(crate) struct EnumTable<V> {
    /// Enum type name, used for diagnostics and incomparability errors.
    pub(crate) name: String,
    /// Member records in resolved order.
    pub(crate) members: Vec<MemberRecord<V>>,
    /// Name lookup: member name to order index.
    pub(crate) by_name: BTreeMap<String, usize>,
    /// Allowed-transition sets per order index, if a graph was declared.
    pub(crate) flows: Option<Vec<BTreeSet<usize>>>,
}

// =============================================================================
// TAGGED ENUM HANDLE
// =============================================================================

/// Shared handle to a declared enum type.
///
/// Cheap to clone; all clones point at the same frozen table.
#[derive(Debug)]
pub struct TaggedEnum<V> {
    table: Arc<EnumTable<V>>,
}

impl<V> Clone for TaggedEnum<V> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl<V> TaggedEnum<V> {
    /// Wrap a validated table. Only the builder constructs tables.
    pub(crate) fn from_table(table: EnumTable<V>) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Enum type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.table.name
    }

    /// Number of declared members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.members.len()
    }

    /// Check whether the enum declares no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.members.is_empty()
    }

    /// Check whether a transition graph was declared.
    ///
    /// Without one, `precedes`/`follows` degrade to order comparison.
    #[must_use]
    pub fn has_flows(&self) -> bool {
        self.table.flows.is_some()
    }

    /// Look up a member by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Member<V>> {
        self.table.by_name.get(name).map(|&index| Member {
            table: Arc::clone(&self.table),
            index,
        })
    }

    /// Look up a member by name, failing with `UnknownMember`.
    pub fn member(&self, name: &str) -> Result<Member<V>, SlotflowError> {
        self.get(name)
            .ok_or_else(|| SlotflowError::UnknownMember(name.to_string()))
    }

    /// All members in resolved order.
    #[must_use]
    pub fn members(&self) -> Vec<Member<V>> {
        (0..self.table.members.len())
            .map(|index| Member {
                table: Arc::clone(&self.table),
                index,
            })
            .collect()
    }
}

// =============================================================================
// MEMBER HANDLE
// =============================================================================

/// Handle to one member of a declared enum.
///
/// Equality and ordering are defined only between members of the same enum
/// type: cross-enum `==` is `false` and cross-enum `partial_cmp` is `None`.
/// The fallible [`try_cmp`](Member::try_cmp) surfaces the cross-enum case as
/// `IncomparableTypes` instead.
pub struct Member<V> {
    table: Arc<EnumTable<V>>,
    index: usize,
}

impl<V> Clone for Member<V> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            index: self.index,
        }
    }
}

impl<V> fmt::Debug for Member<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.table.name, self.name())
    }
}

impl<V> fmt::Display for Member<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.table.name, self.name())
    }
}

impl<V> Member<V> {
    fn record(&self) -> &MemberRecord<V> {
        &self.table.members[self.index]
    }

    fn at(&self, index: usize) -> Member<V> {
        Member {
            table: Arc::clone(&self.table),
            index,
        }
    }

    /// Declared member name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.record().name
    }

    /// Declared member value.
    #[must_use]
    pub fn value(&self) -> &V {
        &self.record().value
    }

    /// Position in the resolved total order (`0..N-1`).
    #[must_use]
    pub fn order_index(&self) -> usize {
        self.index
    }

    /// Check whether two members belong to the same enum type.
    #[must_use]
    pub fn same_enum(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.table, &other.table)
    }

    fn check_comparable(&self, other: &Self) -> Result<(), SlotflowError> {
        if self.same_enum(other) {
            Ok(())
        } else {
            Err(SlotflowError::IncomparableTypes {
                left: self.table.name.clone(),
                right: other.table.name.clone(),
            })
        }
    }

    /// Compare two members by order index.
    ///
    /// Fails with `IncomparableTypes` for members of different enum types.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, SlotflowError> {
        self.check_comparable(other)?;
        Ok(self.index.cmp(&other.index))
    }

    /// Check whether this member may transition directly to `other`.
    ///
    /// With a declared transition graph this is edge membership in this
    /// member's outgoing set. Without one it degrades to
    /// `self.order_index() < other.order_index()`, so ordering alone can be
    /// used without declaring flows.
    pub fn precedes(&self, other: &Self) -> Result<bool, SlotflowError> {
        self.check_comparable(other)?;
        Ok(match &self.table.flows {
            Some(flows) => flows[self.index].contains(&other.index),
            None => self.index < other.index,
        })
    }

    /// Check whether this member may be transitioned to from `other`.
    ///
    /// Symmetric to [`precedes`](Member::precedes): edge membership in
    /// `other`'s outgoing set, or `self.order_index() > other.order_index()`
    /// when no graph was declared.
    pub fn follows(&self, other: &Self) -> Result<bool, SlotflowError> {
        self.check_comparable(other)?;
        Ok(match &self.table.flows {
            Some(flows) => flows[other.index].contains(&self.index),
            None => self.index > other.index,
        })
    }

    /// The member immediately before this one in the resolved order, or
    /// `None` at the lower boundary.
    #[must_use]
    pub fn prev_member(&self) -> Option<Member<V>> {
        self.index.checked_sub(1).map(|index| self.at(index))
    }

    /// The member immediately after this one in the resolved order, or
    /// `None` at the upper boundary.
    #[must_use]
    pub fn next_member(&self) -> Option<Member<V>> {
        let index = self.index.saturating_add(1);
        if index < self.table.members.len() {
            Some(self.at(index))
        } else {
            None
        }
    }

    /// All members strictly before this one, in resolved order.
    #[must_use]
    pub fn prev_members(&self) -> Vec<Member<V>> {
        (0..self.index).map(|index| self.at(index)).collect()
    }

    /// All members strictly after this one, in resolved order.
    #[must_use]
    pub fn next_members(&self) -> Vec<Member<V>> {
        (self.index.saturating_add(1)..self.table.members.len())
            .map(|index| self.at(index))
            .collect()
    }

    /// The members strictly between this one and `other` in the resolved
    /// order, ascending regardless of which endpoint is larger.
    ///
    /// Fails with `IncomparableTypes` for members of different enum types.
    pub fn between(&self, other: &Self) -> Result<Vec<Member<V>>, SlotflowError> {
        self.check_comparable(other)?;
        let (lower, upper) = if self.index <= other.index {
            (self.index, other.index)
        } else {
            (other.index, self.index)
        };
        Ok((lower.saturating_add(1)..upper)
            .map(|index| self.at(index))
            .collect())
    }
}

impl<V> PartialEq for Member<V> {
    fn eq(&self, other: &Self) -> bool {
        self.same_enum(other) && self.index == other.index
    }
}

impl<V> PartialOrd for Member<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.same_enum(other) {
            Some(self.index.cmp(&other.index))
        } else {
            None
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::super::TaggedEnumBuilder;
    use crate::types::SlotflowError;
    use std::cmp::Ordering;

    fn status() -> super::TaggedEnum<&'static str> {
        TaggedEnumBuilder::new("Status")
            .member("PENDING", "pending")
            .member("RUNNING", "running")
            .member("DONE", "done")
            .build()
            .expect("valid declaration")
    }

    fn status_with_flows() -> super::TaggedEnum<&'static str> {
        TaggedEnumBuilder::new("Status")
            .member("PENDING", "pending")
            .member("RUNNING", "running")
            .member("DONE", "done")
            .flow("PENDING", ["RUNNING"])
            .flow("RUNNING", ["DONE"])
            .build()
            .expect("valid declaration")
    }

    #[test]
    fn declaration_order_yields_contiguous_indexes() {
        let status = status();
        let indexes: Vec<usize> = status.members().iter().map(super::Member::order_index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);

        let pending = status.member("PENDING").expect("member");
        let done = status.member("DONE").expect("member");
        assert!(pending < done);
        assert!(!(done < pending));
    }

    #[test]
    fn member_metadata() {
        let status = status();
        let running = status.member("RUNNING").expect("member");
        assert_eq!(running.name(), "RUNNING");
        assert_eq!(*running.value(), "running");
        assert_eq!(running.order_index(), 1);
        assert_eq!(format!("{running}"), "Status::RUNNING");
    }

    #[test]
    fn flows_gate_precedes_and_follows() {
        let status = status_with_flows();
        let pending = status.member("PENDING").expect("member");
        let running = status.member("RUNNING").expect("member");
        let done = status.member("DONE").expect("member");

        assert!(running.precedes(&done).expect("same enum"));
        assert!(!done.precedes(&running).expect("same enum"));
        // No direct edge, even though PENDING sorts before DONE.
        assert!(!pending.precedes(&done).expect("same enum"));

        assert!(running.follows(&pending).expect("same enum"));
        assert!(!done.follows(&pending).expect("same enum"));
    }

    #[test]
    fn no_flows_degrades_to_order_comparison() {
        let status = status();
        assert!(!status.has_flows());

        let pending = status.member("PENDING").expect("member");
        let done = status.member("DONE").expect("member");

        assert!(pending.precedes(&done).expect("same enum"));
        assert!(!done.precedes(&pending).expect("same enum"));
        assert!(done.follows(&pending).expect("same enum"));
        assert!(!pending.follows(&done).expect("same enum"));
    }

    #[test]
    fn boundary_accessors_are_absent_not_errors() {
        let status = status();
        let pending = status.member("PENDING").expect("member");
        let done = status.member("DONE").expect("member");

        assert!(pending.prev_member().is_none());
        assert!(pending.prev_members().is_empty());
        assert!(done.next_member().is_none());
        assert!(done.next_members().is_empty());

        let running = status.member("RUNNING").expect("member");
        assert_eq!(running.prev_member().expect("has previous"), pending);
        assert_eq!(running.next_member().expect("has next"), done);
        assert_eq!(running.prev_members(), vec![pending.clone()]);
        assert_eq!(running.next_members(), vec![done.clone()]);
    }

    #[test]
    fn between_is_exclusive_and_direction_insensitive() {
        let status = status();
        let pending = status.member("PENDING").expect("member");
        let running = status.member("RUNNING").expect("member");
        let done = status.member("DONE").expect("member");

        assert_eq!(done.between(&pending).expect("same enum"), vec![running.clone()]);
        assert_eq!(pending.between(&done).expect("same enum"), vec![running.clone()]);
        assert!(running.between(&pending).expect("same enum").is_empty());
        assert!(pending.between(&pending).expect("same enum").is_empty());
    }

    #[test]
    fn cross_enum_comparison_is_incomparable() {
        let status = status();
        let phase = TaggedEnumBuilder::new("Phase")
            .member("ALPHA", "alpha")
            .build()
            .expect("valid declaration");

        let pending = status.member("PENDING").expect("member");
        let alpha = phase.member("ALPHA").expect("member");

        assert_eq!(pending.partial_cmp(&alpha), None);
        assert!(pending != alpha);
        assert_eq!(
            pending.try_cmp(&alpha),
            Err(SlotflowError::IncomparableTypes {
                left: "Status".to_string(),
                right: "Phase".to_string(),
            })
        );
        assert!(pending.precedes(&alpha).is_err());
        assert!(alpha.follows(&pending).is_err());
        assert!(pending.between(&alpha).is_err());
    }

    #[test]
    fn try_cmp_matches_order() {
        let status = status();
        let pending = status.member("PENDING").expect("member");
        let done = status.member("DONE").expect("member");

        assert_eq!(pending.try_cmp(&done), Ok(Ordering::Less));
        assert_eq!(done.try_cmp(&pending), Ok(Ordering::Greater));
        assert_eq!(pending.try_cmp(&pending.clone()), Ok(Ordering::Equal));
    }

    #[test]
    fn lookup_failures() {
        let status = status();
        assert!(status.get("MISSING").is_none());
        assert_eq!(
            status.member("MISSING"),
            Err(SlotflowError::UnknownMember("MISSING".to_string()))
        );
    }

    #[test]
    fn handles_share_one_table() {
        let status = status();
        let clone = status.clone();
        let a = status.member("PENDING").expect("member");
        let b = clone.member("PENDING").expect("member");
        assert!(a.same_enum(&b));
        assert_eq!(a, b);
    }
}
