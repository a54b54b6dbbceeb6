//! # Enum Declaration Builder
//!
//! Collects a declaration and freezes it into an immutable [`TaggedEnum`].
//!
//! All validation happens in `build()`, fail fast: a bad declaration never
//! produces a usable enum type. The builder itself is serde-serializable so
//! declarations can come from configuration data as well as code.

use super::member::{EnumTable, MemberRecord, TaggedEnum};
use crate::types::SlotflowError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// BUILDER
// =============================================================================

/// Declaration form of an ordered tagged enum.
///
/// Members keep declaration order; the resolved total order is the explicit
/// `ordering` when supplied, declaration order otherwise. Flows, when
/// declared, map a member name to the names it may transition to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggedEnumBuilder<V> {
    name: String,
    members: Vec<(String, V)>,
    ordering: Option<Vec<String>>,
    flows: Option<BTreeMap<String, Vec<String>>>,
}

impl<V> TaggedEnumBuilder<V> {
    /// Start a declaration for an enum type with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            ordering: None,
            flows: None,
        }
    }

    /// Declare a member with its associated value.
    #[must_use]
    pub fn member(mut self, name: impl Into<String>, value: V) -> Self {
        self.members.push((name.into(), value));
        self
    }

    /// Supply an explicit ordering.
    ///
    /// Must be a permutation of exactly the declared member names, checked
    /// by `build()`.
    #[must_use]
    pub fn ordering<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ordering = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Declare the allowed transitions out of one member.
    ///
    /// Declaring any flow at all switches `precedes`/`follows` to graph
    /// lookup; members without a declared flow then have an empty outgoing
    /// set.
    #[must_use]
    pub fn flow<I, S>(mut self, from: impl Into<String>, to: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flows
            .get_or_insert_with(BTreeMap::new)
            .entry(from.into())
            .or_default()
            .extend(to.into_iter().map(Into::into));
        self
    }

    /// Validate the declaration and freeze it into an immutable enum type.
    ///
    /// Fails fast with:
    /// - `DuplicateMember` if a member name is declared twice
    /// - `UnknownMember` if the ordering or a flow references an undeclared
    ///   name
    /// - `OrderSpec` if the explicit ordering is not a permutation of the
    ///   declared members
    pub fn build(self) -> Result<TaggedEnum<V>, SlotflowError> {
        let Self {
            name,
            members,
            ordering,
            flows,
        } = self;

        // Declared name -> declaration index, rejecting duplicates.
        let mut declared: BTreeMap<String, usize> = BTreeMap::new();
        for (decl_index, (member_name, _)) in members.iter().enumerate() {
            if declared.insert(member_name.clone(), decl_index).is_some() {
                return Err(SlotflowError::DuplicateMember(member_name.clone()));
            }
        }

        // Resolved order as a sequence of declaration indexes.
        let resolved: Vec<usize> = match &ordering {
            Some(names) => {
                let mut seen = BTreeSet::new();
                let mut resolved = Vec::with_capacity(names.len());
                for member_name in names {
                    let &decl_index = declared
                        .get(member_name)
                        .ok_or_else(|| SlotflowError::UnknownMember(member_name.clone()))?;
                    if !seen.insert(decl_index) {
                        return Err(SlotflowError::OrderSpec(format!(
                            "duplicate name in ordering: {member_name}"
                        )));
                    }
                    resolved.push(decl_index);
                }
                if resolved.len() != members.len() {
                    return Err(SlotflowError::OrderSpec(format!(
                        "ordering lists {} of {} declared members",
                        resolved.len(),
                        members.len()
                    )));
                }
                resolved
            }
            None => (0..members.len()).collect(),
        };

        // Order index by declaration index, for flow resolution.
        let mut order_of_decl = vec![0usize; members.len()];
        for (order_index, &decl_index) in resolved.iter().enumerate() {
            order_of_decl[decl_index] = order_index;
        }

        // Resolve flow names into per-member transition sets.
        let flow_sets: Option<Vec<BTreeSet<usize>>> = match &flows {
            Some(flow_map) => {
                let mut sets = vec![BTreeSet::new(); members.len()];
                for (from, targets) in flow_map {
                    let &from_decl = declared
                        .get(from)
                        .ok_or_else(|| SlotflowError::UnknownMember(from.clone()))?;
                    for target in targets {
                        let &target_decl = declared
                            .get(target)
                            .ok_or_else(|| SlotflowError::UnknownMember(target.clone()))?;
                        sets[order_of_decl[from_decl]].insert(order_of_decl[target_decl]);
                    }
                }
                Some(sets)
            }
            None => None,
        };

        // Move member records into resolved order.
        let mut pool: Vec<Option<(String, V)>> = members.into_iter().map(Some).collect();
        let mut records = Vec::with_capacity(pool.len());
        let mut by_name = BTreeMap::new();
        for (order_index, &decl_index) in resolved.iter().enumerate() {
            if let Some((member_name, value)) = pool[decl_index].take() {
                by_name.insert(member_name.clone(), order_index);
                records.push(MemberRecord {
                    name: member_name,
                    value,
                });
            }
        }

        Ok(TaggedEnum::from_table(EnumTable {
            name,
            members: records,
            by_name,
            flows: flow_sets,
        }))
    }
}

// =============================================================================
// TESTS
// =============================================================================
