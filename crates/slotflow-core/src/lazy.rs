//! # Lazy Value Cache
//!
//! Per-instance, compute-once caching with explicit invalidation.
//!
//! - `read` invokes the compute function at most once per key, then serves
//!   the cached value on every later read
//! - Keys that opt into tracking are recorded in an insertion-ordered,
//!   duplicate-free registry
//! - Invalidation is a whole-instance operation: it drops every cached value
//!   and clears the registry; there is no per-key invalidation
//!
//! ## Ownership
//!
//! Each instance owns its own `LazyCache`; the cache is never shared between
//! instances and is never serialized. Compute-and-store is not atomic, so the
//! cache gives no correctness guarantee under concurrent unsynchronized
//! access to the same instance.
//!
//! ## Usage
//!
//! The owning type keeps a `LazyCache` field and routes derived properties
//! through it:
//!
//! ```
//! use slotflow_core::{LazyCache, SlotKey};
//!
//! const TOTAL: SlotKey = SlotKey::new("total");
//!
//! struct Report {
//!     data: u64,
//!     cache: LazyCache<u64>,
//! }
//!
//! impl Report {
//!     fn total(&mut self) -> u64 {
//!         let data = self.data;
//!         *self.cache.read_with(TOTAL, true, || data + 1)
//!     }
//! }
//!
//! let mut report = Report { data: 1, cache: LazyCache::new() };
//! assert_eq!(report.total(), 2);
//! report.data = 5;
//! assert_eq!(report.total(), 2); // still cached
//! report.cache.invalidate();
//! assert_eq!(report.total(), 6);
//! ```

use crate::types::{SlotKey, SlotState};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::convert::Infallible;

// =============================================================================
// LAZY CACHE
// =============================================================================

/// Per-instance cache of lazily computed values.
///
/// One cache cell exists per key; the registry records which tracked keys
/// have been computed since the last invalidation, in first-marked order.
#[derive(Debug, Clone)]
pub struct LazyCache<V> {
    /// Cache cells, keyed by property identifier.
    slots: BTreeMap<SlotKey, V>,
    /// Tracked keys in first-marked order, duplicate-free.
    marked: Vec<SlotKey>,
    /// Last-set value of the invalidation trigger.
    trigger: bool,
}

impl<V> Default for LazyCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> LazyCache<V> {
    /// Create a new empty cache with the trigger unset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
            marked: Vec::new(),
            trigger: false,
        }
    }

    /// Create a new empty cache with an initial trigger value.
    ///
    /// The initial value is stored but not acted on; only a later
    /// [`set_trigger`](Self::set_trigger) with `true` invalidates.
    #[must_use]
    pub fn with_trigger(initial: bool) -> Self {
        Self {
            trigger: initial,
            ..Self::new()
        }
    }

    /// Read the value for `key`, computing it on first access.
    ///
    /// If no value is cached, `compute` runs exactly once and its result is
    /// stored. When `track` is set, the key is appended to the registry on
    /// first successful computation (keeping its original position if it was
    /// already marked). A compute failure propagates verbatim to the caller
    /// and caches nothing, so the next read retries.
    pub fn read<E, F>(&mut self, key: SlotKey, track: bool, compute: F) -> Result<&V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        match self.slots.entry(key) {
            Entry::Occupied(slot) => Ok(slot.into_mut()),
            Entry::Vacant(slot) => {
                let value = compute()?;
                if track && !self.marked.contains(&key) {
                    self.marked.push(key);
                }
                Ok(slot.insert(value))
            }
        }
    }

    /// Infallible variant of [`read`](Self::read) for compute functions that
    /// cannot fail.
    pub fn read_with<F>(&mut self, key: SlotKey, track: bool, compute: F) -> &V
    where
        F: FnOnce() -> V,
    {
        match self.read::<Infallible, _>(key, track, || Ok(compute())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Observe the state of one slot without computing anything.
    #[must_use]
    pub fn state(&self, key: SlotKey) -> SlotState<'_, V> {
        match self.slots.get(&key) {
            Some(value) => SlotState::Computed(value),
            None => SlotState::Empty,
        }
    }

    /// Drop every cached value and clear the registry.
    ///
    /// The next read for any previously cached key recomputes. This is the
    /// only way to evict: invalidation cannot target a single key.
    pub fn invalidate(&mut self) {
        self.slots.clear();
        self.marked.clear();
    }

    /// Set the invalidation trigger.
    ///
    /// `true` invalidates the whole instance; `false` is a no-op on the
    /// cache. The last-set value is stored either way and is readable via
    /// [`trigger`](Self::trigger).
    pub fn set_trigger(&mut self, value: bool) {
        if value {
            self.invalidate();
        }
        self.trigger = value;
    }

    /// Get the last-set trigger value.
    #[must_use]
    pub fn trigger(&self) -> bool {
        self.trigger
    }

    /// Tracked keys in first-marked order.
    ///
    /// Empty if tracking was never enabled or immediately after invalidation.
    #[must_use]
    pub fn marked_keys(&self) -> &[SlotKey] {
        &self.marked
    }

    /// Number of computed slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check whether no slot is computed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
