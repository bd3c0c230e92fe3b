//! Insertion-ordered set of observer handles, unique by allocation.
//!
//! Each handle gets a sequence number when it is first inserted. `order` keeps
//! handles sorted by that number (dispatch order), `index` maps the handle's data
//! pointer to its number. Lookups are O(1), inserts and removals O(log n), and a
//! removal never shifts the remaining handles.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::Observer;

/// Address of the observer allocation; vtable metadata is dropped.
fn key_of<O: Observer + ?Sized>(observer: &Arc<O>) -> usize {
    Arc::as_ptr(observer).cast::<()>() as usize
}

/// Registered observers, in insertion order.
#[derive(Default)]
pub struct SubscriberSet {
    next_seq: u64,
    order: BTreeMap<u64, Arc<dyn Observer>>,
    index: HashMap<usize, u64>,
}

impl SubscriberSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with room for `capacity` handles in the lookup index.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            next_seq: 0,
            order: BTreeMap::new(),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Inserts a handle; returns `false` if the same allocation is already present.
    pub fn insert(&mut self, observer: Arc<dyn Observer>) -> bool {
        let key = key_of(&observer);
        if self.index.contains_key(&key) {
            return false;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.index.insert(key, seq);
        self.order.insert(seq, observer);
        true
    }

    /// Removes and returns the registry's handle for this allocation, if any.
    pub fn remove<O: Observer + ?Sized>(&mut self, observer: &Arc<O>) -> Option<Arc<dyn Observer>> {
        let seq = self.index.remove(&key_of(observer))?;
        self.order.remove(&seq)
    }

    /// `true` if this exact allocation is present.
    pub fn contains<O: Observer + ?Sized>(&self, observer: &Arc<O>) -> bool {
        self.index.contains_key(&key_of(observer))
    }

    /// Number of handles.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// `true` if the set holds no handle.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Structural copy of the handles, in insertion order.
    pub fn to_vec(&self) -> Vec<Arc<dyn Observer>> {
        self.order.values().cloned().collect()
    }

    /// Empties the set and hands back every handle, in insertion order.
    pub fn take_all(&mut self) -> Vec<Arc<dyn Observer>> {
        self.index.clear();
        std::mem::take(&mut self.order).into_values().collect()
    }
}

impl fmt::Debug for SubscriberSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberSet")
            .field("len", &self.len())
            .finish()
    }
}
