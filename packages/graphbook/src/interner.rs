//! Node interner: user-provided keys mapped to node attributes, in insertion order.

use crate::core::NodeAttrs;
use indexmap::IndexMap;
use std::hash::Hash;

/// Keys must implement Eq + Hash + Clone; duplicates by key are collapsed and
/// their attributes merged.
#[derive(Clone, Debug)]
pub struct NodeInterner<K>
where
    K: Eq + Hash + Clone,
{
    records: IndexMap<K, NodeAttrs>,
}

impl<K> Default for NodeInterner<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> NodeInterner<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            records: IndexMap::new(),
        }
    }

    /// Intern key + attrs. Returns true when the key was not present before;
    /// otherwise the attributes are merged into the existing record.
    pub fn intern(&mut self, key: K, attrs: NodeAttrs) -> bool {
        if let Some(existing) = self.records.get_mut(&key) {
            existing.merge(attrs);
            return false;
        }
        self.records.insert(key, attrs);
        true
    }

    /// Removes the record, keeping the relative order of the others.
    pub fn remove(&mut self, key: &K) -> Option<NodeAttrs> {
        self.records.shift_remove(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.records.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&NodeAttrs> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.records.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Partition;

    #[test]
    fn duplicate_keys_collapse_and_merge() {
        let mut interner = NodeInterner::new();
        assert!(interner.intern("A", NodeAttrs::new()));
        assert!(!interner.intern("A", NodeAttrs::in_partition(Partition::One)));
        assert_eq!(interner.len(), 1);
        assert_eq!(
            interner.get(&"A").and_then(|a| a.partition),
            Some(Partition::One)
        );
    }

    #[test]
    fn removal_keeps_insertion_order() {
        let mut interner = NodeInterner::new();
        for key in [3, 1, 4, 5] {
            interner.intern(key, NodeAttrs::new());
        }
        assert!(interner.remove(&1).is_some());
        assert!(interner.remove(&1).is_none());
        assert_eq!(interner.keys().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
    }
}
