//! Value interning with stable one-based indices.

use std::collections::BTreeMap;

/// Maps structurally equal keys to one stable index.
///
/// Indices start at 1 (OBJ references are one-based, leaving 0 free to mean
/// "absent") and are handed out in first-seen order. Nothing is ever
/// removed or renumbered.
#[derive(Debug, Clone)]
pub struct InternTable<K> {
    indices: BTreeMap<K, u32>,
    /// Keys by assigned index minus one.
    keys: Vec<K>,
}

impl<K: Ord + Clone> InternTable<K> {
    pub fn new() -> Self {
        Self {
            indices: BTreeMap::new(),
            keys: Vec::new(),
        }
    }

    /// Index of `key`, assigning the next free index on first sight.
    pub fn index_of(&mut self, key: K) -> u32 {
        if let Some(&index) = self.indices.get(&key) {
            return index;
        }
        self.keys.push(key.clone());
        let index = self.keys.len() as u32;
        self.indices.insert(key, index);
        index
    }

    /// Index of `key` without interning it.
    pub fn get(&self, key: &K) -> Option<u32> {
        self.indices.get(key).copied()
    }

    /// All keys in index order: `keys()[i]` holds the key with index `i + 1`.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<K: Ord + Clone> Default for InternTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Vec3Key, VertexKey};
    use glam::Vec3;

    #[test]
    fn test_indices_start_at_one_in_first_seen_order() {
        let mut table = InternTable::new();
        assert!(table.is_empty());
        assert_eq!(table.index_of("c"), 1);
        assert_eq!(table.index_of("a"), 2);
        assert_eq!(table.index_of("b"), 3);
        assert_eq!(table.keys(), &["c", "a", "b"]);
    }

    #[test]
    fn test_interning_is_idempotent() {
        let mut table = InternTable::new();
        let first = table.index_of(Vec3Key::new(1.0, 2.0, 3.0));
        table.index_of(Vec3Key::new(4.0, 5.0, 6.0));
        let again = table.index_of(Vec3Key::new(1.0, 2.0, 3.0));

        assert_eq!(first, again);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_keys_invert_indices() {
        let mut table = InternTable::new();
        let keys: Vec<VertexKey> = (0..20)
            .map(|i| {
                let f = (i % 7) as f32;
                VertexKey::new(Vec3::new(f, -f, 0.5 * f), Vec3::splat(f % 3.0))
            })
            .collect();

        for key in &keys {
            table.index_of(*key);
        }
        for key in &keys {
            let index = table.get(key).unwrap();
            assert_eq!(table.keys()[index as usize - 1], *key);
        }
        assert_eq!(table.len(), 7);
    }

    #[test]
    fn test_get_does_not_intern() {
        let table: InternTable<u8> = InternTable::new();
        assert_eq!(table.get(&4), None);
        assert!(table.is_empty());
    }
}
