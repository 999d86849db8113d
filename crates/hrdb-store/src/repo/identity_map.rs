//! Per-entity identity map
//!
//! Maps a database id to the single shared in-memory instance of that row.

use std::collections::HashMap;

use hrdb_core::model::Shared;

/// Identity map from primary key to shared instance
pub struct IdentityMap<T> {
    entries: HashMap<i64, Shared<T>>,
}

impl<T> IdentityMap<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Get the cached instance for `id`
    pub fn get(&self, id: i64) -> Option<Shared<T>> {
        self.entries.get(&id).cloned()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries.contains_key(&id)
    }

    /// Register an instance, returning the one it displaced
    pub fn insert(&mut self, id: i64, instance: Shared<T>) -> Option<Shared<T>> {
        self.entries.insert(id, instance)
    }

    pub fn remove(&mut self, id: i64) -> Option<Shared<T>> {
        self.entries.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached ids in ascending order
    pub fn ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> Default for IdentityMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrdb_core::model::shared;
    use std::rc::Rc;

    #[test]
    fn test_insert_get_returns_same_instance() {
        let mut map = IdentityMap::new();
        let value = shared("row".to_string());
        assert!(map.insert(3, value.clone()).is_none());

        let fetched = map.get(3).unwrap();
        assert!(Rc::ptr_eq(&fetched, &value));
        assert!(map.contains(3));
        assert!(map.get(4).is_none());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut map = IdentityMap::new();
        map.insert(2, shared(2));
        map.insert(1, shared(1));
        assert_eq!(map.ids(), vec![1, 2]);

        assert!(map.remove(2).is_some());
        assert!(!map.contains(2));
        assert_eq!(map.len(), 1);

        map.clear();
        assert!(map.is_empty());
    }
}
