//! Insertion-ordered store keyed by both name and UUID

use std::collections::HashMap;

use indexmap::IndexMap;
use uuid::Uuid;

/// Values addressable by unique name or by generated id, iterated in
/// insertion order
#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: IndexMap<Uuid, (String, T)>,
    by_name: HashMap<String, Uuid>,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Insert under a fresh id; returns `None` if the name is taken
    pub fn insert(&mut self, name: &str, value: T) -> Option<Uuid> {
        if self.by_name.contains_key(name) {
            return None;
        }
        let id = Uuid::new_v4();
        self.by_name.insert(name.to_string(), id);
        self.entries.insert(id, (name.to_string(), value));
        Some(id)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn id_of(&self, name: &str) -> Option<Uuid> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, id: &Uuid) -> Option<&str> {
        self.entries.get(id).map(|(name, _)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        let id = self.by_name.get(name)?;
        self.entries.get(id).map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        let id = self.by_name.get(name)?;
        self.entries.get_mut(id).map(|(_, value)| value)
    }

    pub fn get_by_id(&self, id: &Uuid) -> Option<&T> {
        self.entries.get(id).map(|(_, value)| value)
    }

    pub fn get_by_id_mut(&mut self, id: &Uuid) -> Option<&mut T> {
        self.entries.get_mut(id).map(|(_, value)| value)
    }

    /// `(id, name, value)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (Uuid, &str, &T)> {
        self.entries
            .iter()
            .map(|(id, (name, value))| (*id, name.as_str(), value))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values().map(|(_, value)| value)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.values_mut().map(|(_, value)| value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut registry = Registry::new();
        let id = registry.insert("jump", 1).expect("fresh name");

        assert_eq!(registry.get("jump"), Some(&1));
        assert_eq!(registry.get_by_id(&id), Some(&1));
        assert_eq!(registry.id_of("jump"), Some(id));
        assert_eq!(registry.name_of(&id), Some("jump"));
        assert!(registry.contains_name("jump"));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = Registry::new();
        registry.insert("jump", 1);
        assert_eq!(registry.insert("jump", 2), None);
        assert_eq!(registry.get("jump"), Some(&1));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_missing_lookups_return_none() {
        let mut registry: Registry<u8> = Registry::new();
        assert!(registry.get("nope").is_none());
        assert!(registry.get_mut("nope").is_none());
        assert!(registry.get_by_id(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut registry = Registry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.insert(name, name.len());
        }
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);

        for value in registry.values_mut() {
            *value *= 10;
        }
        let values: Vec<_> = registry.iter().map(|(_, _, v)| *v).collect();
        assert_eq!(values, vec![40, 50, 30]);
    }
}
