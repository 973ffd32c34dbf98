//! Name-keyed slot storage for model entities

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{FEAError, FEAResult};

/// Opaque handle into an [`Arena`]
pub trait ArenaKey: Copy + Eq + std::hash::Hash + std::fmt::Debug {
    fn from_slot(slot: usize) -> Self;
    fn slot(self) -> usize;
}

macro_rules! arena_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(usize);

        impl ArenaKey for $name {
            fn from_slot(slot: usize) -> Self {
                Self(slot)
            }

            fn slot(self) -> usize {
                self.0
            }
        }
    };
}

arena_key!(
    /// Handle to a node
    NodeKey
);
arena_key!(
    /// Handle to an auxiliary (orientation-only) node
    AuxNodeKey
);
arena_key!(
    /// Handle to a member
    MemberKey
);
arena_key!(
    /// Handle to a plate
    PlateKey
);

#[derive(Debug, Clone)]
struct Entry<T> {
    name: String,
    value: T,
}

/// Slot vector with a unique-name index
///
/// Keys stay valid across removals of other entries; a removed slot is never
/// reused, so iteration follows insertion order.
#[derive(Debug, Clone)]
pub struct Arena<K, T> {
    slots: Vec<Option<Entry<T>>>,
    names: HashMap<String, K>,
}

impl<K: ArenaKey, T> Default for Arena<K, T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            names: HashMap::new(),
        }
    }
}

impl<K: ArenaKey, T> Arena<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named value, rejecting duplicate names
    pub fn insert(&mut self, name: &str, value: T) -> FEAResult<K> {
        if self.names.contains_key(name) {
            return Err(FEAError::DuplicateName(name.to_string()));
        }
        let key = K::from_slot(self.slots.len());
        self.slots.push(Some(Entry {
            name: name.to_string(),
            value,
        }));
        self.names.insert(name.to_string(), key);
        Ok(key)
    }

    pub fn key(&self, name: &str) -> Option<K> {
        self.names.get(name).copied()
    }

    pub fn get(&self, key: K) -> Option<&T> {
        self.slots
            .get(key.slot())
            .and_then(|s| s.as_ref())
            .map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.slots
            .get_mut(key.slot())
            .and_then(|s| s.as_mut())
            .map(|e| &mut e.value)
    }

    pub fn name(&self, key: K) -> Option<&str> {
        self.slots
            .get(key.slot())
            .and_then(|s| s.as_ref())
            .map(|e| e.name.as_str())
    }

    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Remove an entry, returning its name and value
    pub fn remove(&mut self, key: K) -> Option<(String, T)> {
        let entry = self.slots.get_mut(key.slot())?.take()?;
        self.names.remove(&entry.name);
        Some((entry.name, entry.value))
    }

    /// Live entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (K, &str, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.as_ref()
                .map(|e| (K::from_slot(i), e.name.as_str(), &e.value))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (K, &mut T)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|e| (K::from_slot(i), &mut e.value)))
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.iter().map(|(k, _, _)| k)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut arena: Arena<NodeKey, i32> = Arena::new();
        let a = arena.insert("A", 1).unwrap();
        let b = arena.insert("B", 2).unwrap();
        assert_eq!(arena.key("B"), Some(b));
        assert_eq!(arena.get(a), Some(&1));
        assert_eq!(arena.name(b), Some("B"));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut arena: Arena<MemberKey, ()> = Arena::new();
        arena.insert("M1", ()).unwrap();
        assert!(matches!(arena.insert("M1", ()), Err(FEAError::DuplicateName(_))));
    }

    #[test]
    fn test_keys_stable_after_removal() {
        let mut arena: Arena<NodeKey, &str> = Arena::new();
        let a = arena.insert("A", "a").unwrap();
        let b = arena.insert("B", "b").unwrap();
        let c = arena.insert("C", "c").unwrap();

        assert_eq!(arena.remove(b), Some(("B".to_string(), "b")));
        assert!(arena.get(b).is_none());
        assert_eq!(arena.get(c), Some(&"c"));
        assert_eq!(arena.keys().collect::<Vec<_>>(), vec![a, c]);

        // The name is free again but the old key stays dead
        let b2 = arena.insert("B", "b2").unwrap();
        assert_ne!(b, b2);
        assert!(arena.get(b).is_none());
    }
}
