//! Controller Registry
//!
//! Keeps one controller per host element. Keys are compared with `PartialEq`,
//! which for DOM handles is JS identity.

#[derive(Debug)]
pub struct KeyedRegistry<K, V> {
    entries: Vec<(K, V)>,
}

impl<K: PartialEq, V> Default for KeyedRegistry<K, V> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<K: PartialEq, V> KeyedRegistry<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Build and store a value for `key` unless one exists.
    ///
    /// `make` is not called for a known key. It may decline by returning
    /// `None`. Returns whether a new entry was stored.
    pub fn insert_once<F>(&mut self, key: K, make: F) -> bool
    where
        F: FnOnce(&K) -> Option<V>,
    {
        if self.contains(&key) {
            return false;
        }
        match make(&key) {
            Some(value) => {
                self.entries.push((key, value));
                true
            }
            None => false,
        }
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Remove every entry, handing each value to `teardown`
    pub fn drain_with<F: FnMut(V)>(&mut self, mut teardown: F) {
        for (_, value) in self.entries.drain(..) {
            teardown(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_is_short_circuited() {
        let mut registry = KeyedRegistry::new();
        let mut built = 0;
        for _ in 0..3 {
            registry.insert_once("hero", |_| {
                built += 1;
                Some(built)
            });
        }
        assert_eq!(built, 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&"hero"), Some(&1));
    }

    #[test]
    fn test_declined_build_can_retry() {
        let mut registry: KeyedRegistry<&str, u32> = KeyedRegistry::new();
        assert!(!registry.insert_once("card", |_| None));
        assert!(registry.insert_once("card", |_| Some(7)));
    }

    #[test]
    fn test_drain_tears_down_everything() {
        let mut registry = KeyedRegistry::new();
        registry.insert_once(1, |_| Some("a"));
        registry.insert_once(2, |_| Some("b"));
        let mut torn = Vec::new();
        registry.drain_with(|v| torn.push(v));
        assert_eq!(torn, vec!["a", "b"]);
        assert!(registry.is_empty());
    }
}
