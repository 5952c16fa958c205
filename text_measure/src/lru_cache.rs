// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// An entry in the cache.
struct Entry<K, V> {
    epoch: u64,
    key: K,
    value: V,
}

/// A least-recently-used cache. This cache uses a linear scan of its entries
/// to find a given entry, so it is meant for capacities in the order of a hundred
/// entries at most.
pub(crate) struct LruCache<K, V> {
    entries: Vec<Entry<K, V>>,
    epoch: u64,
    max_entries: usize,
}

impl<K: PartialEq, V> LruCache<K, V> {
    /// Creates a cache holding at most `max_entries` entries (at least one).
    pub(crate) fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            epoch: 0,
            max_entries: max_entries.max(1),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the value stored for `key` and marks it as most recently used.
    pub(crate) fn get(&mut self, key: &K) -> Option<&V> {
        let index = self.entries.iter().position(|entry| entry.key == *key)?;
        self.epoch += 1;
        let entry = &mut self.entries[index];
        entry.epoch = self.epoch;
        Some(&entry.value)
    }

    /// Stores `value` unless `key` is already present, and returns the stored value.
    ///
    /// When the cache is full, the least recently used entry is replaced and its key is
    /// returned alongside.
    pub(crate) fn get_or_insert(&mut self, key: K, value: V) -> (&V, Option<K>) {
        self.epoch += 1;
        let epoch = self.epoch;
        let mut lowest_epoch = epoch;
        let mut lowest_index = 0;
        let mut found = None;
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.key == key {
                found = Some(i);
                break;
            }
            if entry.epoch < lowest_epoch {
                lowest_epoch = entry.epoch;
                lowest_index = i;
            }
        }
        if let Some(index) = found {
            let entry = &mut self.entries[index];
            entry.epoch = epoch;
            return (&entry.value, None);
        }
        if self.entries.len() < self.max_entries {
            self.entries.push(Entry { epoch, key, value });
            let entry = &self.entries[self.entries.len() - 1];
            return (&entry.value, None);
        }
        let entry = &mut self.entries[lowest_index];
        let evicted = core::mem::replace(&mut entry.key, key);
        entry.epoch = epoch;
        entry.value = value;
        (&entry.value, Some(evicted))
    }

    /// Removes `key`, returning its value.
    pub(crate) fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.entries.iter().position(|entry| entry.key == *key)?;
        Some(self.entries.swap_remove(index).value)
    }
}

#[cfg(test)]
mod tests {
    use super::LruCache;

    #[test]
    fn retrieve_existing_entry() {
        let mut cache = LruCache::new(3);
        let (value, evicted) = cache.get_or_insert("key1", 42);
        assert_eq!(*value, 42);
        assert_eq!(evicted, None);

        // The first value stays.
        let (value, _) = cache.get_or_insert("key1", 7);
        assert_eq!(*value, 42);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn lru_eviction() {
        let mut cache = LruCache::new(3);
        cache.get_or_insert("key1", 1);
        cache.get_or_insert("key2", 2);
        cache.get_or_insert("key3", 3);

        // Touch key1 so that key2 becomes the oldest.
        assert_eq!(cache.get(&"key1"), Some(&1));

        let (_, evicted) = cache.get_or_insert("key4", 4);
        assert_eq!(evicted, Some("key2"), "key2 should have been evicted");
        assert_eq!(cache.get(&"key1"), Some(&1));
        assert_eq!(cache.get(&"key2"), None);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn remove_entry() {
        let mut cache = LruCache::new(2);
        cache.get_or_insert("key1", 1);
        assert_eq!(cache.remove(&"key1"), Some(1));
        assert_eq!(cache.remove(&"key1"), None);
        assert_eq!(cache.len(), 0);
    }
}
