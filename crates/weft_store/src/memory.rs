//! In-memory ordered store for testing.

use crate::batch::NonAtomicBatch;
use crate::error::StoreResult;
use crate::iterator::{Model, SliceIterator};
use crate::traits::{Batch, KVStore, ReadOnlyKVStore, SetDeleter, StoreIterator};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::ops::Bound;

/// An in-memory ordered key-value store.
///
/// This store keeps everything in a `BTreeMap` and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral state that doesn't need persistence
///
/// Iterators copy the requested range upfront, so writes made while an
/// iterator is open are not visible to it. Batches are
/// [`NonAtomicBatch`]es.
///
/// # Thread Safety
///
/// This store is thread-safe and can be shared across threads for reads.
///
/// # Example
///
/// ```rust
/// use weft_store::{MemStore, ReadOnlyKVStore, SetDeleter};
///
/// let mut store = MemStore::new();
/// store.set(b"key", b"value").unwrap();
/// assert_eq!(store.get(b"key").unwrap(), Some(b"value".to_vec()));
/// ```
#[derive(Debug, Default)]
pub struct MemStore {
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store preloaded with the given models.
    #[must_use]
    pub fn with_models(models: impl IntoIterator<Item = Model>) -> Self {
        let data = models.into_iter().map(|m| (m.key, m.value)).collect();
        Self {
            data: RwLock::new(data),
        }
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Returns a copy of every stored pair in ascending key order.
    ///
    /// Useful for asserting that an operation left the store untouched.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Model> {
        self.data
            .read()
            .iter()
            .map(|(k, v)| Model::new(k.clone(), v.clone()))
            .collect()
    }

    /// Removes everything from the store.
    pub fn clear(&mut self) {
        self.data.write().clear();
    }

    fn range(&self, start: Option<&[u8]>, end: Option<&[u8]>) -> Vec<Model> {
        if let (Some(s), Some(e)) = (start, end) {
            if s >= e {
                return Vec::new();
            }
        }
        let lo = start.map_or(Bound::Unbounded, Bound::Included);
        let hi = end.map_or(Bound::Unbounded, Bound::Excluded);
        self.data
            .read()
            .range::<[u8], _>((lo, hi))
            .map(|(k, v)| Model::new(k.clone(), v.clone()))
            .collect()
    }
}

impl ReadOnlyKVStore for MemStore {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn has(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.data.read().contains_key(key))
    }

    fn iterator(
        &self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
    ) -> StoreResult<Box<dyn StoreIterator + '_>> {
        Ok(Box::new(SliceIterator::new(self.range(start, end))))
    }

    fn reverse_iterator(
        &self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
    ) -> StoreResult<Box<dyn StoreIterator + '_>> {
        let mut models = self.range(start, end);
        models.reverse();
        Ok(Box::new(SliceIterator::new(models)))
    }
}

impl SetDeleter for MemStore {
    fn set(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.data.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<()> {
        self.data.write().remove(key);
        Ok(())
    }
}

impl KVStore for MemStore {
    fn new_batch(&mut self) -> Box<dyn Batch + '_> {
        Box::new(NonAtomicBatch::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iterator::collect_models;

    fn keys(it: &mut dyn StoreIterator) -> Vec<Vec<u8>> {
        collect_models(it).into_iter().map(|m| m.key).collect()
    }

    fn seeded() -> MemStore {
        MemStore::with_models(vec![
            Model::new("a", "1"),
            Model::new("ab", "2"),
            Model::new("b", "3"),
            Model::new("c", "4"),
        ])
    }

    #[test]
    fn memory_new_is_empty() {
        let store = MemStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get(b"x").unwrap(), None);
        assert!(!store.has(b"x").unwrap());
    }

    #[test]
    fn memory_set_get_delete() {
        let mut store = MemStore::new();
        store.set(b"k", b"v1").unwrap();
        store.set(b"k", b"v2").unwrap();
        assert_eq!(store.get(b"k").unwrap(), Some(b"v2".to_vec()));
        assert!(store.has(b"k").unwrap());
        assert_eq!(store.len(), 1);

        store.delete(b"k").unwrap();
        assert_eq!(store.get(b"k").unwrap(), None);
        // deleting twice is fine
        store.delete(b"k").unwrap();
    }

    #[test]
    fn memory_iterator_half_open() {
        let store = seeded();
        let mut it = store.iterator(Some(&b"a"[..]), Some(&b"b"[..])).unwrap();
        assert_eq!(keys(it.as_mut()), vec![b"a".to_vec(), b"ab".to_vec()]);
    }

    #[test]
    fn memory_iterator_unbounded() {
        let store = seeded();
        let mut it = store.iterator(Some(&b"b"[..]), None).unwrap();
        assert_eq!(keys(it.as_mut()), vec![b"b".to_vec(), b"c".to_vec()]);

        let mut it = store.iterator(None, None).unwrap();
        assert_eq!(keys(it.as_mut()).len(), 4);
    }

    #[test]
    fn memory_reverse_iterator() {
        let store = seeded();
        let mut it = store.reverse_iterator(Some(&b"ab"[..]), None).unwrap();
        assert_eq!(
            keys(it.as_mut()),
            vec![b"c".to_vec(), b"b".to_vec(), b"ab".to_vec()]
        );
    }

    #[test]
    fn memory_inverted_range_is_empty() {
        let store = seeded();
        assert!(!store.iterator(Some(&b"c"[..]), Some(&b"a"[..])).unwrap().valid());
        assert!(!store.iterator(Some(&b"b"[..]), Some(&b"b"[..])).unwrap().valid());
        assert!(!store.reverse_iterator(Some(&b"c"[..]), Some(&b"a"[..])).unwrap().valid());
    }

    #[test]
    fn memory_iterator_is_a_snapshot() {
        let mut store = seeded();
        let models = {
            let mut it = store.iterator(None, None).unwrap();
            collect_models(it.as_mut())
        };
        store.set(b"d", b"5").unwrap();
        assert_eq!(models.len(), 4);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn memory_batch_writes_on_flush() {
        let mut store = seeded();
        {
            let mut batch = store.new_batch();
            batch.set(b"z", b"26").unwrap();
            batch.delete(b"a").unwrap();
            assert_eq!(batch.len(), 2);
            batch.write().unwrap();
        }
        assert_eq!(store.get(b"z").unwrap(), Some(b"26".to_vec()));
        assert!(!store.has(b"a").unwrap());
    }

    #[test]
    fn memory_clear() {
        let mut store = seeded();
        store.clear();
        assert!(store.is_empty());
        assert!(store.snapshot().is_empty());
    }
}
