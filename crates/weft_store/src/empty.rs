//! A store that never holds anything.

use crate::batch::NonAtomicBatch;
use crate::error::StoreResult;
use crate::iterator::SliceIterator;
use crate::traits::{Batch, KVStore, ReadOnlyKVStore, SetDeleter, StoreIterator};

/// A null store: reads find nothing, writes are dropped.
///
/// Used as the base layer under a [`CacheWrap`](crate::CacheWrap) when a
/// test needs an overlay with no pre-existing data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyKVStore;

impl ReadOnlyKVStore for EmptyKVStore {
    fn get(&self, _key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Ok(None)
    }

    fn has(&self, _key: &[u8]) -> StoreResult<bool> {
        Ok(false)
    }

    fn iterator(
        &self,
        _start: Option<&[u8]>,
        _end: Option<&[u8]>,
    ) -> StoreResult<Box<dyn StoreIterator + '_>> {
        Ok(Box::new(SliceIterator::empty()))
    }

    fn reverse_iterator(
        &self,
        _start: Option<&[u8]>,
        _end: Option<&[u8]>,
    ) -> StoreResult<Box<dyn StoreIterator + '_>> {
        Ok(Box::new(SliceIterator::empty()))
    }
}

impl SetDeleter for EmptyKVStore {
    fn set(&mut self, _key: &[u8], _value: &[u8]) -> StoreResult<()> {
        Ok(())
    }

    fn delete(&mut self, _key: &[u8]) -> StoreResult<()> {
        Ok(())
    }
}

impl KVStore for EmptyKVStore {
    fn new_batch(&mut self) -> Box<dyn Batch + '_> {
        Box::new(NonAtomicBatch::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_are_dropped() {
        let mut store = EmptyKVStore;
        store.set(b"a", b"1").unwrap();
        assert_eq!(store.get(b"a").unwrap(), None);
        assert!(!store.has(b"a").unwrap());
        store.delete(b"a").unwrap();
    }

    #[test]
    fn iteration_is_empty() {
        let store = EmptyKVStore;
        assert!(!store.iterator(None, None).unwrap().valid());
        assert!(!store.reverse_iterator(None, None).unwrap().valid());
    }

    #[test]
    fn batch_write_is_noop() {
        let mut store = EmptyKVStore;
        {
            let mut batch = store.new_batch();
            batch.set(b"a", b"1").unwrap();
            batch.write().unwrap();
        }
        assert_eq!(store.get(b"a").unwrap(), None);
    }
}
