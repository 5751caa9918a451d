//! Copy-on-write overlay store.

use crate::batch::NonAtomicBatch;
use crate::error::StoreResult;
use crate::iterator::{collect_models, in_range, Model, SliceIterator};
use crate::traits::{Batch, KVStore, ReadOnlyKVStore, SetDeleter, StoreIterator};
use std::collections::BTreeMap;
use tracing::debug;

/// A write-buffering overlay over a parent store.
///
/// Writes land in an in-memory overlay (deletes are kept as tombstones);
/// reads and iteration see the overlay merged over the parent. Nothing
/// reaches the parent until [`write`](Self::write), which flushes the
/// overlay through a single parent batch. [`discard`](Self::discard)
/// drops it instead.
///
/// This lets a caller stage a group of related writes and then either
/// commit or drop all of them. Whether the commit itself is atomic
/// depends on the parent's batch.
///
/// # Example
///
/// ```rust
/// use weft_store::{CacheWrap, MemStore, ReadOnlyKVStore, SetDeleter};
///
/// let mut base = MemStore::new();
/// let mut cache = CacheWrap::new(&mut base);
/// cache.set(b"k", b"v").unwrap();
/// assert!(cache.has(b"k").unwrap());
/// cache.write().unwrap();
/// drop(cache);
/// assert!(base.has(b"k").unwrap());
/// ```
pub struct CacheWrap<'a, S: KVStore + ?Sized> {
    parent: &'a mut S,
    dirty: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'a, S: KVStore + ?Sized> CacheWrap<'a, S> {
    /// Wraps `parent` with an empty overlay.
    pub fn new(parent: &'a mut S) -> Self {
        Self {
            parent,
            dirty: BTreeMap::new(),
        }
    }

    /// Returns the number of keys touched since the last write or discard.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.dirty.len()
    }

    /// Flushes the overlay into the parent and clears it.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent batch fails. The overlay is cleared
    /// either way.
    pub fn write(&mut self) -> StoreResult<()> {
        let dirty = std::mem::take(&mut self.dirty);
        if dirty.is_empty() {
            return Ok(());
        }
        debug!(ops = dirty.len(), "flushing cache overlay");

        let mut batch = self.parent.new_batch();
        for (key, value) in &dirty {
            match value {
                Some(value) => batch.set(key, value)?,
                None => batch.delete(key)?,
            }
        }
        batch.write()
    }

    /// Drops every buffered write.
    pub fn discard(&mut self) {
        self.dirty.clear();
    }

    fn merged(&self, start: Option<&[u8]>, end: Option<&[u8]>) -> StoreResult<Vec<Model>> {
        let mut parent_it = self.parent.iterator(start, end)?;
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> = collect_models(parent_it.as_mut())
            .into_iter()
            .map(|m| (m.key, m.value))
            .collect();

        for (key, value) in self.dirty.iter().filter(|(k, _)| in_range(k, start, end)) {
            match value {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }

        Ok(merged.into_iter().map(|(k, v)| Model::new(k, v)).collect())
    }
}

impl<S: KVStore + ?Sized> ReadOnlyKVStore for CacheWrap<'_, S> {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        match self.dirty.get(key) {
            Some(entry) => Ok(entry.clone()),
            None => self.parent.get(key),
        }
    }

    fn iterator(
        &self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
    ) -> StoreResult<Box<dyn StoreIterator + '_>> {
        Ok(Box::new(SliceIterator::new(self.merged(start, end)?)))
    }

    fn reverse_iterator(
        &self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
    ) -> StoreResult<Box<dyn StoreIterator + '_>> {
        let mut models = self.merged(start, end)?;
        models.reverse();
        Ok(Box::new(SliceIterator::new(models)))
    }
}

impl<S: KVStore + ?Sized> SetDeleter for CacheWrap<'_, S> {
    fn set(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.dirty.insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<()> {
        self.dirty.insert(key.to_vec(), None);
        Ok(())
    }
}

impl<S: KVStore + ?Sized> KVStore for CacheWrap<'_, S> {
    fn new_batch(&mut self) -> Box<dyn Batch + '_> {
        Box::new(NonAtomicBatch::new(self))
    }
}
