//! Test fixtures: indexing functions, indexes and a record bucket.
//!
//! [`TestBucket`] plays the part of the primary-record layer: it stores
//! records under [`RECORD_PREFIX`] and calls every index on each save and
//! delete, the way a real table layer would.

use weft_index::{Index, IndexConfig, IndexResult, Object, SimpleObject};
use weft_store::{CacheWrap, MemStore, ReadOnlyKVStore, SetDeleter};

/// Store prefix of primary records written by [`TestBucket`].
pub const RECORD_PREFIX: &[u8] = b"rec:";

/// Uses the whole value as the secondary key.
pub fn value_indexer(obj: &dyn Object) -> IndexResult<Vec<u8>> {
    Ok(obj.value().to_vec())
}

/// Uses the first byte of the value; empty values are not indexed.
pub fn first_byte_indexer(obj: &dyn Object) -> IndexResult<Vec<u8>> {
    Ok(obj.value().iter().take(1).copied().collect())
}

/// Maps a primary key to its record key under [`RECORD_PREFIX`].
pub fn ref_under(pk: &[u8]) -> Vec<u8> {
    [RECORD_PREFIX, pk].concat()
}

/// A unique and a non-unique index over the same values.
#[derive(Debug, Clone)]
pub struct TestIndexes {
    /// Unique index named `by_value`.
    pub unique: Index,
    /// Non-unique index named `by_initial`, keyed on the first byte.
    pub multi: Index,
}

impl TestIndexes {
    /// Creates both indexes.
    pub fn new() -> Self {
        Self {
            unique: Index::new(
                IndexConfig::new("by_value").unique(true),
                value_indexer,
                ref_under,
            )
            .expect("valid index name"),
            multi: Index::new(IndexConfig::new("by_initial"), first_byte_indexer, ref_under)
                .expect("valid index name"),
        }
    }

    /// Returns both indexes, unique first.
    pub fn all(&self) -> Vec<Index> {
        vec![self.unique.clone(), self.multi.clone()]
    }
}

impl Default for TestIndexes {
    fn default() -> Self {
        Self::new()
    }
}

/// A minimal primary-record table that keeps its indexes up to date.
///
/// Each save or delete is staged in a [`CacheWrap`], so a record change
/// and all of its index updates land together or not at all.
#[derive(Debug, Default)]
pub struct TestBucket {
    /// The backing store, shared by records and indexes.
    pub store: MemStore,
    /// Indexes maintained on every change.
    pub indexes: Vec<Index>,
}

impl TestBucket {
    /// Creates an empty bucket maintaining `indexes`.
    pub fn new(indexes: Vec<Index>) -> Self {
        Self {
            store: MemStore::new(),
            indexes,
        }
    }

    /// Loads the record with primary key `pk`.
    pub fn load(&self, pk: &[u8]) -> IndexResult<Option<SimpleObject>> {
        Ok(self
            .store
            .get(&ref_under(pk))?
            .map(|value| SimpleObject::new(pk, value)))
    }

    /// Creates or replaces a record.
    pub fn save(&mut self, obj: &SimpleObject) -> IndexResult<()> {
        let prev = self.load(obj.key())?;
        let mut cache = CacheWrap::new(&mut self.store);
        for index in &self.indexes {
            index.update(&mut cache, prev.as_ref().map(|p| p as &dyn Object), Some(obj))?;
        }
        cache.set(&ref_under(obj.key()), obj.value())?;
        cache.write()?;
        Ok(())
    }

    /// Deletes a record. Returns false if it did not exist.
    pub fn delete(&mut self, pk: &[u8]) -> IndexResult<bool> {
        let Some(prev) = self.load(pk)? else {
            return Ok(false);
        };
        let mut cache = CacheWrap::new(&mut self.store);
        for index in &self.indexes {
            index.update(&mut cache, Some(&prev), None)?;
        }
        cache.delete(&ref_under(pk))?;
        cache.write()?;
        Ok(true)
    }
}
