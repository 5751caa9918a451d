//! Reference model of index contents.
//!
//! [`RecordModel`] tracks the live records of a bucket in a plain map and
//! derives what each index should hold. [`scan_index`] reads what an
//! index actually holds straight from the store, bypassing the query API.

use std::collections::{BTreeMap, BTreeSet};

use weft_codec::Decode;
use weft_index::{Index, IndexResult, MultiRef, Object, SimpleObject};
use weft_store::{collect_models, prefix_range, ReadOnlyKVStore};

/// Index contents: secondary key to the set of primary keys under it.
pub type Entries = BTreeMap<Vec<u8>, BTreeSet<Vec<u8>>>;

/// Live records keyed by primary key.
#[derive(Debug, Clone, Default)]
pub struct RecordModel {
    records: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl RecordModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful save.
    pub fn save(&mut self, pk: &[u8], value: &[u8]) {
        self.records.insert(pk.to_vec(), value.to_vec());
    }

    /// Records a successful delete.
    pub fn delete(&mut self, pk: &[u8]) {
        self.records.remove(pk);
    }

    /// Returns the value of a live record.
    pub fn get(&self, pk: &[u8]) -> Option<&[u8]> {
        self.records.get(pk).map(Vec::as_slice)
    }

    /// Returns the primary key owning `value`, if any.
    pub fn owner_of(&self, value: &[u8]) -> Option<&[u8]> {
        self.records
            .iter()
            .find(|(_, v)| v.as_slice() == value)
            .map(|(pk, _)| pk.as_slice())
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records are live.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Derives the expected contents of an index built on `indexer`.
    ///
    /// Records whose secondary key is empty are not indexed.
    pub fn expected<F>(&self, indexer: F) -> IndexResult<Entries>
    where
        F: Fn(&dyn Object) -> IndexResult<Vec<u8>>,
    {
        let mut entries = Entries::new();
        for (pk, value) in &self.records {
            let secondary = indexer(&SimpleObject::new(pk.clone(), value.clone()))?;
            if secondary.is_empty() {
                continue;
            }
            entries.entry(secondary).or_default().insert(pk.clone());
        }
        Ok(entries)
    }
}

/// Reads every entry stored under the namespace of `index`.
///
/// Unique slots hold the raw primary key and read back as a one-member
/// set. Non-unique slots are decoded as a [`MultiRef`]; decode failures
/// are returned as errors.
pub fn scan_index<S: ReadOnlyKVStore + ?Sized>(index: &Index, store: &S) -> IndexResult<Entries> {
    let namespace = index.namespace();
    let (start, end) = prefix_range(namespace);
    let mut it = store.iterator(Some(&start), end.as_deref())?;
    let models = collect_models(it.as_mut());
    it.close();

    let mut entries = Entries::new();
    for model in models {
        let refs: BTreeSet<Vec<u8>> = if index.is_unique() {
            BTreeSet::from([model.value])
        } else {
            MultiRef::decode(&model.value)?.into_refs().into_iter().collect()
        };
        entries.insert(model.key[namespace.len()..].to_vec(), refs);
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{first_byte_indexer, value_indexer, TestBucket, TestIndexes};

    #[test]
    fn expected_skips_empty_keys() {
        let mut model = RecordModel::new();
        model.save(b"pk1", b"");
        model.save(b"pk2", b"ab");
        let entries = model.expected(value_indexer).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[b"ab".as_slice()].contains(b"pk2".as_slice()));
    }

    #[test]
    fn scan_matches_model_after_saves() {
        let indexes = TestIndexes::new();
        let mut bucket = TestBucket::new(indexes.all());
        let mut model = RecordModel::new();
        for (pk, value) in [("pk1", "abc"), ("pk2", "acb"), ("pk3", "b")] {
            bucket.save(&SimpleObject::new(pk, value)).unwrap();
            model.save(pk.as_bytes(), value.as_bytes());
        }

        assert_eq!(
            scan_index(&indexes.unique, &bucket.store).unwrap(),
            model.expected(value_indexer).unwrap()
        );
        let multi = scan_index(&indexes.multi, &bucket.store).unwrap();
        assert_eq!(multi, model.expected(first_byte_indexer).unwrap());
        assert_eq!(multi[b"a".as_slice()].len(), 2);
    }

    #[test]
    fn scan_reads_unique_slots_as_single_refs() {
        let indexes = TestIndexes::new();
        let mut bucket = TestBucket::new(vec![indexes.unique.clone()]);
        bucket.save(&SimpleObject::new("pk1", "x")).unwrap();
        bucket.save(&SimpleObject::new("pk2", "yy")).unwrap();

        let entries = scan_index(&indexes.unique, &bucket.store).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[b"x".as_slice()], BTreeSet::from([b"pk1".to_vec()]));
        assert_eq!(entries[b"yy".as_slice()], BTreeSet::from([b"pk2".to_vec()]));
    }

    #[test]
    fn owner_lookup() {
        let mut model = RecordModel::new();
        model.save(b"pk1", b"x");
        assert_eq!(model.owner_of(b"x"), Some(b"pk1".as_slice()));
        model.delete(b"pk1");
        assert_eq!(model.owner_of(b"x"), None);
        assert!(model.is_empty());
    }
}
