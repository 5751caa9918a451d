//! Index engine - secondary keys kept consistent with primary records.
//!
//! An [`Index`] maps secondary keys, derived from objects by an indexing
//! function, to the primary keys of those objects. Entries live in the
//! caller's store under the namespace `"_i." + name + ":"`:
//!
//! ```text
//! _i.<name>:<secondary key>  ->  <primary key>        (unique)
//! _i.<name>:<secondary key>  ->  <encoded MultiRef>   (non-unique)
//! ```
//!
//! # Invariants
//!
//! - A unique slot holds exactly one primary key or is absent
//! - A non-unique slot holds a non-empty MultiRef or is absent
//! - A failed update leaves the index exactly as it was, provided the
//!   store applies each single write atomically
//! - The engine keeps no state between calls; everything lives in the store

use crate::config::IndexConfig;
use crate::error::{IndexError, IndexResult};
use crate::index::multiref::MultiRef;
use crate::index::query::QueryMode;
use crate::object::Object;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};
use weft_codec::{Decode, Encode};
use weft_store::{prefix_range, CacheWrap, KVStore, Model, ReadOnlyKVStore, StoreIterator};

/// Derives the secondary key of an object.
///
/// An empty key means the object has no value for this index; it is
/// skipped rather than stored.
pub type Indexer = Arc<dyn Fn(&dyn Object) -> IndexResult<Vec<u8>> + Send + Sync>;

/// Maps a primary key to the store key of its record.
pub type RefKey = Arc<dyn Fn(&[u8]) -> Vec<u8> + Send + Sync>;

/// A secondary index over objects kept in an ordered store.
///
/// # Example
///
/// ```rust
/// use weft_index::{Index, IndexConfig, Object, SimpleObject};
/// use weft_store::MemStore;
///
/// let index = Index::new(
///     IndexConfig::new("owner").unique(true),
///     |obj: &dyn Object| Ok(obj.value().to_vec()),
///     |pk: &[u8]| [b"user:".as_slice(), pk].concat(),
/// )
/// .unwrap();
///
/// let mut store = MemStore::new();
/// let alice = SimpleObject::new("pk1", "alice");
/// index.update(&mut store, None, Some(&alice)).unwrap();
/// assert_eq!(index.get_at(&store, b"alice").unwrap(), vec![b"pk1".to_vec()]);
/// ```
#[derive(Clone)]
pub struct Index {
    name: String,
    namespace: Vec<u8>,
    unique: bool,
    indexer: Indexer,
    ref_key: RefKey,
}

impl fmt::Debug for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Index")
            .field("name", &self.name)
            .field("unique", &self.unique)
            .finish_non_exhaustive()
    }
}

impl Index {
    /// Creates an index from its configuration, indexing function and
    /// primary-key-to-store-key mapping.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidIndexName`] if the configured name is
    /// not a valid identifier.
    pub fn new<I, R>(config: IndexConfig, indexer: I, ref_key: R) -> IndexResult<Self>
    where
        I: Fn(&dyn Object) -> IndexResult<Vec<u8>> + Send + Sync + 'static,
        R: Fn(&[u8]) -> Vec<u8> + Send + Sync + 'static,
    {
        config.validate()?;
        Ok(Self {
            namespace: config.namespace(),
            name: config.name,
            unique: config.unique,
            indexer: Arc::new(indexer),
            ref_key: Arc::new(ref_key),
        })
    }

    /// Returns the index name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the index enforces uniqueness.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Returns the namespace prefix of every store key of this index.
    #[must_use]
    pub fn namespace(&self) -> &[u8] {
        &self.namespace
    }

    /// Returns the full store key for a secondary key.
    ///
    /// Always a fresh buffer, so results can be kept across calls.
    #[must_use]
    pub fn index_key(&self, key: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.namespace.len() + key.len());
        out.extend_from_slice(&self.namespace);
        out.extend_from_slice(key);
        out
    }

    /// Brings the index in line with a change to a primary record.
    ///
    /// - `prev == None`: the object was created, insert its entry
    /// - `save == None`: the object was deleted, remove its entry
    /// - both present: the object was updated, move its entry if its
    ///   secondary key changed
    ///
    /// # Errors
    ///
    /// - [`IndexError::UpdateNil`] if both are `None`
    /// - [`IndexError::ModifiedPrimaryKey`] if the primary key changed
    /// - [`IndexError::UniqueConstraint`] if a unique slot is taken
    /// - [`IndexError::RemoveUnregistered`], [`IndexError::RefNotRegistered`]
    ///   or [`IndexError::RefAlreadyRegistered`] if the index and the
    ///   primary records disagree
    pub fn update<S: KVStore + ?Sized>(
        &self,
        db: &mut S,
        prev: Option<&dyn Object>,
        save: Option<&dyn Object>,
    ) -> IndexResult<()> {
        match (prev, save) {
            (None, None) => Err(IndexError::UpdateNil),
            (None, Some(save)) => {
                let key = (self.indexer)(save)?;
                self.insert(db, &key, save.key())
            }
            (Some(prev), None) => {
                let key = (self.indexer)(prev)?;
                self.remove(db, &key, prev.key())
            }
            (Some(prev), Some(save)) => self.move_ref(db, prev, save),
        }
    }

    /// Runs [`update`](Self::update) against a write overlay and flushes
    /// it to `db` only if the update succeeds.
    ///
    /// The writes of one update reach `db` through a single batch, so a
    /// store with atomic batches sees a move as one unit.
    ///
    /// # Errors
    ///
    /// Same as [`update`](Self::update), plus any error from the flush.
    pub fn update_staged<S: KVStore + ?Sized>(
        &self,
        db: &mut S,
        prev: Option<&dyn Object>,
        save: Option<&dyn Object>,
    ) -> IndexResult<()> {
        let mut cache = CacheWrap::new(db);
        self.update(&mut cache, prev, save)?;
        cache.write()?;
        Ok(())
    }

    /// Returns the primary keys of objects whose secondary key equals that
    /// of `pattern` (may be empty).
    pub fn get_like<S: ReadOnlyKVStore + ?Sized>(
        &self,
        db: &S,
        pattern: &dyn Object,
    ) -> IndexResult<Vec<Vec<u8>>> {
        let key = (self.indexer)(pattern)?;
        self.get_at(db, &key)
    }

    /// Returns the primary keys stored at a secondary key (may be empty).
    pub fn get_at<S: ReadOnlyKVStore + ?Sized>(
        &self,
        db: &S,
        index: &[u8],
    ) -> IndexResult<Vec<Vec<u8>>> {
        let Some(val) = db.get(&self.index_key(index))? else {
            return Ok(Vec::new());
        };
        if self.unique {
            return Ok(vec![val]);
        }
        Ok(MultiRef::decode(&val)?.into_refs())
    }

    /// Returns the primary keys of every entry whose secondary key starts
    /// with `prefix`, in ascending secondary key order.
    pub fn get_prefix<S: ReadOnlyKVStore + ?Sized>(
        &self,
        db: &S,
        prefix: &[u8],
    ) -> IndexResult<Vec<Vec<u8>>> {
        let (start, end) = prefix_range(&self.index_key(prefix));
        let mut it = db.iterator(Some(start.as_slice()), end.as_deref())?;
        let refs = self.collect_refs(it.as_mut());
        it.close();
        refs
    }

    /// Like [`get_prefix`](Self::get_prefix), in descending secondary key
    /// order. Members of one non-unique entry keep their stored order.
    pub fn get_prefix_reverse<S: ReadOnlyKVStore + ?Sized>(
        &self,
        db: &S,
        prefix: &[u8],
    ) -> IndexResult<Vec<Vec<u8>>> {
        let (start, end) = prefix_range(&self.index_key(prefix));
        let mut it = db.reverse_iterator(Some(start.as_slice()), end.as_deref())?;
        let refs = self.collect_refs(it.as_mut());
        it.close();
        refs
    }

    /// Answers a routed query: `"key"` for an exact secondary key,
    /// `"prefix"` for a prefix scan. Results are the referenced records.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::QueryModeNotImplemented`] for any other mode.
    pub fn query<S: ReadOnlyKVStore + ?Sized>(
        &self,
        db: &S,
        mode: &str,
        data: &[u8],
    ) -> IndexResult<Vec<Model>> {
        self.query_with(db, mode.parse()?, data)
    }

    /// Typed form of [`query`](Self::query).
    pub fn query_with<S: ReadOnlyKVStore + ?Sized>(
        &self,
        db: &S,
        mode: QueryMode,
        data: &[u8],
    ) -> IndexResult<Vec<Model>> {
        let refs = match mode {
            QueryMode::Key => self.get_at(db, data)?,
            QueryMode::Prefix => self.get_prefix(db, data)?,
        };
        self.load_refs(db, refs)
    }

    fn load_refs<S: ReadOnlyKVStore + ?Sized>(
        &self,
        db: &S,
        refs: Vec<Vec<u8>>,
    ) -> IndexResult<Vec<Model>> {
        refs.iter()
            .map(|pk| -> IndexResult<Model> {
                let key = (self.ref_key)(pk);
                let value = db.get(&key)?.unwrap_or_else(|| {
                    warn!(index = %self.name, key_len = key.len(), "index references a missing record");
                    Vec::new()
                });
                Ok(Model { key, value })
            })
            .collect()
    }

    fn collect_refs(&self, it: &mut dyn StoreIterator) -> IndexResult<Vec<Vec<u8>>> {
        let mut refs = Vec::new();
        while it.valid() {
            if self.unique {
                refs.push(it.value().to_vec());
            } else {
                refs.extend(MultiRef::decode(it.value())?.into_refs());
            }
            it.next();
        }
        Ok(refs)
    }

    fn move_ref<S: KVStore + ?Sized>(
        &self,
        db: &mut S,
        prev: &dyn Object,
        save: &dyn Object,
    ) -> IndexResult<()> {
        if prev.key() != save.key() {
            return Err(IndexError::ModifiedPrimaryKey);
        }

        let old_key = (self.indexer)(prev)?;
        let new_key = (self.indexer)(save)?;
        if old_key == new_key {
            return Ok(());
        }

        // check the destination before touching the old entry so a conflict changes nothing
        if !new_key.is_empty() {
            if let Some(cur) = db.get(&self.index_key(&new_key))? {
                if self.unique {
                    debug!(index = %self.name, "unique constraint hit on move");
                    return Err(IndexError::unique_constraint(&self.name));
                }
                if MultiRef::decode(&cur)?.contains(save.key()) {
                    debug!(index = %self.name, "move target already lists the ref");
                    return Err(IndexError::RefAlreadyRegistered);
                }
            }
        }

        trace!(index = %self.name, "moving index entry");
        self.remove(db, &old_key, prev.key())?;
        self.insert(db, &new_key, save.key())
    }

    fn insert<S: KVStore + ?Sized>(&self, db: &mut S, index: &[u8], pk: &[u8]) -> IndexResult<()> {
        if index.is_empty() {
            return Ok(());
        }

        let key = self.index_key(index);
        let cur = db.get(&key)?;

        if self.unique {
            if cur.is_some() {
                debug!(index = %self.name, "unique constraint hit on insert");
                return Err(IndexError::unique_constraint(&self.name));
            }
            trace!(index = %self.name, key_len = index.len(), "insert unique entry");
            db.set(&key, pk)?;
            return Ok(());
        }

        let mut refs = match cur {
            Some(bytes) => MultiRef::decode(&bytes)?,
            None => MultiRef::new(),
        };
        refs.add(pk)?;
        trace!(index = %self.name, refs = refs.size(), "insert multi entry");
        db.set(&key, &refs.encode())?;
        Ok(())
    }

    fn remove<S: KVStore + ?Sized>(&self, db: &mut S, index: &[u8], pk: &[u8]) -> IndexResult<()> {
        if index.is_empty() {
            return Ok(());
        }

        let key = self.index_key(index);
        let Some(cur) = db.get(&key)? else {
            return Err(IndexError::RemoveUnregistered);
        };

        if self.unique {
            // someone else owns this slot
            if cur != pk {
                return Err(IndexError::RemoveUnregistered);
            }
            trace!(index = %self.name, key_len = index.len(), "remove unique entry");
            db.delete(&key)?;
            return Ok(());
        }

        let mut refs = MultiRef::decode(&cur)?;
        refs.remove(pk)?;
        trace!(index = %self.name, refs = refs.size(), "remove from multi entry");
        if refs.is_empty() {
            db.delete(&key)?;
        } else {
            db.set(&key, &refs.encode())?;
        }
        Ok(())
    }
}
