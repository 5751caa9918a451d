//! Store, batch and iterator traits.

use crate::error::StoreResult;

/// A cursor over an ordered sequence of key/value pairs.
///
/// An iterator starts positioned on its first element (or already
/// exhausted when the range is empty) and moves in one direction only.
/// It cannot be restarted.
///
/// # Panics
///
/// Calling [`key`](Self::key), [`value`](Self::value) or
/// [`next`](Self::next) while [`valid`](Self::valid) is false is a bug in
/// the calling loop and panics.
pub trait StoreIterator {
    /// Returns true while the cursor references a readable element.
    fn valid(&self) -> bool;

    /// Advances to the next element in iteration order.
    fn next(&mut self);

    /// Returns the key at the cursor.
    fn key(&self) -> &[u8];

    /// Returns the value at the cursor.
    fn value(&self) -> &[u8];

    /// Releases any resources held by the iterator.
    ///
    /// Must be safe to call more than once, and after exhaustion.
    fn close(&mut self);
}

/// Read access to an ordered byte-keyed store.
///
/// Keys are ordered lexicographically on their raw bytes. Ranges are
/// half-open `[start, end)`; `None` means unbounded on that side.
pub trait ReadOnlyKVStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>>;

    /// Returns true if a value is stored under `key`.
    fn has(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Iterates `[start, end)` in ascending key order.
    fn iterator(
        &self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
    ) -> StoreResult<Box<dyn StoreIterator + '_>>;

    /// Iterates `[start, end)` in descending key order.
    fn reverse_iterator(
        &self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
    ) -> StoreResult<Box<dyn StoreIterator + '_>>;
}

/// Write access to a store.
pub trait SetDeleter {
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn delete(&mut self, key: &[u8]) -> StoreResult<()>;
}

/// A full read/write ordered store.
pub trait KVStore: ReadOnlyKVStore + SetDeleter {
    /// Creates a batch that writes into this store when flushed.
    fn new_batch(&mut self) -> Box<dyn Batch + '_>;
}

/// An accumulator of pending writes.
///
/// `set` and `delete` only queue operations. [`write`](Self::write)
/// applies them in the order they were queued and clears the batch so it
/// can be reused.
///
/// # Atomicity
///
/// Durable stores must apply a batch all-or-nothing. Index maintenance
/// relies on this to keep a move (remove + insert) from landing halfway.
/// [`NonAtomicBatch`](crate::NonAtomicBatch) does not give that guarantee.
pub trait Batch: SetDeleter {
    /// Applies all queued operations and clears the batch.
    fn write(&mut self) -> StoreResult<()>;

    /// Returns the number of queued operations.
    fn len(&self) -> usize;

    /// Returns true if no operations are queued.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
