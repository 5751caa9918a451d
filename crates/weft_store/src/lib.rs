//! # Weft Store
//!
//! Ordered key-value store abstraction for weft.
//!
//! This crate provides the storage contract the index engine is written
//! against, plus reference in-memory implementations. Stores are
//! **opaque byte stores** ordered lexicographically on raw key bytes;
//! they do not interpret what they hold.
//!
//! ## Traits
//!
//! - [`ReadOnlyKVStore`] - point reads and forward/reverse range iteration
//! - [`SetDeleter`] - point writes
//! - [`KVStore`] - both, plus batch creation
//! - [`Batch`] - queued writes applied by `write`
//! - [`StoreIterator`] - cursor over a range; misuse past the end panics
//!
//! ## Available Stores
//!
//! - [`MemStore`] - `BTreeMap`-backed store for tests and ephemeral state
//! - [`EmptyKVStore`] - holds nothing, drops writes
//! - [`CacheWrap`] - copy-on-write overlay over any other store
//!
//! Durable backends live outside this crate. They must supply a batch
//! whose `write` is all-or-nothing; [`NonAtomicBatch`] is only a stand-in
//! for in-memory stores.
//!
//! ## Example
//!
//! ```rust
//! use weft_store::{prefix_range, MemStore, ReadOnlyKVStore, SetDeleter, StoreIterator};
//!
//! let mut store = MemStore::new();
//! store.set(b"user:alice", b"1").unwrap();
//! store.set(b"user:bob", b"2").unwrap();
//! store.set(b"zone:eu", b"3").unwrap();
//!
//! let (start, end) = prefix_range(b"user:");
//! let mut it = store.iterator(Some(&start), end.as_deref()).unwrap();
//! let mut count = 0;
//! while it.valid() {
//!     count += 1;
//!     it.next();
//! }
//! it.close();
//! assert_eq!(count, 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod batch;
mod cache;
mod empty;
mod error;
mod iterator;
mod memory;
mod range;
mod traits;

pub use batch::NonAtomicBatch;
pub use cache::CacheWrap;
pub use empty::EmptyKVStore;
pub use error::{StoreError, StoreResult};
pub use iterator::{collect_models, Model, SliceIterator};
pub use memory::MemStore;
pub use range::prefix_range;
pub use traits::{Batch, KVStore, ReadOnlyKVStore, SetDeleter, StoreIterator};
