//! # Weft Index
//!
//! Secondary-index engine for ordered key-value stores.
//!
//! This crate provides:
//! - [`Index`]: maps secondary keys derived from objects to primary keys,
//!   unique or multi-valued
//! - Update handling for insert, delete and move of primary records
//! - Point, pattern and prefix lookups using the store's ordered iteration
//! - Query dispatch for routed `"key"` / `"prefix"` requests
//!
//! The engine holds no state of its own. Every call is a finite sequence
//! of reads and writes against the store it is handed; serializing calls
//! against one store is the caller's job.
//!
//! ## Example
//!
//! ```rust
//! use weft_index::{Index, IndexConfig, Object, SimpleObject};
//! use weft_store::MemStore;
//!
//! let by_team = Index::new(
//!     IndexConfig::new("team"),
//!     |obj: &dyn Object| Ok(obj.value().to_vec()),
//!     |pk: &[u8]| pk.to_vec(),
//! )
//! .unwrap();
//!
//! let mut store = MemStore::new();
//! let ann = SimpleObject::new("ann", "red");
//! let bo = SimpleObject::new("bo", "red");
//! by_team.update(&mut store, None, Some(&ann)).unwrap();
//! by_team.update(&mut store, None, Some(&bo)).unwrap();
//! assert_eq!(by_team.get_at(&store, b"red").unwrap().len(), 2);
//!
//! // ann changes team
//! let ann_blue = ann.with_value("blue");
//! by_team.update(&mut store, Some(&ann), Some(&ann_blue)).unwrap();
//! assert_eq!(by_team.get_at(&store, b"red").unwrap(), vec![b"bo".to_vec()]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
pub mod index;
mod object;

pub use config::{IndexConfig, INDEX_PREFIX, NAMESPACE_SEPARATOR};
pub use error::{IndexError, IndexResult};
pub use index::{Index, Indexer, MultiRef, QueryMode, RefKey};
pub use object::{Object, SimpleObject};
