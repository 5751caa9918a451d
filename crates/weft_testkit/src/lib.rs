//! # Weft Testkit
//!
//! Test utilities for weft.
//!
//! This crate provides:
//! - Indexing functions and ready-made indexes
//! - [`TestBucket`], a primary-record table that maintains its indexes
//! - Property-based test generators using proptest
//! - A reference model of expected index contents
//!
//! ## Usage
//!
//! ```rust
//! use weft_testkit::prelude::*;
//! use weft_index::SimpleObject;
//!
//! let indexes = TestIndexes::new();
//! let mut bucket = TestBucket::new(indexes.all());
//! bucket.save(&SimpleObject::new("pk1", "alice")).unwrap();
//!
//! let found = indexes.unique.get_at(&bucket.store, b"alice").unwrap();
//! assert_eq!(found, vec![b"pk1".to_vec()]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::model::*;
}

pub use fixtures::*;
pub use generators::*;
pub use model::*;
