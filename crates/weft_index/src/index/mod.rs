//! Secondary indexes over primary records.
//!
//! - [`Index`]: the engine that keeps index entries in step with records
//! - [`MultiRef`]: the member list stored by non-unique entries
//! - [`QueryMode`]: the lookup kinds a routed query may ask for

mod engine;
mod multiref;
mod query;

pub use engine::{Index, Indexer, RefKey};
pub use multiref::MultiRef;
pub use query::QueryMode;
