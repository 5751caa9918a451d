//! Index configuration.

use crate::error::{IndexError, IndexResult};

/// Prefix shared by every index namespace in a store.
pub const INDEX_PREFIX: &[u8] = b"_i.";

/// Separator between an index name and its secondary keys.
pub const NAMESPACE_SEPARATOR: u8 = b':';

/// Configuration for an index.
///
/// An index is configured once and reused for the life of the process;
/// it holds no state of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Name of the index, used in its namespace and in error messages.
    pub name: String,

    /// Whether at most one object may map to each secondary key.
    pub unique: bool,
}

impl IndexConfig {
    /// Creates a non-unique index configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unique: false,
        }
    }

    /// Sets whether the index enforces uniqueness.
    #[must_use]
    pub fn unique(mut self, value: bool) -> Self {
        self.unique = value;
        self
    }

    /// Checks that the name is non-empty and made of `[A-Za-z0-9_]`.
    ///
    /// The separator can therefore never appear inside a name, and no
    /// index namespace is a prefix of another.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidIndexName`] otherwise.
    pub fn validate(&self) -> IndexResult<()> {
        let valid = !self.name.is_empty()
            && self
                .name
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_');
        if valid {
            Ok(())
        } else {
            Err(IndexError::InvalidIndexName {
                name: self.name.clone(),
            })
        }
    }

    /// Returns the storage namespace: `"_i." + name + ":"`.
    #[must_use]
    pub fn namespace(&self) -> Vec<u8> {
        let mut ns = Vec::with_capacity(INDEX_PREFIX.len() + self.name.len() + 1);
        ns.extend_from_slice(INDEX_PREFIX);
        ns.extend_from_slice(self.name.as_bytes());
        ns.push(NAMESPACE_SEPARATOR);
        ns
    }
}
