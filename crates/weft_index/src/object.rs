//! Objects that can be indexed.

/// A primary record as seen by an index.
///
/// The index never interprets the value. It only derives a secondary key
/// from the whole object through its indexing function and stores the
/// primary key.
pub trait Object {
    /// Returns the primary key. Non-empty once the object is persisted.
    fn key(&self) -> &[u8];

    /// Returns the value payload.
    fn value(&self) -> &[u8];
}

/// An owned key/value object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleObject {
    key: Vec<u8>,
    value: Vec<u8>,
}

impl SimpleObject {
    /// Creates an object from a primary key and a value.
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns a copy with the value replaced, keeping the primary key.
    #[must_use]
    pub fn with_value(&self, value: impl Into<Vec<u8>>) -> Self {
        Self::new(self.key.clone(), value)
    }
}

impl Object for SimpleObject {
    fn key(&self) -> &[u8] {
        &self.key
    }

    fn value(&self) -> &[u8] {
        &self.value
    }
}
