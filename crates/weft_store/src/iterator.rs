//! Slice-backed iterator and key/value pairs.

use crate::traits::StoreIterator;

/// A key paired with its value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Model {
    /// The store key.
    pub key: Vec<u8>,
    /// The stored value.
    pub value: Vec<u8>,
}

impl Model {
    /// Creates a new model from anything convertible to bytes.
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An iterator over a fixed, pre-ordered sequence of models.
///
/// The caller decides the order: an ascending scan passes the models
/// sorted ascending, a reverse scan passes them sorted descending.
///
/// # Example
///
/// ```rust
/// use weft_store::{Model, SliceIterator, StoreIterator};
///
/// let mut it = SliceIterator::new(vec![Model::new("a", "1"), Model::new("b", "2")]);
/// assert_eq!(it.key(), b"a");
/// it.next();
/// assert_eq!(it.value(), b"2");
/// it.next();
/// assert!(!it.valid());
/// ```
#[derive(Debug, Default)]
pub struct SliceIterator {
    data: Vec<Model>,
    idx: usize,
}

impl SliceIterator {
    /// Creates an iterator positioned on the first model.
    #[must_use]
    pub fn new(data: Vec<Model>) -> Self {
        Self { data, idx: 0 }
    }

    /// Creates an iterator that is already exhausted.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    fn assert_valid(&self) {
        assert!(
            self.idx < self.data.len(),
            "store iterator used past its end"
        );
    }
}

impl StoreIterator for SliceIterator {
    fn valid(&self) -> bool {
        self.idx < self.data.len()
    }

    fn next(&mut self) {
        self.assert_valid();
        self.idx += 1;
    }

    fn key(&self) -> &[u8] {
        self.assert_valid();
        &self.data[self.idx].key
    }

    fn value(&self) -> &[u8] {
        self.assert_valid();
        &self.data[self.idx].value
    }

    fn close(&mut self) {
        self.data = Vec::new();
        self.idx = 0;
    }
}

/// Drains the remaining elements of `it` into owned models and closes it.
pub fn collect_models(it: &mut dyn StoreIterator) -> Vec<Model> {
    let mut out = Vec::new();
    while it.valid() {
        out.push(Model::new(it.key(), it.value()));
        it.next();
    }
    it.close();
    out
}

/// Returns true if `key` falls inside the half-open range `[start, end)`.
pub(crate) fn in_range(key: &[u8], start: Option<&[u8]>, end: Option<&[u8]>) -> bool {
    start.map_or(true, |s| key >= s) && end.map_or(true, |e| key < e)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Vec<Model> {
        vec![
            Model::new("a", "1"),
            Model::new("b", "2"),
            Model::new("c", "3"),
        ]
    }

    #[test]
    fn walks_in_given_order() {
        let mut it = SliceIterator::new(abc());
        let mut keys = Vec::new();
        while it.valid() {
            keys.push(it.key().to_vec());
            it.next();
        }
        assert_eq!(keys, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn empty_is_never_valid() {
        let it = SliceIterator::empty();
        assert!(!it.valid());
        assert!(!SliceIterator::new(Vec::new()).valid());
    }

    #[test]
    #[should_panic(expected = "past its end")]
    fn next_past_end_panics() {
        let mut it = SliceIterator::new(vec![Model::new("a", "1")]);
        it.next();
        it.next();
    }

    #[test]
    #[should_panic(expected = "past its end")]
    fn key_on_exhausted_panics() {
        let it = SliceIterator::empty();
        let _ = it.key();
    }

    #[test]
    #[should_panic(expected = "past its end")]
    fn value_on_exhausted_panics() {
        let it = SliceIterator::empty();
        let _ = it.value();
    }

    #[test]
    fn close_is_idempotent() {
        let mut it = SliceIterator::new(abc());
        it.close();
        assert!(!it.valid());
        it.close();
        assert!(!it.valid());
    }

    #[test]
    fn collect_drains_remaining() {
        let mut it = SliceIterator::new(abc());
        it.next();
        let rest = collect_models(&mut it);
        assert_eq!(rest, vec![Model::new("b", "2"), Model::new("c", "3")]);
        assert!(!it.valid());
    }

    #[test]
    fn range_bounds() {
        assert!(in_range(b"b", Some(&b"a"[..]), Some(&b"c"[..])));
        assert!(in_range(b"a", Some(&b"a"[..]), Some(&b"c"[..])));
        assert!(!in_range(b"c", Some(&b"a"[..]), Some(&b"c"[..])));
        assert!(in_range(b"zzz", Some(&b"a"[..]), None));
        assert!(in_range(b"", None, None));
    }
}
