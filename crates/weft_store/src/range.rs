//! Key range helpers.

/// Computes the half-open range `[start, end)` that covers every key
/// beginning with `prefix`.
///
/// The end bound is the prefix with its last byte below `0xff`
/// incremented and everything after it dropped. A prefix made only of
/// `0xff` bytes (or an empty prefix) has no finite upper bound, so the
/// end is `None`.
///
/// # Example
///
/// ```rust
/// use weft_store::prefix_range;
///
/// let (start, end) = prefix_range(b"ab");
/// assert_eq!(start, b"ab");
/// assert_eq!(end.as_deref(), Some(&b"ac"[..]));
/// ```
#[must_use]
pub fn prefix_range(prefix: &[u8]) -> (Vec<u8>, Option<Vec<u8>>) {
    let start = prefix.to_vec();
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < 0xff {
            end.push(last + 1);
            return (start, Some(end));
        }
    }
    (start, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn simple_prefix() {
        assert_eq!(prefix_range(b"_i.name:"), (b"_i.name:".to_vec(), Some(b"_i.name;".to_vec())));
    }

    #[test]
    fn trailing_ff_is_carried() {
        assert_eq!(prefix_range(&[1, 0xff, 0xff]), (vec![1, 0xff, 0xff], Some(vec![2])));
    }

    #[test]
    fn all_ff_is_unbounded() {
        assert_eq!(prefix_range(&[0xff, 0xff]), (vec![0xff, 0xff], None));
    }

    #[test]
    fn empty_prefix_covers_everything() {
        assert_eq!(prefix_range(b""), (Vec::new(), None));
    }

    proptest! {
        #[test]
        fn range_contains_exactly_the_prefixed_keys(
            prefix in prop::collection::vec(any::<u8>(), 0..4),
            key in prop::collection::vec(any::<u8>(), 0..6),
        ) {
            let (start, end) = prefix_range(&prefix);
            let inside = key >= start && end.as_ref().map_or(true, |e| &key < e);
            prop_assert_eq!(inside, key.starts_with(&prefix));
        }
    }
}
