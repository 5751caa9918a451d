//! Ordered set of primary keys stored by non-unique indexes.

use crate::error::{IndexError, IndexResult};
use weft_codec::{decode_bytes_list, encode_bytes_list, CodecError, CodecResult, Decode, Encode};

/// The primary keys sharing one secondary key in a non-unique index.
///
/// Members keep insertion order and never repeat. An empty `MultiRef` is
/// never written to a store; the slot is deleted instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiRef {
    refs: Vec<Vec<u8>>,
}

impl MultiRef {
    /// Creates an empty reference set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from keys, rejecting repeats.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::RefAlreadyRegistered`] if a key appears twice.
    pub fn from_refs<I, K>(refs: I) -> IndexResult<Self>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<[u8]>,
    {
        let mut set = Self::new();
        for key in refs {
            set.add(key.as_ref())?;
        }
        Ok(set)
    }

    /// Adds `key` at the end.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::RefAlreadyRegistered`] if `key` is a member.
    pub fn add(&mut self, key: &[u8]) -> IndexResult<()> {
        if self.contains(key) {
            return Err(IndexError::RefAlreadyRegistered);
        }
        self.refs.push(key.to_vec());
        Ok(())
    }

    /// Removes `key`, keeping the order of the others.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::RefNotRegistered`] if `key` is not a member.
    pub fn remove(&mut self, key: &[u8]) -> IndexResult<()> {
        let pos = self
            .refs
            .iter()
            .position(|r| r.as_slice() == key)
            .ok_or(IndexError::RefNotRegistered)?;
        self.refs.remove(pos);
        Ok(())
    }

    /// Returns true if `key` is a member.
    #[must_use]
    pub fn contains(&self, key: &[u8]) -> bool {
        self.refs.iter().any(|r| r.as_slice() == key)
    }

    /// Returns the number of members.
    #[must_use]
    pub fn size(&self) -> usize {
        self.refs.len()
    }

    /// Returns true if there are no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Returns the members in order.
    #[must_use]
    pub fn refs(&self) -> &[Vec<u8>] {
        &self.refs
    }

    /// Returns an owned snapshot of the members.
    #[must_use]
    pub fn get_refs(&self) -> Vec<Vec<u8>> {
        self.refs().to_vec()
    }

    /// Consumes the set and returns its members.
    #[must_use]
    pub fn into_refs(self) -> Vec<Vec<u8>> {
        self.refs
    }
}

impl Encode for MultiRef {
    fn encode(&self) -> Vec<u8> {
        encode_bytes_list(&self.refs)
    }
}

impl Decode for MultiRef {
    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        let refs = decode_bytes_list(bytes)?;
        for (i, key) in refs.iter().enumerate() {
            if refs[..i].contains(key) {
                return Err(CodecError::non_canonical("duplicate reference"));
            }
        }
        Ok(Self { refs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn add_keeps_insertion_order() {
        let mut set = MultiRef::new();
        set.add(b"pk2").unwrap();
        set.add(b"pk1").unwrap();
        set.add(b"pk3").unwrap();
        assert_eq!(set.get_refs(), vec![b"pk2".to_vec(), b"pk1".to_vec(), b"pk3".to_vec()]);
        assert_eq!(set.get_refs(), set.refs());
        assert_eq!(set.size(), 3);
    }

    #[test]
    fn add_twice_fails() {
        let mut set = MultiRef::new();
        set.add(b"pk1").unwrap();
        assert!(matches!(set.add(b"pk1"), Err(IndexError::RefAlreadyRegistered)));
        assert_eq!(set.size(), 1);
    }

    #[test]
    fn remove_absent_fails() {
        let mut set = MultiRef::from_refs([b"pk1"]).unwrap();
        assert!(matches!(set.remove(b"pk2"), Err(IndexError::RefNotRegistered)));
        set.remove(b"pk1").unwrap();
        assert!(set.is_empty());
        assert!(matches!(set.remove(b"pk1"), Err(IndexError::RefNotRegistered)));
    }

    #[test]
    fn remove_keeps_order_of_others() {
        let mut set = MultiRef::from_refs(["a", "b", "c"]).unwrap();
        set.remove(b"b").unwrap();
        assert_eq!(set.refs(), &[b"a".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn from_refs_rejects_repeats() {
        assert!(matches!(
            MultiRef::from_refs(["a", "b", "a"]),
            Err(IndexError::RefAlreadyRegistered)
        ));
    }

    #[test]
    fn decode_rejects_repeats() {
        let bytes = encode_bytes_list(&[b"a".as_slice(), b"a".as_slice()]);
        assert!(matches!(
            MultiRef::decode(&bytes),
            Err(CodecError::NonCanonical { .. })
        ));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(MultiRef::decode(b"not a list").is_err());
    }

    proptest! {
        #[test]
        fn roundtrip(keys in prop::collection::hash_set(prop::collection::vec(any::<u8>(), 1..16), 0..24)) {
            let set = MultiRef::from_refs(&keys).unwrap();
            let decoded = MultiRef::decode(&set.encode()).unwrap();
            prop_assert_eq!(decoded, set);
        }

        #[test]
        fn add_all_then_remove_all_but_one(
            keys in prop::collection::hash_set(prop::collection::vec(any::<u8>(), 1..8), 1..16),
        ) {
            let keys: Vec<Vec<u8>> = keys.into_iter().collect();
            let mut set = MultiRef::new();
            for key in &keys {
                set.add(key).unwrap();
            }
            prop_assert_eq!(set.size(), keys.len());
            for key in &keys[1..] {
                set.remove(key).unwrap();
            }
            prop_assert_eq!(set.into_refs(), vec![keys[0].clone()]);
        }
    }
}
