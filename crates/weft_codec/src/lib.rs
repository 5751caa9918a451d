//! # Weft Codec
//!
//! Canonical binary encoding for ordered lists of byte strings.
//!
//! Index entries that point at several primary keys store those keys as
//! one encoded list. The layout is a subset of CBOR:
//!
//! - a list is an array header (major type 4) followed by its items
//! - each item is a byte string (major type 2): length header + raw bytes
//! - every length uses the shortest possible header
//! - no indefinite-length items
//!
//! Every item is length-prefixed, so any byte value (including
//! separators such as `:`) may appear inside an item. Encoding is
//! deterministic: equal lists produce identical bytes.
//!
//! ## Usage
//!
//! ```
//! use weft_codec::{decode_bytes_list, encode_bytes_list};
//!
//! let bytes = encode_bytes_list(&[b"pk1".as_slice(), b"pk2".as_slice()]);
//! let decoded = decode_bytes_list(&bytes).unwrap();
//! assert_eq!(decoded, vec![b"pk1".to_vec(), b"pk2".to_vec()]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod decoder;
mod encoder;
mod error;

pub use decoder::{decode_bytes_list, ListDecoder};
pub use encoder::{encode_bytes_list, ListEncoder};
pub use error::{CodecError, CodecResult};

/// Trait for types that can be encoded to canonical bytes.
pub trait Encode {
    /// Encode this value to canonical bytes.
    fn encode(&self) -> Vec<u8>;
}

/// Trait for types that can be decoded from canonical bytes.
pub trait Decode: Sized {
    /// Decode this value from bytes.
    fn decode(bytes: &[u8]) -> CodecResult<Self>;
}

impl Encode for Vec<Vec<u8>> {
    fn encode(&self) -> Vec<u8> {
        encode_bytes_list(self)
    }
}

impl Decode for Vec<Vec<u8>> {
    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        decode_bytes_list(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ciborium::value::Value as CborValue;
    use proptest::prelude::*;

    #[test]
    fn roundtrip_empty() {
        let list: Vec<Vec<u8>> = Vec::new();
        assert_eq!(Vec::<Vec<u8>>::decode(&list.encode()).unwrap(), list);
    }

    #[test]
    fn separators_inside_items() {
        let list = vec![b"a:b".to_vec(), b":".to_vec(), vec![0xff, 0x00]];
        assert_eq!(Vec::<Vec<u8>>::decode(&list.encode()).unwrap(), list);
    }

    #[test]
    fn output_is_standard_cbor() {
        let list = vec![b"alice".to_vec(), vec![0u8; 40]];
        let bytes = list.encode();
        let value: CborValue = ciborium::de::from_reader(bytes.as_slice()).unwrap();
        let expected = CborValue::Array(list.iter().cloned().map(CborValue::Bytes).collect());
        assert_eq!(value, expected);
    }

    #[test]
    fn accepts_cbor_from_other_encoders() {
        let value = CborValue::Array(vec![
            CborValue::Bytes(b"x".to_vec()),
            CborValue::Bytes(vec![9u8; 300]),
        ]);
        let mut bytes = Vec::new();
        ciborium::ser::into_writer(&value, &mut bytes).unwrap();
        let decoded = decode_bytes_list(&bytes).unwrap();
        assert_eq!(decoded, vec![b"x".to_vec(), vec![9u8; 300]]);
    }

    proptest! {
        #[test]
        fn roundtrip_any_list(list in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 0..32)) {
            let bytes = list.encode();
            prop_assert_eq!(Vec::<Vec<u8>>::decode(&bytes).unwrap(), list);
        }

        #[test]
        fn encoding_is_deterministic(list in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..16), 0..8)) {
            prop_assert_eq!(list.encode(), list.clone().encode());
        }

        #[test]
        fn arbitrary_input_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
            let _ = decode_bytes_list(&bytes);
        }
    }
}
