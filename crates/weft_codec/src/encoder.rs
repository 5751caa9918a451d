//! Canonical encoder for byte-string lists.

/// CBOR major type for byte strings.
pub(crate) const MAJOR_BYTES: u8 = 2;
/// CBOR major type for arrays.
pub(crate) const MAJOR_ARRAY: u8 = 4;

/// Encode an ordered list of byte strings.
///
/// The output is a CBOR array header followed by one CBOR byte string
/// per item, every length in its shortest form. Equal inputs always
/// produce identical bytes.
///
/// # Example
///
/// ```
/// use weft_codec::encode_bytes_list;
///
/// let bytes = encode_bytes_list(&[b"ab".as_slice(), b"c".as_slice()]);
/// assert_eq!(bytes, vec![0x82, 0x42, b'a', b'b', 0x41, b'c']);
/// ```
pub fn encode_bytes_list<T: AsRef<[u8]>>(items: &[T]) -> Vec<u8> {
    let payload: usize = items.iter().map(|i| i.as_ref().len() + 9).sum();
    let mut encoder = ListEncoder::with_capacity(payload + 9);
    encoder.begin_list(items.len());
    for item in items {
        encoder.push_bytes(item.as_ref());
    }
    encoder.into_bytes()
}

/// A streaming encoder for byte-string lists.
///
/// Callers write the list header with [`begin_list`](Self::begin_list)
/// and then exactly that many items with [`push_bytes`](Self::push_bytes).
#[derive(Debug, Default)]
pub struct ListEncoder {
    buffer: Vec<u8>,
}

impl ListEncoder {
    /// Create a new encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new encoder with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Write a list header announcing `len` items.
    pub fn begin_list(&mut self, len: usize) {
        self.encode_header(MAJOR_ARRAY, len as u64);
    }

    /// Write one byte-string item.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.encode_header(MAJOR_BYTES, bytes.len() as u64);
        self.buffer.extend_from_slice(bytes);
    }

    /// Consume this encoder and return the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Get a reference to the encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    #[allow(clippy::cast_possible_truncation)]
    fn encode_header(&mut self, major_type: u8, value: u64) {
        let mt = major_type << 5;

        if value < 24 {
            self.buffer.push(mt | (value as u8));
        } else if u8::try_from(value).is_ok() {
            self.buffer.push(mt | 24);
            self.buffer.push(value as u8);
        } else if u16::try_from(value).is_ok() {
            self.buffer.push(mt | 25);
            self.buffer.extend_from_slice(&(value as u16).to_be_bytes());
        } else if u32::try_from(value).is_ok() {
            self.buffer.push(mt | 26);
            self.buffer.extend_from_slice(&(value as u32).to_be_bytes());
        } else {
            self.buffer.push(mt | 27);
            self.buffer.extend_from_slice(&value.to_be_bytes());
        }
    }
}
