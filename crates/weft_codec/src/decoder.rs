//! Canonical decoder for byte-string lists.

use crate::encoder::{MAJOR_ARRAY, MAJOR_BYTES};
use crate::error::{CodecError, CodecResult};

/// Maximum allowed item count for a list.
/// Bounds allocation when decoding corrupted input.
const MAX_LIST_ITEMS: u64 = 16 * 1024 * 1024;

/// Maximum allowed length of a single item.
const MAX_ITEM_LENGTH: u64 = 256 * 1024 * 1024;

/// Decode a list produced by [`encode_bytes_list`](crate::encode_bytes_list).
///
/// # Errors
///
/// Returns an error if the input is truncated, uses a wrong major type,
/// an indefinite or non-shortest length, exceeds the size limits, or has
/// bytes left over after the list.
pub fn decode_bytes_list(bytes: &[u8]) -> CodecResult<Vec<Vec<u8>>> {
    let mut decoder = ListDecoder::new(bytes);
    let len = decoder.read_list_header()?;

    // every item takes at least one byte
    let capacity = usize::try_from(len).unwrap_or(usize::MAX).min(decoder.remaining().len());
    let mut items = Vec::with_capacity(capacity);
    for _ in 0..len {
        items.push(decoder.read_bytes_item()?.to_vec());
    }

    if !decoder.is_empty() {
        return Err(CodecError::TrailingBytes {
            count: decoder.remaining().len(),
        });
    }
    Ok(items)
}

/// A canonical decoder over a borrowed buffer.
///
/// Validates that every header uses the shortest encoding and rejects
/// indefinite lengths.
pub struct ListDecoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ListDecoder<'a> {
    /// Create a new decoder for the given bytes.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Read a list header and return its item count.
    pub fn read_list_header(&mut self) -> CodecResult<u64> {
        let len = self.read_header(MAJOR_ARRAY)?;
        if len > MAX_LIST_ITEMS {
            return Err(CodecError::TooLarge {
                len,
                max: MAX_LIST_ITEMS,
            });
        }
        Ok(len)
    }

    /// Read one byte-string item, borrowing from the input.
    pub fn read_bytes_item(&mut self) -> CodecResult<&'a [u8]> {
        let len = self.read_header(MAJOR_BYTES)?;
        if len > MAX_ITEM_LENGTH {
            return Err(CodecError::TooLarge {
                len,
                max: MAX_ITEM_LENGTH,
            });
        }
        let len = usize::try_from(len).map_err(|_| CodecError::TooLarge {
            len,
            max: MAX_ITEM_LENGTH,
        })?;
        self.read_slice(len)
    }

    /// Check if all bytes have been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Get remaining bytes.
    pub fn remaining(&self) -> &[u8] {
        &self.data[self.pos..]
    }

    fn read_header(&mut self, expected: u8) -> CodecResult<u64> {
        let initial = self.read_byte()?;
        let major_type = initial >> 5;
        if major_type != expected {
            return Err(CodecError::UnexpectedMajorType {
                expected,
                found: major_type,
            });
        }
        self.read_length(initial & 0x1f)
    }

    fn read_length(&mut self, additional_info: u8) -> CodecResult<u64> {
        let value = match additional_info {
            0..=23 => return Ok(u64::from(additional_info)),
            24 => u64::from(self.read_byte()?),
            25 => u64::from(u16::from_be_bytes(self.read_array()?)),
            26 => u64::from(u32::from_be_bytes(self.read_array()?)),
            27 => u64::from_be_bytes(self.read_array()?),
            31 => return Err(CodecError::IndefiniteLengthForbidden),
            _ => {
                return Err(CodecError::non_canonical(format!(
                    "reserved additional info {additional_info}"
                )))
            }
        };

        let shortest = match additional_info {
            24 => value >= 24,
            25 => value > u64::from(u8::MAX),
            26 => value > u64::from(u16::MAX),
            _ => value > u64::from(u32::MAX),
        };
        if !shortest {
            return Err(CodecError::non_canonical(
                "length could be encoded in fewer bytes",
            ));
        }
        Ok(value)
    }

    #[inline]
    fn read_byte(&mut self) -> CodecResult<u8> {
        let byte = *self.data.get(self.pos).ok_or(CodecError::UnexpectedEof)?;
        self.pos += 1;
        Ok(byte)
    }

    #[inline]
    fn read_slice(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        let end = self.pos.checked_add(len).ok_or(CodecError::UnexpectedEof)?;
        let bytes = self.data.get(self.pos..end).ok_or(CodecError::UnexpectedEof)?;
        self.pos = end;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_slice(N)?);
        Ok(out)
    }
}
