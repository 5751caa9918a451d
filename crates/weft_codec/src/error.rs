//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Unexpected end of input.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A header had a different major type than expected.
    #[error("unexpected CBOR major type: expected {expected}, found {found}")]
    UnexpectedMajorType {
        /// The major type the decoder needed.
        expected: u8,
        /// The major type in the input.
        found: u8,
    },

    /// Indefinite-length items are forbidden.
    #[error("indefinite-length items are forbidden")]
    IndefiniteLengthForbidden,

    /// A length was not encoded in its shortest form.
    #[error("non-canonical encoding: {message}")]
    NonCanonical {
        /// Description of the violation.
        message: String,
    },

    /// A list or byte string declared more elements than allowed.
    #[error("length {len} exceeds limit {max}")]
    TooLarge {
        /// The declared length.
        len: u64,
        /// The configured limit.
        max: u64,
    },

    /// Input continued after the encoded value.
    #[error("{count} trailing bytes after encoded value")]
    TrailingBytes {
        /// Number of unconsumed bytes.
        count: usize,
    },
}

impl CodecError {
    /// Create a non-canonical encoding error.
    pub fn non_canonical(message: impl Into<String>) -> Self {
        Self::NonCanonical {
            message: message.into(),
        }
    }
}
