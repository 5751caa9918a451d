//! Error types for the index engine.

use thiserror::Error;

/// Result type for index operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors that can occur while maintaining or reading an index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] weft_store::StoreError),

    /// Stored reference list could not be decoded.
    #[error("codec error: {0}")]
    Codec(#[from] weft_codec::CodecError),

    /// A unique index already maps the secondary key to another object.
    #[error("duplicate entry in unique index {index}")]
    UniqueConstraint {
        /// Name of the violated index.
        index: String,
    },

    /// An update changed the primary key of the object.
    #[error("cannot modify the primary key of an object")]
    ModifiedPrimaryKey,

    /// A removal targeted a slot that is empty or owned by another object.
    #[error("cannot remove index reference to unregistered entry")]
    RemoveUnregistered,

    /// An update was called without a previous or a current object.
    #[error("update requires a previous or a current object")]
    UpdateNil,

    /// A reference list already contains the primary key being added.
    #[error("reference already registered")]
    RefAlreadyRegistered,

    /// A reference list does not contain the primary key being removed.
    #[error("reference not registered")]
    RefNotRegistered,

    /// A query used a mode the index does not handle.
    #[error("not implemented: {mode}")]
    QueryModeNotImplemented {
        /// The unrecognized mode string.
        mode: String,
    },

    /// Index name is empty or contains characters outside `[A-Za-z0-9_]`.
    #[error("invalid index name {name:?}: expected non-empty [A-Za-z0-9_]")]
    InvalidIndexName {
        /// The rejected name.
        name: String,
    },

    /// The indexing function could not derive a secondary key.
    #[error("indexer failed: {message}")]
    IndexerFailed {
        /// Description of the failure.
        message: String,
    },
}

impl IndexError {
    /// Creates a unique constraint error for the named index.
    pub fn unique_constraint(index: impl Into<String>) -> Self {
        Self::UniqueConstraint {
            index: index.into(),
        }
    }

    /// Creates an indexer failure, for use inside indexing functions.
    pub fn indexer(message: impl Into<String>) -> Self {
        Self::IndexerFailed {
            message: message.into(),
        }
    }

    /// Returns true if the error means the index and the primary records
    /// have drifted apart.
    #[must_use]
    pub fn is_consistency_violation(&self) -> bool {
        matches!(
            self,
            Self::RemoveUnregistered | Self::RefAlreadyRegistered | Self::RefNotRegistered
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        assert_eq!(
            IndexError::unique_constraint("username").to_string(),
            "duplicate entry in unique index username"
        );
        assert_eq!(
            IndexError::QueryModeNotImplemented {
                mode: "bogus".into()
            }
            .to_string(),
            "not implemented: bogus"
        );
    }

    #[test]
    fn consistency_grouping() {
        assert!(IndexError::RemoveUnregistered.is_consistency_violation());
        assert!(IndexError::RefNotRegistered.is_consistency_violation());
        assert!(IndexError::RefAlreadyRegistered.is_consistency_violation());
        assert!(!IndexError::UpdateNil.is_consistency_violation());
        assert!(!IndexError::unique_constraint("x").is_consistency_violation());
    }

    #[test]
    fn codec_errors_convert() {
        let err: IndexError = weft_codec::CodecError::UnexpectedEof.into();
        assert!(matches!(err, IndexError::Codec(_)));
    }
}
