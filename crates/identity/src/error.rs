//! Error types for Accord association operations.

use thiserror::Error;

use accord_core::KvError;

/// Errors that can occur when constructing, transcoding, or signing with
/// an association.
#[derive(Debug, Error)]
pub enum AssociationError {
    /// Association type outside the supported allow-list
    #[error("unsupported association type: {assoc_type:?}")]
    UnsupportedAssociationType { assoc_type: String },

    /// Serialized association whose key sequence does not match the format
    #[error("unexpected keys in serialized association: {keys:?}")]
    UnexpectedKeys { keys: Vec<String> },

    /// Serialized association with an unrecognized version field
    #[error("unknown association version: {version:?}")]
    UnknownVersion { version: String },

    /// Numeric field that does not parse as a decimal integer
    #[error("malformed {field} field: {source}")]
    MalformedField {
        field: &'static str,
        source: std::num::ParseIntError,
    },

    /// Secret field that is not valid base64
    #[error("secret is not valid base64: {0}")]
    SecretDecode(#[from] base64::DecodeError),

    /// KV form violation
    #[error("KV form error: {0}")]
    KvForm(#[from] KvError),

    /// Field requested for signing but absent from the supplied data
    #[error("cannot sign missing field: {field:?}")]
    MissingField { field: String },
}

/// Result type for association operations.
pub type AssociationResult<T> = Result<T, AssociationError>;
