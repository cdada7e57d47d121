//! Error types for termdex.
//!
//! Every fallible operation in the library returns [`Result`], whose error
//! side is the single [`TermdexError`] enum. Constraint violations are never
//! recovered from inside the library; they surface to the caller as-is.

use thiserror::Error;

/// Result type alias for termdex operations.
pub type Result<T> = std::result::Result<T, TermdexError>;

/// Main error type for termdex operations.
#[derive(Error, Debug)]
pub enum TermdexError {
    /// A corpus line is missing its tab delimiter or carries a non-numeric id.
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// A term, posting list or document id does not fit the binary record width.
    #[error("Encoding overflow: {0}")]
    EncodingOverflow(String),

    /// A persisted index could not be decoded.
    #[error("Corrupt stream: {0}")]
    CorruptStream(String),

    /// A query was not a sequence of terms.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TermdexError {
    pub fn malformed_record(line: usize, reason: impl Into<String>) -> Self {
        TermdexError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    pub fn encoding_overflow(msg: impl Into<String>) -> Self {
        TermdexError::EncodingOverflow(msg.into())
    }

    pub fn corrupt_stream(msg: impl Into<String>) -> Self {
        TermdexError::CorruptStream(msg.into())
    }

    pub fn invalid_query(msg: impl Into<String>) -> Self {
        TermdexError::InvalidQuery(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        TermdexError::InvalidArgument(msg.into())
    }
}

impl From<serde_json::Error> for TermdexError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            TermdexError::Io(err.into())
        } else {
            TermdexError::CorruptStream(err.to_string())
        }
    }
}
