//! Error types for lifeline-core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// A cell key could not be decoded back into coordinates.
    ///
    /// Keys are produced internally, so this indicates a defect rather than
    /// a recoverable runtime condition.
    #[error("Malformed cell key {key:?}: {reason}")]
    MalformedKey { key: String, reason: String },

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

impl Error {
    pub(crate) fn malformed_key(key: &str, reason: impl Into<String>) -> Self {
        Error::MalformedKey {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
