//! Error types for lifeline-engine

use thiserror::Error;

/// Result type for lifeline-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lifeline-engine
#[derive(Debug, Error)]
pub enum Error {
    /// A caller passed something the engine cannot act on, such as an
    /// unknown pattern name or an out-of-range snapshot index
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// Core error
    #[error("core error: {0}")]
    Core(#[from] lifeline_core::Error),
}

impl Error {
    pub(crate) fn snapshot_out_of_range(index: usize, len: usize) -> Self {
        Error::InvalidArgument(format!(
            "snapshot index {index} out of range ({len} saved)"
        ))
    }

    pub(crate) fn unknown_pattern(name: &str) -> Self {
        Error::InvalidArgument(format!("unknown pattern {name:?}"))
    }
}

// Compile-time check that Error is Send + Sync
fn _assert_error_send_sync<T: Send + Sync>() {}
fn _error_is_send_sync() {
    _assert_error_send_sync::<Error>();
}
