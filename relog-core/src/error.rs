//! Error types for Relog operations

/// Result type for Relog operations
pub type Result<T> = std::result::Result<T, RelogError>;

/// Error types for the Relog library
///
/// The logging hot path (dispatch, buffering, replay) is infallible by
/// contract; these errors cover configuration loading and record export.
#[derive(Debug, thiserror::Error)]
pub enum RelogError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for RelogError {
    fn from(s: String) -> Self {
        RelogError::Other(s)
    }
}

impl From<&str> for RelogError {
    fn from(s: &str) -> Self {
        RelogError::Other(s.to_string())
    }
}

impl From<anyhow::Error> for RelogError {
    fn from(err: anyhow::Error) -> Self {
        RelogError::Other(err.to_string())
    }
}
