//! Error types for Polarity

/// Result type alias using Polarity's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Polarity operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input failed validation at the service boundary
    #[error("validation error: {0}")]
    Validation(String),

    /// Model artifacts failed to load at startup; prediction and
    /// explanation are unavailable until the process is restarted
    #[error("model unavailable")]
    ModelUnavailable,

    /// Artifact loading or consistency errors
    #[error("artifact error: {0}")]
    Artifact(String),

    /// Explanation computation errors
    #[error("explanation error: {0}")]
    Explanation(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new artifact error
    pub fn artifact(msg: impl Into<String>) -> Self {
        Self::Artifact(msg.into())
    }

    /// Create a new explanation error
    pub fn explanation(msg: impl Into<String>) -> Self {
        Self::Explanation(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
