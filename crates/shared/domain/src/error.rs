//! Domain-level errors, independent of HTTP and storage.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Password rejected by the password rules
    #[error("Password error: {0}")]
    Password(String),

    /// Feed payload could not be interpreted
    #[error("Malformed feed: {0}")]
    Feed(String),

    /// Hashing backend failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }

    pub fn feed(msg: impl Into<String>) -> Self {
        DomainError::Feed(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
