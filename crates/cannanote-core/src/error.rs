// Error types for CannaNote stores and services

use thiserror::Error;

/// Result type alias for store and service operations
pub type Result<T> = std::result::Result<T, CannaError>;

/// Errors that can occur in stores and services
///
/// `NotFound` is kept apart from `Store` so callers can choose between a
/// 404-style and a 500-style response.
#[derive(Debug, Error)]
pub enum CannaError {
    /// Identifier does not match any record
    #[error("Not found: {0}")]
    NotFound(String),

    /// A user with this username already exists
    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    /// Login attempted for an unknown username
    #[error("User not found")]
    UserNotFound,

    /// Login attempted with the wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Input rejected at the boundary
    #[error("Validation error: {0}")]
    Validation(String),

    /// Backing store unreachable or query failed
    #[error("Store error: {0}")]
    Store(String),

    /// Failure outside the store, e.g. password hashing
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CannaError {
    /// Create a not found error
    pub fn not_found(what: impl Into<String>) -> Self {
        CannaError::NotFound(what.into())
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        CannaError::Store(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        CannaError::Internal(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        CannaError::Validation(msg.into())
    }

    /// Whether this error came from a failed login
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, CannaError::UserNotFound | CannaError::InvalidCredentials)
    }
}
