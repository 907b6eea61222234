use thiserror::Error;

/// Error for client input rejected before any store or hashing work.
///
/// The display strings are the exact messages returned to clients.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Username and password must not be empty")]
    EmptyCredentials,

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize, actual: usize },

    #[error("Username must not be empty")]
    EmptyUsername,
}

/// Top-level error for all account operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    // Deliberately identical for unknown usernames and wrong passwords.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token verification failed. The payload is for server-side logs only.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("User not found with username: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
