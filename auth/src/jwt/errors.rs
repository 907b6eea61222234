use thiserror::Error;

/// Error type for session token operations.
///
/// The verification variants are kept distinct for logging and tests only.
/// Callers must collapse them into a single "unauthorized" outcome before
/// anything reaches a client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token codec misconfigured: {0}")]
    Configuration(String),

    #[error("Failed to encode token: {0}")]
    Encoding(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature does not match")]
    BadSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token has no subject claim")]
    MissingSubject,
}
