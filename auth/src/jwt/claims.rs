use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Claims carried by a session token.
///
/// `sub` is optional on the wire so that a structurally valid token without a
/// subject can be told apart from a malformed one. `exp` is mandatory: a token
/// without it fails to deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (the username the token was issued to)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl SessionClaims {
    /// Create claims for a subject issued at `issued_at` and valid for `validity`.
    ///
    /// # Arguments
    /// * `subject` - Username the token asserts
    /// * `issued_at` - Issuance instant
    /// * `validity` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with sub, iat, and exp set
    ///
    /// # Errors
    /// * `Encoding` - Expiry falls outside the representable date range
    pub fn for_subject(
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        validity: Duration,
    ) -> Result<Self, TokenError> {
        let expires_at = issued_at.checked_add_signed(validity).ok_or_else(|| {
            TokenError::Encoding(format!("token expiry overflows: {} + {}", issued_at, validity))
        })?;

        Ok(Self {
            sub: Some(subject.to_string()),
            exp: expires_at.timestamp(),
            iat: Some(issued_at.timestamp()),
        })
    }

    /// Subject, if present and non-empty.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|s| !s.is_empty())
    }

    /// A token is expired from its `exp` second onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
