use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::ValidationError;

/// Registered account.
///
/// The password hash never leaves the service: response types copy the
/// username only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Store-assigned numeric user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Any non-empty string. Usernames are case-sensitive and compared exactly as
/// submitted: no trimming, no case folding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Create a new username.
    ///
    /// # Errors
    /// * `EmptyUsername` - Username is the empty string
    pub fn new(username: String) -> Result<Self, ValidationError> {
        if username.is_empty() {
            return Err(ValidationError::EmptyUsername);
        }
        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password submitted for sign-up.
///
/// Its `Debug` output is redacted so it cannot end up in logs.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    pub const MIN_LENGTH: usize = 5;

    /// Create a new password, enforcing the minimum length in characters.
    ///
    /// # Errors
    /// * `PasswordTooShort` - Fewer than 5 characters
    pub fn new(password: String) -> Result<Self, ValidationError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(ValidationError::PasswordTooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Row to insert for a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: String,
}

/// Command to create a new account with validated credentials
#[derive(Debug)]
pub struct SignUpCommand {
    pub username: Username,
    pub password: Password,
}

impl SignUpCommand {
    /// Validate raw sign-up input.
    ///
    /// Emptiness of either field is reported before the password length.
    ///
    /// # Errors
    /// * `EmptyCredentials` - Username or password is empty
    /// * `PasswordTooShort` - Password has fewer than 5 characters
    pub fn new(username: String, password: String) -> Result<Self, ValidationError> {
        if username.is_empty() || password.is_empty() {
            return Err(ValidationError::EmptyCredentials);
        }

        Ok(Self {
            username: Username::new(username)?,
            password: Password::new(password)?,
        })
    }
}

/// Command to log in.
///
/// Fields stay raw: login never reports validation problems, only
/// invalid credentials.
pub struct LogInCommand {
    pub username: String,
    pub password: String,
}

impl LogInCommand {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

impl fmt::Debug for LogInCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogInCommand")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Authenticated session handed back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: Username,
    pub token: String,
}
