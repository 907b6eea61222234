use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::LogInCommand;
use crate::account::models::NewUser;
use crate::account::models::Session;
use crate::account::models::SignUpCommand;
use crate::account::models::User;
use crate::account::models::Username;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account and open a session for it.
    ///
    /// # Arguments
    /// * `command` - Validated username and password
    ///
    /// # Returns
    /// Session bound to the new username
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already taken, including a lost creation race
    /// * `Store` - Store operation failed
    /// * `Internal` - Hashing or token signing failed
    async fn sign_up(&self, command: SignUpCommand) -> Result<Session, AccountError>;

    /// Check credentials and open a session.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username, wrong password, or unreadable stored hash
    /// * `Store` - Store operation failed
    /// * `Internal` - Token signing failed
    async fn log_in(&self, command: LogInCommand) -> Result<Session, AccountError>;

    /// Resolve a bearer token to the username it was issued for.
    ///
    /// # Errors
    /// * `Unauthorized` - Token is malformed, forged, expired, or has no subject
    fn authenticate(&self, token: &str) -> Result<Username, AccountError>;

    /// Rename the authenticated account and open a session under the new name.
    ///
    /// Tokens issued for the old name are not revoked. They keep verifying until
    /// they expire and resolve to whichever account holds that name next.
    ///
    /// # Errors
    /// * `DuplicateUsername` - New username is already taken
    /// * `Unauthorized` - Current username no longer exists
    /// * `Store` - Store operation failed
    /// * `Internal` - Token signing failed
    async fn update_username(
        &self,
        current: &Username,
        new_username: Username,
    ) -> Result<Session, AccountError>;
}

/// Persistence operations for accounts.
///
/// Each call is atomic on its own; no isolation across calls is assumed.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Check whether a username is taken.
    ///
    /// # Errors
    /// * `Store` - Store operation failed
    async fn exists(&self, username: &Username) -> Result<bool, AccountError>;

    /// Persist a new account.
    ///
    /// # Returns
    /// Created user with its store-assigned identifier
    ///
    /// # Errors
    /// * `DuplicateUsername` - Uniqueness constraint rejected the username
    /// * `Store` - Store operation failed
    async fn create(&self, new_user: NewUser) -> Result<User, AccountError>;

    /// Retrieve an account by exact username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Store` - Store operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AccountError>;

    /// Change an account's username, keeping its id and hash.
    ///
    /// # Errors
    /// * `NotFound` - No account has the current username
    /// * `DuplicateUsername` - New username is already taken
    /// * `Store` - Store operation failed
    async fn rename(&self, current: &Username, new_username: &Username)
        -> Result<(), AccountError>;
}

/// Source of the current instant for token issuance and verification.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
