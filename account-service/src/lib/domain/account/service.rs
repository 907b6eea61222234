use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::TokenCodec;

use crate::account::errors::AccountError;
use crate::account::models::LogInCommand;
use crate::account::models::NewUser;
use crate::account::models::Password;
use crate::account::models::Session;
use crate::account::models::SignUpCommand;
use crate::account::models::Username;
use crate::account::ports::AccountServicePort;
use crate::account::ports::Clock;
use crate::account::ports::SystemClock;
use crate::account::ports::UserRepository;

/// Plaintext hashed once at startup so that logins for unknown usernames
/// spend the same verification time as logins with a wrong password.
const TIMING_EQUALIZER_PASSWORD: &str = "timing-equalizer";

/// Domain service implementation for account operations.
///
/// Holds no per-request state: the repository handle, the token codec, and the
/// hasher are shared read-only across concurrent requests.
pub struct AccountService<UR, C = SystemClock>
where
    UR: UserRepository,
    C: Clock,
{
    repository: Arc<UR>,
    token_codec: Arc<TokenCodec>,
    password_hasher: PasswordHasher,
    clock: Arc<C>,
    timing_hash: Option<String>,
}

impl<UR> AccountService<UR, SystemClock>
where
    UR: UserRepository,
{
    /// Create a new account service reading the wall clock.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `token_codec` - Session token codec holding the signing secret
    /// * `password_hasher` - Hasher configured with the work factor
    pub fn new(
        repository: Arc<UR>,
        token_codec: Arc<TokenCodec>,
        password_hasher: PasswordHasher,
    ) -> Self {
        Self::with_clock(
            repository,
            token_codec,
            password_hasher,
            Arc::new(SystemClock),
        )
    }
}

impl<UR, C> AccountService<UR, C>
where
    UR: UserRepository,
    C: Clock,
{
    /// Create a new account service with an explicit clock.
    pub fn with_clock(
        repository: Arc<UR>,
        token_codec: Arc<TokenCodec>,
        password_hasher: PasswordHasher,
        clock: Arc<C>,
    ) -> Self {
        let timing_hash = match password_hasher.hash(TIMING_EQUALIZER_PASSWORD) {
            Ok(hash) => Some(hash),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to prepare timing equalizer hash");
                None
            }
        };

        Self {
            repository,
            token_codec,
            password_hasher,
            clock,
            timing_hash,
        }
    }

    fn open_session(&self, username: Username) -> Result<Session, AccountError> {
        let token = self
            .token_codec
            .issue(username.as_str(), self.clock.now())
            .map_err(|e| AccountError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(Session { username, token })
    }

    // Argon2 is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, password: Password) -> Result<String, AccountError> {
        let hasher = self.password_hasher.clone();

        tokio::task::spawn_blocking(move || hasher.hash(password.as_str()))
            .await
            .map_err(|e| AccountError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| AccountError::Internal(format!("Password hashing failed: {}", e)))
    }

    async fn verify_password(
        &self,
        password: String,
        hash: String,
    ) -> Result<Result<bool, PasswordError>, AccountError> {
        let hasher = self.password_hasher.clone();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AccountError::Internal(format!("Verification task failed: {}", e)))
    }
}

#[async_trait]
impl<UR, C> AccountServicePort for AccountService<UR, C>
where
    UR: UserRepository,
    C: Clock,
{
    async fn sign_up(&self, command: SignUpCommand) -> Result<Session, AccountError> {
        let SignUpCommand { username, password } = command;

        if self.repository.exists(&username).await? {
            tracing::debug!(username = %username, "Sign-up rejected, username taken");
            return Err(AccountError::DuplicateUsername(username.to_string()));
        }

        let password_hash = self.hash_password(password).await?;

        // The unique constraint is the authoritative check: a concurrent
        // sign-up that won the race surfaces here as DuplicateUsername.
        let user = self
            .repository
            .create(NewUser {
                username,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "Account created");

        self.open_session(user.username)
    }

    async fn log_in(&self, command: LogInCommand) -> Result<Session, AccountError> {
        let LogInCommand { username, password } = command;

        let Ok(username) = Username::new(username) else {
            return Err(AccountError::InvalidCredentials);
        };

        let Some(user) = self.repository.find_by_username(&username).await? else {
            if let Some(hash) = &self.timing_hash {
                let _ = self.verify_password(password, hash.clone()).await?;
            }
            tracing::debug!(username = %username, "Login rejected");
            return Err(AccountError::InvalidCredentials);
        };

        match self.verify_password(password, user.password_hash).await? {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(username = %username, "Login rejected");
                return Err(AccountError::InvalidCredentials);
            }
            Err(e) => {
                tracing::error!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
                return Err(AccountError::InvalidCredentials);
            }
        }

        self.open_session(user.username)
    }

    fn authenticate(&self, token: &str) -> Result<Username, AccountError> {
        let subject = self
            .token_codec
            .verify(token, self.clock.now())
            .map_err(|e| {
                tracing::warn!(error = %e, "Session token rejected");
                AccountError::Unauthorized(e.to_string())
            })?;

        Username::new(subject).map_err(|e| AccountError::Unauthorized(e.to_string()))
    }

    async fn update_username(
        &self,
        current: &Username,
        new_username: Username,
    ) -> Result<Session, AccountError> {
        self.repository
            .rename(current, &new_username)
            .await
            .map_err(|e| match e {
                AccountError::NotFound(_) => {
                    tracing::warn!(username = %current, "Rename requested for a stale session");
                    AccountError::Unauthorized(format!("account {} no longer exists", current))
                }
                other => other,
            })?;

        tracing::info!(from = %current, to = %new_username, "Username updated");

        self.open_session(new_username)
    }
}
