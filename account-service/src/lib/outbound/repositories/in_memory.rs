use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::MutexGuard;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::NewUser;
use crate::domain::account::models::User;
use crate::domain::account::models::UserId;
use crate::domain::account::models::Username;
use crate::domain::account::ports::UserRepository;

/// Process-local credential store.
///
/// Every operation takes the lock once, so each call is atomic and the
/// uniqueness check inside `create` is authoritative, like a database
/// constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    next_id: i64,
    users: HashMap<String, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, AccountError> {
        self.state
            .lock()
            .map_err(|_| AccountError::Store("user store lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn exists(&self, username: &Username) -> Result<bool, AccountError> {
        Ok(self.lock()?.users.contains_key(username.as_str()))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AccountError> {
        let mut state = self.lock()?;

        if state.users.contains_key(new_user.username.as_str()) {
            return Err(AccountError::DuplicateUsername(new_user.username.to_string()));
        }

        state.next_id += 1;
        let user = User {
            id: UserId(state.next_id),
            username: new_user.username,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        state
            .users
            .insert(user.username.as_str().to_string(), user.clone());

        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AccountError> {
        Ok(self.lock()?.users.get(username.as_str()).cloned())
    }

    async fn rename(
        &self,
        current: &Username,
        new_username: &Username,
    ) -> Result<(), AccountError> {
        let mut state = self.lock()?;

        if !state.users.contains_key(current.as_str()) {
            return Err(AccountError::NotFound(current.to_string()));
        }
        if current == new_username {
            return Ok(());
        }
        if state.users.contains_key(new_username.as_str()) {
            return Err(AccountError::DuplicateUsername(new_username.to_string()));
        }

        if let Some(mut user) = state.users.remove(current.as_str()) {
            user.username = new_username.clone();
            state.users.insert(new_username.as_str().to_string(), user);
        }

        Ok(())
    }
}
