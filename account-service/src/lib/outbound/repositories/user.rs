use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::NewUser;
use crate::domain::account::models::User;
use crate::domain::account::models::UserId;
use crate::domain::account::models::Username;
use crate::domain::account::ports::UserRepository;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AccountError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            username: Username::new(row.username)
                .map_err(|e| AccountError::Store(format!("Corrupt user row {}: {}", row.id, e)))?,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

fn map_write_error(e: sqlx::Error, username: &Username) -> AccountError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AccountError::DuplicateUsername(username.to_string());
        }
    }
    AccountError::Store(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn exists(&self, username: &Username) -> Result<bool, AccountError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)
            "#,
        )
        .bind(username.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AccountError::Store(e.to_string()))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AccountError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(new_user.username.as_str())
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &new_user.username))?;

        row.try_into()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AccountError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::Store(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn rename(
        &self,
        current: &Username,
        new_username: &Username,
    ) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2
            WHERE username = $1
            "#,
        )
        .bind(current.as_str())
        .bind(new_username.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, new_username))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(current.to_string()));
        }

        Ok(())
    }
}
