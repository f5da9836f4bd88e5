use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserStore;
use crate::user::errors::UserError;

const SELECT_USER: &str =
    "SELECT id, username, email, password_hash, created_at FROM users";

pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, UserError> {
        Ok(User {
            id: UserId(row.try_get("id").map_err(storage_error)?),
            username: Username::new(row.try_get("username").map_err(storage_error)?)?,
            email: EmailAddress::new(row.try_get("email").map_err(storage_error)?)?,
            password_hash: row.try_get("password_hash").map_err(storage_error)?,
            created_at: row.try_get("created_at").map_err(storage_error)?,
        })
    }
}

fn storage_error(e: sqlx::Error) -> UserError {
    UserError::Storage(e.to_string())
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn create(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // The unique constraints are the authoritative uniqueness check;
            // a violation here means a concurrent registration won the race
            // against the service's pre-check.
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("users_username_key") {
                        return UserError::DuplicateUsername;
                    }
                    if db_err.constraint() == Some("users_email_key") {
                        return UserError::DuplicateEmail;
                    }
                }
            }
            UserError::Storage(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_USER))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row = sqlx::query(&format!("{} WHERE email = $1", SELECT_USER))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, UserError> {
        let row = sqlx::query(&format!(
            // When distinct rows match each field, prefer the email match so
            // the duplicate classification upstream is deterministic.
            "{} WHERE username = $1 OR email = $2 ORDER BY (email = $2) DESC LIMIT 1",
            SELECT_USER
        ))
        .bind(username)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}
