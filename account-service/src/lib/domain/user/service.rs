use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;
use crate::user::ports::UserStore;

/// Domain service implementation for account operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<S>
where
    S: UserStore,
{
    store: Arc<S>,
    password_hasher: auth::PasswordHasher,
}

impl<S> UserService<S>
where
    S: UserStore,
{
    /// Create a new user service with an injected store.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<S> UserServicePort for UserService<S>
where
    S: UserStore,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        // Pre-check uniqueness so the common case gets the precise error
        // without a round-trip through a failed insert. The store's own
        // constraints still back this up against concurrent registrations.
        if let Some(existing) = self
            .store
            .find_by_username_or_email(command.username.as_str(), command.email.as_str())
            .await?
        {
            if existing.email == command.email {
                return Err(UserError::DuplicateEmail);
            }
            return Err(UserError::DuplicateUsername);
        }

        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| UserError::Storage(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        self.store.create(user).await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError> {
        let email = email.to_lowercase();
        self.store
            .find_by_email(&email)
            .await?
            .ok_or(UserError::NotFound(email))
    }
}
