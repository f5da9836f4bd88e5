use async_trait::async_trait;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for account domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user with validated credentials.
    ///
    /// Checks uniqueness against the store, hashes the password, and
    /// persists the record.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `DuplicateUsername` - Username is already taken
    /// * `Storage` - Store operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Storage` - Store operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve user by email address, password hash included.
    ///
    /// The email is lowercased before lookup so matching is
    /// case-insensitive.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `Storage` - Store operation failed
    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError>;
}

/// Persistence operations for the user record store.
///
/// The store is the sole arbiter of the uniqueness invariant: `create` must
/// reject a record whose username or email already exists, even if a
/// concurrent registration slipped past the service's pre-check.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email uniqueness constraint violated
    /// * `DuplicateUsername` - Username uniqueness constraint violated
    /// * `Storage` - Store operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by normalized email address.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve a user matching either the normalized username or the
    /// normalized email, if any.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, UserError>;
}
