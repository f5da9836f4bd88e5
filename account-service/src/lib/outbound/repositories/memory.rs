use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserStore;
use crate::user::errors::UserError;

/// In-memory user record store.
///
/// Substitutable fixture implementing the same uniqueness semantics as the
/// Postgres adapter, so the full router can be exercised without a
/// database. Also usable for local development.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a user directly, bypassing the service layer.
    ///
    /// Account deletion is an external administrative action with no API
    /// endpoint; tests use this to simulate a user deleted after token
    /// issuance.
    pub async fn remove(&self, id: &UserId) -> Option<User> {
        self.users.write().await.remove(&id.0)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        // Same precedence as the Postgres adapter: email conflict first
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::DuplicateEmail);
        }
        if users.values().any(|u| u.username == user.username) {
            return Err(UserError::DuplicateUsername);
        }

        users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;

        let by_email = users.values().find(|u| u.email.as_str() == email);
        let found = by_email.or_else(|| users.values().find(|u| u.username.as_str() == username));

        Ok(found.cloned())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Username;

    fn user(username: &str, email: &str) -> User {
        User {
            id: UserId::new(),
            username: Username::new(username.to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = InMemoryUserStore::new();

        let created = store
            .create(user("alice", "alice@example.com"))
            .await
            .unwrap();

        let by_id = store.find_by_id(&created.id).await.unwrap();
        assert!(by_id.is_some());

        let by_email = store.find_by_email("alice@example.com").await.unwrap();
        assert_eq!(by_email.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicates() {
        let store = InMemoryUserStore::new();
        store
            .create(user("alice", "alice@example.com"))
            .await
            .unwrap();

        let result = store.create(user("bob", "alice@example.com")).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail)));

        let result = store.create(user("alice", "bob@example.com")).await;
        assert!(matches!(result, Err(UserError::DuplicateUsername)));
    }

    #[tokio::test]
    async fn test_find_by_username_or_email_prefers_email_match() {
        let store = InMemoryUserStore::new();
        let by_username = store
            .create(user("alice", "alice@example.com"))
            .await
            .unwrap();
        let by_email = store.create(user("bob", "bob@example.com")).await.unwrap();

        // "alice" matches one row by username, "bob@example.com" another by
        // email; the email match must win
        let found = store
            .find_by_username_or_email("alice", "bob@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, by_email.id);

        let found = store
            .find_by_username_or_email("alice", "missing@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, by_username.id);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = InMemoryUserStore::new();
        let created = store
            .create(user("alice", "alice@example.com"))
            .await
            .unwrap();

        assert!(store.remove(&created.id).await.is_some());
        assert!(store.find_by_id(&created.id).await.unwrap().is_none());
    }
}
