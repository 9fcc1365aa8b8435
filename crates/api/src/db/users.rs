//! Credential store.
//!
//! Users are keyed by their exact email string; lookups are case-sensitive.

use std::collections::HashMap;

use tokio::sync::RwLock;

use inventario_core::Email;

use super::RepositoryError;
use crate::models::User;

/// In-memory store of registered users.
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<HashMap<Email, User>>,
}

impl UserStore {
    /// Create an empty user store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new user.
    ///
    /// The uniqueness check and the insert happen under one write lock, so
    /// concurrent registrations of the same email produce exactly one user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    pub async fn insert(&self, user: User) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }
        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }

    /// Get a user by their email address.
    pub async fn get_by_email(&self, email: &Email) -> Option<User> {
        self.users.read().await.get(email).cloned()
    }

    /// Number of registered users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns `true` if nobody has registered yet.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn user(email: &str) -> User {
        User {
            name: "Ana".to_string(),
            email: Email::parse(email).unwrap(),
            password_hash: "$argon2id$stub".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = UserStore::new();
        assert!(store.is_empty().await);

        store.insert(user("ana@example.com")).await.unwrap();

        let found = store
            .get_by_email(&Email::parse("ana@example.com").unwrap())
            .await
            .unwrap();
        assert_eq!(found.name, "Ana");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = UserStore::new();
        store.insert(user("ana@example.com")).await.unwrap();

        let second = store.insert(user("ana@example.com")).await;
        assert!(matches!(second, Err(RepositoryError::Conflict(_))));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_of_one_email_keep_one_user() {
        let store = UserStore::new();

        let (first, second) = tokio::join!(
            store.insert(user("ana@example.com")),
            store.insert(user("ana@example.com")),
        );

        let conflicts = [&first, &second]
            .iter()
            .filter(|result| matches!(result, Err(RepositoryError::Conflict(_))))
            .count();
        assert_eq!(conflicts, 1);
        assert!(first.is_ok() || second.is_ok());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_lookup_is_case_sensitive() {
        let store = UserStore::new();
        store.insert(user("ana@example.com")).await.unwrap();

        let other_case = Email::parse("ANA@example.com").unwrap();
        assert!(store.get_by_email(&other_case).await.is_none());
        store.insert(user("ANA@example.com")).await.unwrap();
        assert_eq!(store.len().await, 2);
    }
}
