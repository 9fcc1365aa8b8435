//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use inventario_core::Email;

/// A registered user (domain type).
///
/// Holds the Argon2 digest of the password, never the plaintext.
#[derive(Debug, Clone)]
pub struct User {
    /// Display name given at registration.
    pub name: String,
    /// Login identifier; unique and case-sensitive.
    pub email: Email,
    /// PHC-formatted Argon2id digest.
    pub password_hash: String,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

/// Public view of a user returned by the register endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub name: String,
    pub email: Email,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
