//! Authentication service.
//!
//! Provides registration and password login over the in-memory
//! [`UserStore`], issuing access tokens through the [`TokenService`].

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;

use inventario_core::Email;

use crate::db::UserStore;
use crate::models::User;
use crate::services::token::TokenService;

/// Authentication service.
///
/// Borrows the stores it works on; construct one per request via
/// [`AppState::auth`](crate::state::AppState::auth).
pub struct AuthService<'a> {
    users: &'a UserStore,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a UserStore, tokens: &'a TokenService) -> Self {
        Self { users, tokens }
    }

    /// Register a new user.
    ///
    /// Each field is `None` when the request did not carry it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if any field is absent or empty.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(
        &self,
        name: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, AuthError> {
        let (Some(name), Some(email), Some(password)) = (
            present(name.map(str::trim)),
            present(email),
            present(password),
        ) else {
            return Err(AuthError::MissingFields);
        };

        let email = Email::parse(email)?;
        let password_hash = hash_password(password)?;

        // The store only fails an insert on a duplicate email
        let user = self
            .users
            .insert(User {
                name: name.to_owned(),
                email,
                password_hash,
                created_at: Utc::now(),
            })
            .await
            .map_err(|_| AuthError::UserAlreadyExists)?;

        tracing::info!(email = %user.email, "User registered");
        Ok(user)
    }

    /// Login with email and password, returning a fresh access token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if either field is absent or empty.
    /// Returns `AuthError::InvalidCredentials` if the email is unknown or the
    /// password does not match.
    pub async fn login(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<String, AuthError> {
        let (Some(email), Some(password)) = (present(email), present(password)) else {
            return Err(AuthError::MissingFields);
        };

        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .users
            .get_by_email(&email)
            .await
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        let token = self.tokens.issue(&user.email)?;
        tracing::info!(email = %user.email, "User logged in");
        Ok(token)
    }
}

/// Treat an empty field the same as an absent one.
fn present(field: Option<&str>) -> Option<&str> {
    field.filter(|value| !value.is_empty())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
