//! Authentication error types.

use thiserror::Error;

use crate::services::token::TokenError;

/// Errors that can occur during registration and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required field (name, email or password) is missing or empty.
    #[error("missing required fields")]
    MissingFields,

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] inventario_core::EmailError),

    /// Wrong password or unknown email; both share this variant.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A user with this email is already registered.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Token could not be issued.
    #[error("token error: {0}")]
    Token(#[from] TokenError),
}
