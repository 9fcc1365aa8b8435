//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Registration and password login
//! - `token` - Access token issuing and verification

pub mod auth;
pub mod token;

pub use auth::{AuthError, AuthService};
pub use token::{TokenError, TokenService};
