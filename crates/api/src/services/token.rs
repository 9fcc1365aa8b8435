//! Access token issuing and verification.
//!
//! Tokens are HS256 JWTs whose `sub` claim is the user's email. The signing
//! secret is process-wide and comes from [`TokenConfig`].

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use inventario_core::Email;

use crate::config::TokenConfig;
use crate::models::Identity;

/// Errors from issuing or verifying access tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token could not be signed.
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// The token is past its expiry.
    #[error("token expired")]
    Expired,

    /// Bad signature, malformed token or unexpected claims.
    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    /// The `sub` claim is not a valid email.
    #[error("invalid token subject")]
    InvalidSubject,
}

/// JWT claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    /// Email of the authenticated user.
    sub: String,
    /// Issued at (seconds since epoch).
    iat: i64,
    /// Expires at (seconds since epoch).
    exp: i64,
}

/// Signs and verifies access tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("keys", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Create a token service from configuration.
    #[must_use]
    pub fn new(config: &TokenConfig) -> Self {
        let secret = config.secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl: config.ttl,
        }
    }

    /// Lifetime of newly issued tokens.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `email`, valid from now for the configured ttl.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if encoding fails.
    pub fn issue(&self, email: &Email) -> Result<String, TokenError> {
        self.issue_at(email, Utc::now())
    }

    fn issue_at(&self, email: &Email, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let ttl_secs = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let iat = issued_at.timestamp();
        let claims = Claims {
            sub: email.as_str().to_owned(),
            iat,
            exp: iat.saturating_add(ttl_secs),
        };

        tracing::debug!(email = %email, exp = claims.exp, "Issuing access token");

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Signing)
    }

    /// Verify a token and recover the identity it was issued for.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` for expired tokens, `TokenError::Invalid`
    /// for bad signatures or malformed tokens, and `TokenError::InvalidSubject`
    /// if the subject is not an email.
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            if matches!(e.kind(), ErrorKind::ExpiredSignature) {
                TokenError::Expired
            } else {
                TokenError::Invalid(e)
            }
        })?;

        let email = Email::parse(&data.claims.sub).map_err(|_| TokenError::InvalidSubject)?;
        Ok(Identity::new(email))
    }
}
