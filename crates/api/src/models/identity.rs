//! Verified caller identity.

use serde::{Deserialize, Serialize};

use inventario_core::Email;

/// Identity recovered from a verified access token.
///
/// Inserted into request extensions by the access token guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Email the token was issued for.
    pub email: Email,
}

impl Identity {
    #[must_use]
    pub const fn new(email: Email) -> Self {
        Self { email }
    }
}
