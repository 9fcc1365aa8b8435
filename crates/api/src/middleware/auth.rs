//! Access token guard and identity extractor.
//!
//! Protected route groups are wrapped with [`require_access_token`] via
//! `route_layer`. The guard reads the `x-access-token` header, verifies it,
//! and either rejects the request before any handler runs or stores the
//! verified [`Identity`] in the request extensions for [`CurrentIdentity`].

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::models::Identity;
use crate::state::AppState;

/// Header carrying the access token.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Middleware that requires a valid access token.
///
/// - No header (or an empty one): `AppError::MissingToken`
/// - Token fails verification: `AppError::InvalidToken`
/// - Otherwise the [`Identity`] is attached and the request continues.
///
/// # Errors
///
/// Returns the rejection as an `AppError`; the inner service is not called.
pub async fn require_access_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(ACCESS_TOKEN_HEADER)
        .ok_or(AppError::MissingToken)?;

    let token = header.to_str().map_err(|_| AppError::InvalidToken)?.trim();
    if token.is_empty() {
        return Err(AppError::MissingToken);
    }

    let identity = state.tokens().verify(token).map_err(|e| {
        tracing::warn!(error = %e, "Rejected access token");
        AppError::InvalidToken
    })?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Extractor for the identity attached by [`require_access_token`].
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     CurrentIdentity(identity): CurrentIdentity,
/// ) -> impl IntoResponse {
///     format!("Hola, {}!", identity.email)
/// }
/// ```
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(Self)
            .ok_or(AppError::MissingToken)
    }
}
