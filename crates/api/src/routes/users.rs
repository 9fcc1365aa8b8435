//! Registration and login handlers.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::UserView;
use crate::state::AppState;

/// Registration request body. Missing fields are reported as one error.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Register a new user.
///
/// Responds `201` with the user's name and email. The password is never
/// echoed back.
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserView>)> {
    let Json(body) = payload?;

    let user = state
        .auth()
        .register(
            body.name.as_deref(),
            body.email.as_deref(),
            body.password.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(UserView::from(&user))))
}

/// Exchange email and password for an access token.
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>> {
    let Json(body) = payload?;

    let token = state
        .auth()
        .login(body.email.as_deref(), body.password.as_deref())
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Login failed"))?;

    Ok(Json(TokenResponse { token }))
}
