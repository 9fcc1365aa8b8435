//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                  - Welcome text
//! GET    /health            - Health check
//!
//! # Users
//! POST   /register          - Create a user
//! POST   /login             - Exchange credentials for an access token
//!
//! # Products (require x-access-token)
//! GET    /productos         - List all products
//! POST   /productos         - Create a product
//! GET    /productos/{id}    - Show a product
//! PUT    /productos/{id}    - Update a product
//! DELETE /productos/{id}    - Soft-delete a product
//!
//! *      anything else      - 404 {"error": ...}
//! ```

pub mod home;
pub mod products;
pub mod users;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::error::AppError;
use crate::middleware::{request_id_middleware, require_access_token};
use crate::state::AppState;

/// Create the product routes, guarded by the access token middleware.
///
/// The guard is applied with `route_layer`, so it only runs for requests
/// that matched one of these routes.
pub fn product_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/productos", get(products::index).post(products::create))
        .route(
            "/productos/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
        .route_layer(from_fn_with_state(state, require_access_token))
}

/// Create the public user routes.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
}

/// Create all routes with the JSON 404 fallback.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(home::welcome))
        .route("/health", get(home::health))
        .merge(user_routes())
        .merge(product_routes(state))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
}

/// Build the complete application: routes, request IDs and tracing.
pub fn app(state: AppState) -> Router {
    routes(state.clone())
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Uniform JSON 404 for unmatched routes.
async fn not_found() -> AppError {
    AppError::NotFound("route".to_string())
}
