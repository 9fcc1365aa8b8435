//! Welcome and health endpoints.

/// Plain-text welcome message.
pub async fn welcome() -> &'static str {
    "Bienvenido"
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. There are no external dependencies
/// to check.
pub async fn health() -> &'static str {
    "ok"
}
