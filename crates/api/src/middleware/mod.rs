//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (binary only)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (add unique ID to each request)
//! 4. Access token guard (`/productos` routes only, via `route_layer`)

pub mod auth;
pub mod request_id;

pub use auth::{ACCESS_TOKEN_HEADER, CurrentIdentity, require_access_token};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
