//! Domain models for the API.
//!
//! Product records are shared with tests and live in `inventario-core`;
//! the types here only exist inside the service.

pub mod identity;
pub mod user;

pub use identity::Identity;
pub use user::{User, UserView};
