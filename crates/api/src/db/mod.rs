//! In-memory stores for users and products.
//!
//! Nothing here survives a restart. Each store owns its data behind a single
//! `tokio::sync::RwLock`; every check-then-mutate sequence runs under one
//! write guard, so a failed operation never leaves a partial change behind.
//!
//! # Stores
//!
//! - [`UserStore`] - registered users keyed by email
//! - [`ProductStore`] - ordered product catalogue with soft delete

pub mod products;
pub mod users;

use std::path::PathBuf;

use thiserror::Error;

use inventario_core::{ProductError, ProductId};

pub use products::ProductStore;
pub use users::UserStore;

/// Errors returned by store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Requested entity was not found (or is soft-deleted).
    #[error("not found")]
    NotFound,

    /// Uniqueness violation (e.g., duplicate email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Input rejected before any mutation.
    #[error("invalid input: {0}")]
    Invalid(#[from] ProductError),

    /// Every product ID up to `i64::MAX` has been handed out.
    #[error("product id space exhausted")]
    IdsExhausted,
}

/// Errors loading a seed catalogue.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The seed file is not a JSON array of products.
    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A seed ID is not positive, or is `i64::MAX` and leaves no ID for new
    /// products.
    #[error("product id {0} in seed is out of range")]
    InvalidId(ProductId),

    /// Two seed records share an ID.
    #[error("duplicate product id {0} in seed")]
    DuplicateId(ProductId),

    /// A seed record violates a field constraint.
    #[error("invalid product {id} in seed: {source}")]
    InvalidProduct {
        id: ProductId,
        #[source]
        source: ProductError,
    },
}
