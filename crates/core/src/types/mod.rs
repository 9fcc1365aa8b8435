//! Core types for the inventory service.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod product;

pub use email::{Email, EmailError};
pub use id::*;
pub use product::{NewProduct, Product, ProductChanges, ProductDraft, ProductError};
