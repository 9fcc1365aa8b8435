//! Inventario Core - Shared domain types.
//!
//! This crate provides the types shared by the HTTP service and its tests:
//! - [`Email`] - validated, case-sensitive login identifier
//! - [`ProductId`] - type-safe product reference
//! - [`Product`], [`ProductDraft`], [`ProductChanges`] - catalogue records and
//!   the validation of inbound create/update payloads
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no locking,
//! no HTTP. Stores and handlers live in `inventario-api`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
