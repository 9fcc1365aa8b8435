//! Inventario API library.
//!
//! Token-protected JSON API over an in-memory products catalogue. The crate
//! is a library so that the router can be driven in-process by tests; the
//! `inventario-api` binary only adds configuration, logging and a listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::app;
