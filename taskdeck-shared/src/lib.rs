//! # Taskdeck Shared Library
//!
//! This crate contains the types, persistence and authentication logic used
//! by the Taskdeck API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `auth`: Password hashing, JWT tokens, refresh-token storage checks
//! - `db`: Connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Taskdeck shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
