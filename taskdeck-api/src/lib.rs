//! # Taskdeck API Server Library
//!
//! HTTP layer for Taskdeck: per-user task lists behind JWT sessions.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `cookie`: Refresh token cookie
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Validating JSON extractor
//! - `middleware`: Access token check and security headers
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod cookie;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
