/// Middleware for the API server
///
/// - `auth`: Bearer access token check for protected routes
/// - `security`: Security response headers

pub mod auth;
pub mod security;
