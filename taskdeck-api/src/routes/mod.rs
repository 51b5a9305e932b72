/// API route handlers
///
/// - `health`: Health check endpoint
/// - `auth`: Session endpoints (register, login, refresh, logout)
/// - `tasks`: Task CRUD for the authenticated user

pub mod auth;
pub mod health;
pub mod tasks;
