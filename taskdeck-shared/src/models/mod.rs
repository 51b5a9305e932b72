/// Database models for Taskdeck
///
/// # Models
///
/// - `user`: Accounts, credentials and the stored refresh token digest
/// - `task`: Personal tasks owned by a single user

pub mod task;
pub mod user;
