/// Bearer authentication for Axum
///
/// Extracts the access token from the `Authorization: Bearer <token>` header,
/// validates it, and produces the [`AuthContext`] that protected handlers
/// read from request extensions.
///
/// # Failure Messages
///
/// | Situation | Error |
/// |---|---|
/// | header missing, or not `Bearer` | "Access token required" |
/// | token past `exp` | "Access token expired" |
/// | bad signature, wrong type, garbage | "Invalid access token" |
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use taskdeck_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {}", auth.user_id)
/// }
/// ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_access_token, JwtError};

/// Authentication context added to request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,
}

impl AuthContext {
    /// Creates auth context for a verified user
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Error type for bearer authentication
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Missing or non-Bearer authorization header
    #[error("Access token required")]
    MissingCredentials,

    /// Token signature was fine but it has expired
    #[error("Access token expired")]
    TokenExpired,

    /// Token failed validation for any other reason
    #[error("Invalid access token")]
    InvalidToken,
}

/// Extracts the raw bearer token from request headers
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingCredentials)
}

/// Authenticates a request from its headers
///
/// # Errors
///
/// See the module table for the mapping of failures to [`AuthError`].
pub fn authenticate_bearer(headers: &HeaderMap, access_secret: &str) -> Result<AuthContext, AuthError> {
    let token = bearer_token(headers)?;

    let claims = validate_access_token(token, access_secret).map_err(|e| match e {
        JwtError::Expired => AuthError::TokenExpired,
        other => {
            tracing::debug!(error = %other, "Rejected access token");
            AuthError::InvalidToken
        }
    })?;

    Ok(AuthContext::new(claims.sub))
}
