/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /auth/register` - Create an account and start a session
/// - `POST /auth/login` - Start a session
/// - `POST /auth/refresh` - Exchange the refresh cookie for an access token
/// - `POST /auth/logout` - End the session (bearer required)
///
/// A session is one access token (returned in the body) plus one refresh
/// token (set as the `refreshToken` cookie). Only the digest of the newest
/// refresh token is stored per user, so logging in again or logging out
/// invalidates every earlier refresh token for that user.

use crate::{
    app::AppState,
    cookie::{clear_refresh_cookie, read_cookie, refresh_cookie, REFRESH_COOKIE},
    error::{ApiError, ApiResult},
    extract::{trim_in_place, Normalize, ValidatedJson},
};
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, StatusCode},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskdeck_shared::{
    auth::{
        jwt::{self, JwtError},
        middleware::AuthContext,
        password::{self, MIN_PASSWORD_LENGTH},
        refresh,
    },
    models::user::{normalize_email, CreateUser, User, UserProfile},
};
use validator::Validate;

/// Register request
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    /// Plaintext password
    #[validate(length(
        min = MIN_PASSWORD_LENGTH,
        message = "Password must be at least 6 characters long"
    ))]
    pub password: String,

    /// Display name
    #[validate(length(min = 2, message = "Name must be at least 2 characters long"))]
    pub name: String,
}

impl Normalize for RegisterRequest {
    fn normalize(&mut self) {
        self.email = normalize_email(&self.email);
        trim_in_place(&mut self.name);
    }
}

/// Login request
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    /// Plaintext password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl Normalize for LoginRequest {
    fn normalize(&mut self) {
        self.email = normalize_email(&self.email);
    }
}

/// Register / login response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub message: String,
    pub user: UserProfile,
    pub access_token: String,
}

/// Refresh response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    pub user: UserProfile,
}

/// Plain confirmation body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

type SetCookie = [(HeaderName, String); 1];

/// Issues a token pair, stores the refresh digest and builds the cookie
///
/// Returns the access token and the `Set-Cookie` header.
async fn start_session(state: &AppState, user: &User) -> ApiResult<(String, SetCookie)> {
    let pair = jwt::issue_token_pair(user.id, state.access_secret(), state.refresh_secret())?;

    let digest = refresh::hash_refresh_token(&pair.refresh_token);
    if !User::store_refresh_token(&state.db, user.id, &digest).await? {
        return Err(ApiError::InternalError(format!(
            "User {} vanished while starting a session",
            user.id
        )));
    }

    let cookie = refresh_cookie(&pair.refresh_token, state.production());
    Ok((pair.access_token, [(header::SET_COOKIE, cookie)]))
}

/// Register a new user
///
/// ```text
/// POST /auth/register
/// Content-Type: application/json
///
/// { "email": "user@example.com", "password": "secret1", "name": "Jane" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed or email already registered
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, SetCookie, Json<AuthResponse>)> {
    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::BadRequest(
            "User with this email already exists".to_string(),
        ));
    }

    let password_hash = password::hash_password(&req.password)?;

    // A concurrent registration for the same email fails on the unique
    // constraint and maps to the same 400.
    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            password_hash,
            name: req.name,
        },
    )
    .await?;

    let (access_token, cookie) = start_session(&state, &user).await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        cookie,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            user: UserProfile::from(&user),
            access_token,
        }),
    ))
}

/// Login with email and password
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Unknown email or wrong password (same message)
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<(SetCookie, Json<AuthResponse>)> {
    let invalid = || ApiError::Unauthorized("Invalid email or password".to_string());

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(invalid)?;

    if !password::verify_password(&req.password, &user.password_hash)? {
        tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
        return Err(invalid());
    }

    let (access_token, cookie) = start_session(&state, &user).await?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok((
        cookie,
        Json(AuthResponse {
            message: "Login successful".to_string(),
            user: UserProfile::from(&user),
            access_token,
        }),
    ))
}

/// Exchange the refresh cookie for a new access token
///
/// The refresh token itself is not rotated; it stays valid until it
/// expires, the user logs in again, or the user logs out.
///
/// # Errors
///
/// - `401 Unauthorized`: "Refresh token required", "Refresh token expired"
///   or "Invalid refresh token"
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<RefreshResponse>> {
    let invalid = || ApiError::Unauthorized("Invalid refresh token".to_string());

    let token = read_cookie(&headers, REFRESH_COOKIE)
        .ok_or_else(|| ApiError::Unauthorized("Refresh token required".to_string()))?;

    let claims = jwt::validate_refresh_token(token, state.refresh_secret()).map_err(|e| match e {
        JwtError::Expired => ApiError::Unauthorized("Refresh token expired".to_string()),
        other => {
            tracing::debug!(error = %other, "Refresh token failed validation");
            invalid()
        }
    })?;

    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(invalid)?;

    refresh::verify_stored_refresh_token(token, user.refresh_token_hash.as_deref())?;

    let access_token = jwt::issue_access_token(user.id, state.access_secret())?;

    tracing::debug!(user_id = %user.id, "Access token refreshed");

    Ok(Json(RefreshResponse {
        access_token,
        user: UserProfile::from(&user),
    }))
}

/// Log out: revoke the stored refresh token and expire the cookie
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<(SetCookie, Json<MessageResponse>)> {
    User::clear_refresh_token(&state.db, auth.user_id).await?;

    tracing::info!(user_id = %auth.user_id, "User logged out");

    Ok((
        [(header::SET_COOKIE, clear_refresh_cookie(state.production()))],
        Json(MessageResponse {
            message: "Logout successful".to_string(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_normalizes() {
        let mut req = RegisterRequest {
            email: "  Jane@Example.COM ".to_string(),
            password: "secret1".to_string(),
            name: "  Jane  ".to_string(),
        };
        req.normalize();

        assert_eq!(req.email, "jane@example.com");
        assert_eq!(req.name, "Jane");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_register_request_rules() {
        let req = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "12345".to_string(),
            name: "J".to_string(),
        };

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("name"));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let req: RegisterRequest = serde_json::from_str(r#"{"email":"a@b.co"}"#).unwrap();
        assert!(req.password.is_empty());
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_login_requires_password() {
        let req = LoginRequest {
            email: "jane@example.com".to_string(),
            password: String::new(),
        };
        assert!(req.validate().unwrap_err().field_errors().contains_key("password"));
    }

    #[test]
    fn test_auth_response_is_camel_case() {
        let response = AuthResponse {
            message: "Login successful".to_string(),
            user: UserProfile {
                id: uuid::Uuid::nil(),
                email: "jane@example.com".to_string(),
                name: "Jane".to_string(),
            },
            access_token: "token".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["accessToken"], "token");
        assert!(json.get("access_token").is_none());
    }
}
