/// Access token middleware
///
/// Protected routes run behind [`jwt_auth_layer`]. On success the request
/// gains an [`AuthContext`] extension which handlers read with
/// `Extension<AuthContext>`; on failure the request never reaches the
/// handler and the client gets a 401 with one of:
///
/// - `Access token required`
/// - `Access token expired`
/// - `Invalid access token`

use crate::{app::AppState, error::ApiError};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use taskdeck_shared::auth::middleware::authenticate_bearer;

/// Validates the bearer access token and attaches the caller's identity
pub async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = authenticate_bearer(req.headers(), state.access_secret())?;

    tracing::Span::current().record("user_id", tracing::field::display(auth.user_id));
    req.extensions_mut().insert(auth);

    Ok(next.run(req).await)
}
