/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use taskdeck_api::{app::{build_router, AppState}, config::Config};
/// use taskdeck_shared::db::pool::create_pool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(config.database.pool_config()).await?;
/// let app = build_router(AppState::new(pool, config));
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    error::ApiError,
    middleware::{auth::jwt_auth_layer, security::SecurityHeadersLayer},
    routes,
};
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::{sync::Arc, time::Duration};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned per request by the `State` extractor; the config sits behind an
/// `Arc` and `PgPool` is already reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Secret for signing and checking access tokens
    pub fn access_secret(&self) -> &str {
        &self.config.jwt.access_secret
    }

    /// Secret for signing and checking refresh tokens
    pub fn refresh_secret(&self) -> &str {
        &self.config.jwt.refresh_secret
    }

    /// Whether cookies must be marked Secure
    pub fn production(&self) -> bool {
        self.config.api.production
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET    /health
/// ├── /auth
/// │   ├── POST /register
/// │   ├── POST /login
/// │   ├── POST /refresh            (refreshToken cookie)
/// │   └── POST /logout             (bearer)
/// └── /tasks                       (bearer)
///     ├── GET    /                 ?page&limit&status&search
///     ├── POST   /
///     ├── GET    /:id
///     ├── PATCH  /:id
///     ├── DELETE /:id
///     └── PATCH  /:id/toggle
/// ```
///
/// Bearer checks are attached with `route_layer`, so unknown paths under a
/// protected prefix still answer 404.
pub fn build_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh))
        .merge(
            Router::new()
                .route("/logout", post(routes::auth::logout))
                .route_layer(from_fn_with_state(state.clone(), jwt_auth_layer)),
        );

    let task_routes = Router::new()
        .route(
            "/",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/:id",
            get(routes::tasks::get_task)
                .patch(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route("/:id/toggle", patch(routes::tasks::toggle_task))
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_layer));

    let cors = cors_layer(&state.config.api.cors_origins);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/auth", auth_routes)
        .nest("/tasks", task_routes)
        .fallback(route_not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.production()))
        .with_state(state)
}

/// CORS for the browser frontend
///
/// Credentials are always allowed since the refresh token is a cookie.
/// `*` mirrors the request origin instead of sending a literal wildcard,
/// which browsers reject alongside credentials.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::very_permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
