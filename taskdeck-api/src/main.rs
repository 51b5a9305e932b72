//! # Taskdeck API Server
//!
//! Serves the task-tracking REST API.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/taskdeck \
//! JWT_ACCESS_SECRET=$(openssl rand -hex 32) \
//! JWT_REFRESH_SECRET=$(openssl rand -hex 32) \
//! cargo run -p taskdeck-api
//! ```
//!
//! Set `LOG_FORMAT=json` for JSON log lines and `RUST_LOG` to override the
//! default filter.

use taskdeck_api::{
    app::{build_router, AppState},
    config::Config,
};
use taskdeck_shared::db::{
    migrations::{get_migration_status, run_migrations},
    pool::{close_pool, create_pool},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env may hold RUST_LOG/LOG_FORMAT, load it before the subscriber
    dotenvy::dotenv().ok();
    init_tracing();

    tracing::info!(
        "Taskdeck API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = create_pool(config.database.pool_config()).await?;

    if config.database.run_migrations {
        run_migrations(&pool).await?;
    }

    let status = get_migration_status(&pool).await?;
    if status.is_up_to_date() {
        tracing::info!(applied = status.applied_migrations, "Database schema is up to date");
    } else {
        tracing::warn!(
            applied = status.applied_migrations,
            known = status.known_migrations,
            "Database schema is behind; set RUN_MIGRATIONS=true or migrate manually"
        );
    }

    let addr = config.bind_address();
    let production = config.api.production;
    let app = build_router(AppState::new(pool.clone(), config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(production, "Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(pool).await;
    tracing::info!("Server stopped");

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "taskdeck_api=debug,taskdeck_shared=info,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
}
