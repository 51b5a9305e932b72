/// Configuration management for the API server
///
/// Configuration comes from environment variables. A `.env` file in the
/// working directory is loaded first when present.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 5000)
/// - `APP_ENV`: `production` enables Secure cookies and HSTS (default: development)
/// - `FRONTEND_URL`: Comma-separated allowed CORS origins, `*` for any
///   (default: http://localhost:3000)
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `RUN_MIGRATIONS`: Apply migrations at startup (default: true)
/// - `JWT_ACCESS_SECRET`: Access token signing key, >= 32 chars (required)
/// - `JWT_REFRESH_SECRET`: Refresh token signing key, >= 32 chars (required)
///
/// # Example
///
/// ```no_run
/// use taskdeck_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use std::env;
use taskdeck_shared::db::pool::DatabaseConfig as PoolConfig;

/// Minimum length of each JWT secret
pub const MIN_SECRET_LENGTH: usize = 32;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT configuration
    pub jwt: JwtConfig,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Running in production (HTTPS): Secure cookies, HSTS
    pub production: bool,

    /// Allowed CORS origins
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,

    /// Apply embedded migrations on startup
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Pool settings for this database
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(self.url.clone(), self.max_connections)
    }
}

/// JWT configuration
///
/// Access and refresh tokens use separate secrets.
/// Generate each with: `openssl rand -hex 32`
#[derive(Clone)]
pub struct JwtConfig {
    /// Access token signing secret
    pub access_secret: String,

    /// Refresh token signing secret
    pub refresh_secret: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_secret", &"<redacted>")
            .field("refresh_secret", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing, a value fails to
    /// parse, or a JWT secret is too short.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let required = |key: &str| {
            lookup(key).ok_or_else(|| anyhow::anyhow!("{} environment variable is required", key))
        };

        let host = var_or("API_HOST", "0.0.0.0");
        let port = var_or("API_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("API_PORT is not a valid port: {}", e))?;

        let production = var_or("APP_ENV", "development").eq_ignore_ascii_case("production");

        let cors_origins: Vec<String> = var_or("FRONTEND_URL", "http://localhost:3000")
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let url = required("DATABASE_URL")?;
        let max_connections = var_or("DATABASE_MAX_CONNECTIONS", "10")
            .parse::<u32>()
            .map_err(|e| anyhow::anyhow!("DATABASE_MAX_CONNECTIONS is not a number: {}", e))?;
        let run_migrations = parse_bool(&var_or("RUN_MIGRATIONS", "true"))
            .ok_or_else(|| anyhow::anyhow!("RUN_MIGRATIONS must be true or false"))?;

        let access_secret = required("JWT_ACCESS_SECRET")?;
        let refresh_secret = required("JWT_REFRESH_SECRET")?;

        if access_secret.len() < MIN_SECRET_LENGTH {
            anyhow::bail!("JWT_ACCESS_SECRET must be at least {} characters long", MIN_SECRET_LENGTH);
        }
        if refresh_secret.len() < MIN_SECRET_LENGTH {
            anyhow::bail!("JWT_REFRESH_SECRET must be at least {} characters long", MIN_SECRET_LENGTH);
        }
        if access_secret == refresh_secret {
            anyhow::bail!("JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must differ");
        }

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                production,
                cors_origins,
            },
            database: DatabaseConfig {
                url,
                max_connections,
                run_migrations,
            },
            jwt: JwtConfig {
                access_secret,
                refresh_secret,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
