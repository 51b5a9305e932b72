/// Database migration runner
///
/// Migrations live in `migrations/` at the workspace root and are embedded at
/// compile time with `sqlx::migrate!`. Each migration is a reversible pair:
/// - `{version}_{name}.up.sql`
/// - `{version}_{name}.down.sql`
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskdeck_shared::db::migrations::{get_migration_status, run_migrations};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::new(std::env::var("DATABASE_URL")?, 5)).await?;
/// run_migrations(&pool).await?;
///
/// let status = get_migration_status(&pool).await?;
/// println!("Applied {} migrations", status.applied_migrations);
/// # Ok(())
/// # }
/// ```

use sqlx::{migrate::Migrator, postgres::PgPool};
use tracing::{debug, info, warn};

/// Migrations embedded from the workspace `migrations/` directory
pub static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// Migration status information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Number of migrations that have been applied
    pub applied_migrations: usize,

    /// Number of migrations embedded in this build
    pub known_migrations: usize,

    /// Latest applied migration version
    pub latest_version: Option<i64>,
}

impl MigrationStatus {
    /// Whether every embedded migration has been applied
    pub fn is_up_to_date(&self) -> bool {
        self.applied_migrations >= self.known_migrations
    }
}

/// Number of "up" migrations embedded in this build
pub fn known_migration_count() -> usize {
    MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .count()
}

/// Runs all pending migrations
///
/// # Errors
///
/// Returns an error if a migration fails or an applied migration's checksum
/// no longer matches the embedded file.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!(known = known_migration_count(), "Starting database migrations");

    match MIGRATOR.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Migration failed");
            Err(e)
        }
    }
}

/// Gets the current migration status
pub async fn get_migration_status(pool: &PgPool) -> Result<MigrationStatus, sqlx::Error> {
    debug!("Checking migration status");

    let table_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = current_schema()
            AND table_name = '_sqlx_migrations'
        )",
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        debug!("Migrations table does not exist yet");
        return Ok(MigrationStatus {
            applied_migrations: 0,
            known_migrations: known_migration_count(),
            latest_version: None,
        });
    }

    let (count, latest_version): (i64, Option<i64>) = sqlx::query_as(
        "SELECT COUNT(*), MAX(version)
         FROM _sqlx_migrations
         WHERE success = true",
    )
    .fetch_one(pool)
    .await?;

    Ok(MigrationStatus {
        applied_migrations: count as usize,
        known_migrations: known_migration_count(),
        latest_version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_migrations() {
        // users + tasks
        assert_eq!(known_migration_count(), 2);
    }

    #[test]
    fn test_migration_status_up_to_date() {
        let status = MigrationStatus {
            applied_migrations: 2,
            known_migrations: 2,
            latest_version: Some(20250101000002),
        };
        assert!(status.is_up_to_date());

        let behind = MigrationStatus {
            applied_migrations: 1,
            ..status
        };
        assert!(!behind.is_up_to_date());
    }
}
