use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;

/// Connect to the database described by `profile` and bring the schema up
/// to date.
pub async fn connect_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let conn = connect_without_migrations(&profile).await?;
    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::db("failed to apply migrations", e))?;
    info!(?profile, "database ready");
    Ok(conn)
}

/// Open a pool without touching the schema (used by the migration CLI).
pub async fn connect_without_migrations(
    profile: &DbProfile,
) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile)?;

    let mut opt = ConnectOptions::new(url);
    opt.acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    // Every SQLite in-memory connection is its own database: pin the pool to
    // one long-lived connection so all callers see the same tables.
    if matches!(profile, DbProfile::InMemory) {
        opt.min_connections(1)
            .max_connections(1)
            .idle_timeout(Duration::from_secs(u32::MAX as u64))
            .max_lifetime(Duration::from_secs(u32::MAX as u64));
    }

    Database::connect(opt)
        .await
        .map_err(|e| AppError::db(format!("failed to connect ({profile:?})"), e))
}
