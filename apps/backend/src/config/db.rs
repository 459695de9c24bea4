use std::env;

use crate::error::AppError;

/// Where the game and turn stores live.
#[derive(Debug, Clone, PartialEq)]
pub enum DbProfile {
    /// Private in-memory SQLite database (one connection, lost on drop)
    InMemory,
    /// SQLite database file, created if missing
    SqliteFile { path: String },
    /// PostgreSQL, configured from environment variables
    Postgres,
}

/// Builds a database URL for the given profile
pub fn db_url(profile: &DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::InMemory => Ok("sqlite::memory:".to_string()),
        DbProfile::SqliteFile { path } => Ok(format!("sqlite://{path}?mode=rwc")),
        DbProfile::Postgres => {
            let host = host();
            let port = port();
            let db_name = must_var("ROSHAMBO_DB")?;
            let username = must_var("ROSHAMBO_DB_USER")?;
            let password = must_var("ROSHAMBO_DB_PASSWORD")?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
    }
}

/// Get database host from environment (defaults to localhost)
fn host() -> String {
    env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string())
}

/// Get database port from environment (defaults to 5432)
fn port() -> String {
    env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string())
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
