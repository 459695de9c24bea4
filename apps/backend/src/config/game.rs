use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Tunables for game creation and matchmaking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSettings {
    /// Rounds per game when the caller does not choose.
    pub default_turns_count: u32,
    /// How many waiting games one matchmaking pass looks at.
    pub matchmaking_batch: u64,
    /// Lost compare-and-swap races tolerated before opening a new game.
    pub max_join_attempts: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            default_turns_count: 3,
            matchmaking_batch: 10,
            max_join_attempts: 3,
        }
    }
}

impl GameSettings {
    /// Read overrides from `ROSHAMBO_TURNS_COUNT`, `ROSHAMBO_MATCHMAKING_BATCH`
    /// and `ROSHAMBO_MAX_JOIN_ATTEMPTS`; unset variables keep the defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let settings = Self {
            default_turns_count: parse_var("ROSHAMBO_TURNS_COUNT")?
                .unwrap_or(defaults.default_turns_count),
            matchmaking_batch: parse_var("ROSHAMBO_MATCHMAKING_BATCH")?
                .unwrap_or(defaults.matchmaking_batch),
            max_join_attempts: parse_var("ROSHAMBO_MAX_JOIN_ATTEMPTS")?
                .unwrap_or(defaults.max_join_attempts),
        };

        if settings.default_turns_count == 0 {
            return Err(AppError::config("ROSHAMBO_TURNS_COUNT must be at least 1"));
        }
        if settings.matchmaking_batch == 0 {
            return Err(AppError::config("ROSHAMBO_MATCHMAKING_BATCH must be at least 1"));
        }
        if settings.max_join_attempts == 0 {
            return Err(AppError::config("ROSHAMBO_MAX_JOIN_ATTEMPTS must be at least 1"));
        }
        Ok(settings)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|_| {
            AppError::config(format!(
                "Environment variable '{name}' is not a valid number: '{raw}'"
            ))
        }),
        Err(_) => Ok(None),
    }
}
