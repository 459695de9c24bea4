//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repositories convert here so that higher
//! layers only ever see `DomainError`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

/// Prefix used by adapters for "game row missing" custom errors.
pub const GAME_NOT_FOUND: &str = "GAME_NOT_FOUND:";

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

fn is_unique_violation(msg: &str) -> bool {
    mentions_sqlstate(msg, "23505")
        || msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
}

/// Both backends name the turn uniqueness rule differently:
/// SQLite reports `table.column`, Postgres the index name.
fn is_duplicate_turn(msg: &str) -> bool {
    msg.contains("idx_game_turns_game_turn")
        || msg.contains("game_turns.game_id")
        || msg.contains("game_turns.turn_index")
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::Custom(msg) if msg.starts_with(GAME_NOT_FOUND) => {
            let game_id = msg.trim_start_matches(GAME_NOT_FOUND);
            warn!(game_id, "Game not found");
            return DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"));
        }
        sea_orm::DbErr::Json(detail) => {
            error!(raw_error = %detail, "Stored document failed to decode");
            return DomainError::infra(InfraErrorKind::DataCorruption, "Stored data is corrupt");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if is_unique_violation(&error_msg) {
        warn!(raw_error = %error_msg, "Unique constraint violation");
        if is_duplicate_turn(&error_msg) {
            return DomainError::conflict(
                ConflictKind::DuplicateTurn,
                "Turn already recorded for this game",
            );
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    error!(raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
