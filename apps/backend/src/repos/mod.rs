//! Repository contracts the game core relies on, plus their implementations.
//!
//! `*Sea` types persist through SeaORM; `memory` keeps everything in process
//! with the same semantics.

pub mod games;
pub mod memory;
pub mod turns;

pub use games::{GameRepo, GameRepoSea};
pub use memory::{InMemoryGameRepo, InMemoryTurnRepo};
pub use turns::{TurnRepo, TurnRepoSea};

use crate::errors::domain::DomainError;

/// Shared guard for `limit` arguments.
pub(crate) fn require_limit(limit: u64, what: &str) -> Result<(), DomainError> {
    if limit == 0 {
        return Err(DomainError::validation(format!(
            "{what}: limit must be positive"
        )));
    }
    Ok(())
}
