//! Turn store contract and its SeaORM implementation.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::adapters::game_turns_sea as turns_adapter;
use crate::domain::{GameId, TurnSnapshot};
use crate::errors::domain::DomainError;
use crate::repos::require_limit;

/// Append-only history of resolved rounds.
#[async_trait]
pub trait TurnRepo: Send + Sync {
    /// Store a snapshot. `Validation` if it belongs to no stored game,
    /// `Conflict(DuplicateTurn)` if its (game, turn index) is taken.
    async fn insert(&self, turn: &TurnSnapshot) -> Result<(), DomainError>;

    /// Up to `limit` snapshots of `game_id`, most recent first.
    async fn get_last_turns(
        &self,
        game_id: GameId,
        limit: u64,
    ) -> Result<Vec<TurnSnapshot>, DomainError>;
}

pub(crate) fn require_game_id(turn: &TurnSnapshot) -> Result<GameId, DomainError> {
    turn.game_id().ok_or_else(|| {
        DomainError::validation("Turn snapshot was produced by a game that was never stored")
    })
}

/// SeaORM implementation of TurnRepo.
#[derive(Debug, Clone)]
pub struct TurnRepoSea {
    db: DatabaseConnection,
}

impl TurnRepoSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TurnRepo for TurnRepoSea {
    async fn insert(&self, turn: &TurnSnapshot) -> Result<(), DomainError> {
        let game_id = require_game_id(turn)?;
        turns_adapter::insert_turn(&self.db, game_id, turn).await?;
        Ok(())
    }

    async fn get_last_turns(
        &self,
        game_id: GameId,
        limit: u64,
    ) -> Result<Vec<TurnSnapshot>, DomainError> {
        require_limit(limit, "get_last_turns")?;
        let rows = turns_adapter::find_last(&self.db, game_id, limit).await?;
        rows.into_iter()
            .map(|row| turns_adapter::into_domain(row).map_err(DomainError::from))
            .collect()
    }
}
