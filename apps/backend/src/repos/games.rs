//! Game store contract and its SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::debug;

use crate::adapters::game_turns_sea as turns_adapter;
use crate::adapters::games_sea as games_adapter;
use crate::domain::{Game, GameId, GameStatus, TurnSnapshot};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::require_limit;
use crate::repos::turns::require_game_id;

/// Persistence of games.
///
/// `update` is a blind full replace. Callers that race on a game go through
/// one of the conditional writes, which report a lost race as `Ok(false)`.
#[async_trait]
pub trait GameRepo: Send + Sync {
    /// Store a copy of `game`, assigning an id if it has none.
    async fn insert(&self, game: &Game) -> Result<Game, DomainError>;

    async fn find_by_id(&self, game_id: GameId) -> Result<Option<Game>, DomainError>;

    /// Full replace. `Validation` if the game has no id, `NotFound` if no
    /// stored game has it.
    async fn update(&self, game: &Game) -> Result<(), DomainError>;

    /// Up to `limit` games still waiting for players, oldest first.
    async fn find_waiting_to_start(&self, limit: u64) -> Result<Vec<Game>, DomainError>;

    /// Replace the stored game only if its stored status is still
    /// `WaitingToStart`. `Ok(false)` means another writer got there first
    /// (or the game has no id).
    async fn try_update_waiting_to_start(&self, game: &Game) -> Result<bool, DomainError>;

    /// Replace the stored game with `game` only if it still holds the state
    /// of `expected`, the copy `game` was derived from. `Ok(false)` on a
    /// mismatch or when the game has no id.
    async fn try_replace(&self, expected: &Game, game: &Game) -> Result<bool, DomainError>;

    /// [`try_replace`](GameRepo::try_replace) and append `turn` as one
    /// atomic write: either both land or neither does.
    async fn record_turn(
        &self,
        expected: &Game,
        game: &Game,
        turn: &TurnSnapshot,
    ) -> Result<bool, DomainError>;
}

/// Find game by ID or return a `NotFound(Game)` error.
pub async fn require_game<R: GameRepo + ?Sized>(
    repo: &R,
    game_id: GameId,
) -> Result<Game, DomainError> {
    repo.find_by_id(game_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
    })
}

pub(crate) fn require_id(game: &Game) -> Result<GameId, DomainError> {
    game.id()
        .ok_or_else(|| DomainError::validation("Game must have an id to be updated"))
}

/// The turn must have been produced by `game_id`.
pub(crate) fn require_turn_of(turn: &TurnSnapshot, game_id: GameId) -> Result<(), DomainError> {
    if require_game_id(turn)? != game_id {
        return Err(DomainError::validation(format!(
            "Turn {} does not belong to game {game_id}",
            turn.turn_index()
        )));
    }
    Ok(())
}

/// SeaORM implementation of GameRepo.
#[derive(Debug, Clone)]
pub struct GameRepoSea {
    db: DatabaseConnection,
}

impl GameRepoSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GameRepo for GameRepoSea {
    async fn insert(&self, game: &Game) -> Result<Game, DomainError> {
        let stored = games_adapter::insert_game(&self.db, game).await?;
        debug!(game_id = ?stored.id(), "Inserted game");
        Ok(stored)
    }

    async fn find_by_id(&self, game_id: GameId) -> Result<Option<Game>, DomainError> {
        let row = games_adapter::find_by_id(&self.db, game_id).await?;
        Ok(row.map(games_adapter::into_domain).transpose()?)
    }

    async fn update(&self, game: &Game) -> Result<(), DomainError> {
        let game_id = require_id(game)?;
        games_adapter::replace_game(&self.db, game_id, game).await?;
        Ok(())
    }

    async fn find_waiting_to_start(&self, limit: u64) -> Result<Vec<Game>, DomainError> {
        require_limit(limit, "find_waiting_to_start")?;
        let rows = games_adapter::find_by_status(
            &self.db,
            GameStatus::WaitingToStart.into(),
            limit,
        )
        .await?;
        rows.into_iter()
            .map(|row| games_adapter::into_domain(row).map_err(DomainError::from))
            .collect()
    }

    async fn try_update_waiting_to_start(&self, game: &Game) -> Result<bool, DomainError> {
        let Some(game_id) = game.id() else {
            return Ok(false);
        };
        let swapped = games_adapter::replace_if_status(
            &self.db,
            game_id,
            game,
            GameStatus::WaitingToStart.into(),
        )
        .await?;
        Ok(swapped)
    }

    async fn try_replace(&self, expected: &Game, game: &Game) -> Result<bool, DomainError> {
        let Some(game_id) = game.id() else {
            return Ok(false);
        };
        let swapped =
            games_adapter::replace_if_unchanged(&self.db, game_id, expected, game).await?;
        Ok(swapped)
    }

    async fn record_turn(
        &self,
        expected: &Game,
        game: &Game,
        turn: &TurnSnapshot,
    ) -> Result<bool, DomainError> {
        let Some(game_id) = game.id() else {
            return Ok(false);
        };
        require_turn_of(turn, game_id)?;

        // Dropping the transaction on an error path rolls it back.
        let txn = self.db.begin().await?;
        if !games_adapter::replace_if_unchanged(&txn, game_id, expected, game).await? {
            txn.rollback().await?;
            return Ok(false);
        }
        turns_adapter::insert_turn(&txn, game_id, turn).await?;
        txn.commit().await?;

        debug!(%game_id, turn_index = turn.turn_index(), "Recorded turn");
        Ok(true)
    }
}
