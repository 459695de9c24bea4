//! In-process repositories.
//!
//! Same contract as the SeaORM implementations. Games and turns live behind
//! one `parking_lot::Mutex`, so every write (including `record_turn`, which
//! touches both) happens under a single lock acquisition.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::domain::{Game, GameId, GameStatus, TurnSnapshot};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::games::{require_id, require_turn_of, GameRepo};
use crate::repos::require_limit;
use crate::repos::turns::{require_game_id, TurnRepo};

#[derive(Debug, Default)]
struct Tables {
    /// Insertion order, which doubles as "oldest first".
    games: Vec<Game>,
    turns: Vec<TurnSnapshot>,
}

impl Tables {
    fn game_mut(&mut self, game_id: GameId) -> Option<&mut Game> {
        self.games.iter_mut().find(|g| g.id() == Some(game_id))
    }

    fn push_turn(&mut self, game_id: GameId, turn: &TurnSnapshot) -> Result<(), DomainError> {
        if self
            .turns
            .iter()
            .any(|t| t.game_id() == Some(game_id) && t.turn_index() == turn.turn_index())
        {
            return Err(DomainError::conflict(
                ConflictKind::DuplicateTurn,
                "Turn already recorded for this game",
            ));
        }
        self.turns.push(turn.clone());
        Ok(())
    }
}

/// Game store. Pair it with [`InMemoryGameRepo::turn_repo`] so turns written
/// by `record_turn` are visible to the turn store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGameRepo {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryGameRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// A turn store over the same tables.
    pub fn turn_repo(&self) -> InMemoryTurnRepo {
        InMemoryTurnRepo {
            tables: Arc::clone(&self.tables),
        }
    }

    pub fn len(&self) -> usize {
        self.tables.lock().games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.lock().games.is_empty()
    }
}

#[async_trait]
impl GameRepo for InMemoryGameRepo {
    async fn insert(&self, game: &Game) -> Result<Game, DomainError> {
        let stored = game.clone().with_id(game.id().unwrap_or_else(Uuid::new_v4));
        let mut tables = self.tables.lock();
        if tables.games.iter().any(|g| g.id() == stored.id()) {
            return Err(DomainError::conflict(
                ConflictKind::Other("DuplicateGame".into()),
                "Game id already stored",
            ));
        }
        tables.games.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, game_id: GameId) -> Result<Option<Game>, DomainError> {
        let tables = self.tables.lock();
        Ok(tables.games.iter().find(|g| g.id() == Some(game_id)).cloned())
    }

    async fn update(&self, game: &Game) -> Result<(), DomainError> {
        let game_id = require_id(game)?;
        let mut tables = self.tables.lock();
        let slot = tables.game_mut(game_id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
        })?;
        *slot = game.clone();
        Ok(())
    }

    async fn find_waiting_to_start(&self, limit: u64) -> Result<Vec<Game>, DomainError> {
        require_limit(limit, "find_waiting_to_start")?;
        let tables = self.tables.lock();
        Ok(tables
            .games
            .iter()
            .filter(|g| g.status() == GameStatus::WaitingToStart)
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn try_update_waiting_to_start(&self, game: &Game) -> Result<bool, DomainError> {
        let Some(game_id) = game.id() else {
            return Ok(false);
        };
        let mut tables = self.tables.lock();
        match tables.game_mut(game_id) {
            Some(slot) if slot.status() == GameStatus::WaitingToStart => {
                *slot = game.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn try_replace(&self, expected: &Game, game: &Game) -> Result<bool, DomainError> {
        let Some(game_id) = game.id() else {
            return Ok(false);
        };
        let mut tables = self.tables.lock();
        let Some(slot) = tables.game_mut(game_id) else {
            return Ok(false);
        };
        if !same_state(slot, expected) {
            return Ok(false);
        }
        *slot = game.clone();
        Ok(true)
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

        let mut tables = self.tables.lock();
        if !tables
            .game_mut(game_id)
            .is_some_and(|slot| same_state(slot, expected))
        {
            return Ok(false);
        }
        tables.push_turn(game_id, turn)?;
        if let Some(slot) = tables.game_mut(game_id) {
            *slot = game.clone();
        }
        Ok(true)
    }
}

/// The columns the SQL compare-and-swap matches on.
fn same_state(stored: &Game, expected: &Game) -> bool {
    stored.status() == expected.status()
        && stored.current_turn_index() == expected.current_turn_index()
        && stored.players() == expected.players()
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryTurnRepo {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryTurnRepo {
    /// A turn store with its own tables. Use
    /// [`InMemoryGameRepo::turn_repo`] to share them with a game store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TurnRepo for InMemoryTurnRepo {
    async fn insert(&self, turn: &TurnSnapshot) -> Result<(), DomainError> {
        let game_id = require_game_id(turn)?;
        self.tables.lock().push_turn(game_id, turn)
    }

    async fn get_last_turns(
        &self,
        game_id: GameId,
        limit: u64,
    ) -> Result<Vec<TurnSnapshot>, DomainError> {
        require_limit(limit, "get_last_turns")?;
        let tables = self.tables.lock();
        let mut found: Vec<TurnSnapshot> = tables
            .turns
            .iter()
            .filter(|t| t.game_id() == Some(game_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.turn_index().cmp(&a.turn_index()));
        found.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(found)
    }
}
