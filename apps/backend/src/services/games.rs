//! Matchmaking and round flow on top of the game and turn stores.
//!
//! Every operation follows the same shape: load, mutate the in-memory
//! [`Game`], write back conditionally. A write that finds the stored game
//! changed since the load stores nothing and reports `Conflict(LostRace)`
//! (or, during matchmaking, moves on to the next candidate).

use tracing::{debug, info, warn};

use crate::config::game::GameSettings;
use crate::domain::{Decision, Game, GameId, TurnSnapshot, User, UserId};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::games::{require_game, GameRepo};
use crate::repos::turns::TurnRepo;

/// Result of [`GameService::submit_decision`].
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionOutcome {
    /// Decision stored; the opponent has not decided yet.
    Waiting(Game),
    /// Both decisions were in and the round was resolved and recorded.
    TurnFinished { game: Game, turn: TurnSnapshot },
}

impl DecisionOutcome {
    pub fn game(&self) -> &Game {
        match self {
            DecisionOutcome::Waiting(game) => game,
            DecisionOutcome::TurnFinished { game, .. } => game,
        }
    }
}

pub struct GameService<G, T> {
    games: G,
    turns: T,
    settings: GameSettings,
}

impl<G: GameRepo, T: TurnRepo> GameService<G, T> {
    /// `turns` must read the storage `games.record_turn` writes to.
    pub fn new(games: G, turns: T, settings: GameSettings) -> Self {
        Self {
            games,
            turns,
            settings,
        }
    }

    pub fn games(&self) -> &G {
        &self.games
    }

    pub fn turns(&self) -> &T {
        &self.turns
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Store a fresh, empty game.
    pub async fn create_game(&self, turns_count: u32) -> Result<Game, DomainError> {
        require_turns(turns_count)?;
        let game = self.games.insert(&Game::new(turns_count)).await?;
        info!(game_id = ?game.id(), turns_count, "Created game");
        Ok(game)
    }

    /// Seat `user` in a waiting game of the same length, or open a new one.
    ///
    /// Candidates come oldest first. Losing the conditional write to another
    /// joiner moves on to the next candidate; after `max_join_attempts` lost
    /// races the user gets a new game instead.
    pub async fn find_or_create_game(
        &self,
        user: &User,
        turns_count: u32,
    ) -> Result<Game, DomainError> {
        require_turns(turns_count)?;
        let candidates = self
            .games
            .find_waiting_to_start(self.settings.matchmaking_batch)
            .await?;
        debug!(
            user_id = %user.id,
            candidates = candidates.len(),
            "Looking for a waiting game"
        );

        let mut lost_races = 0u32;
        for mut game in candidates {
            if lost_races >= self.settings.max_join_attempts {
                break;
            }
            if game.turns_count() != turns_count || game.has_player(user.id) {
                continue;
            }

            game.add_player(user)?;
            if self.games.try_update_waiting_to_start(&game).await? {
                info!(
                    game_id = ?game.id(),
                    user_id = %user.id,
                    status = %game.status(),
                    "Joined waiting game"
                );
                return Ok(game);
            }

            lost_races += 1;
            warn!(
                game_id = ?game.id(),
                user_id = %user.id,
                lost_races,
                "Lost race for waiting game"
            );
        }

        let mut game = Game::new(turns_count);
        game.add_player(user)?;
        let game = self.games.insert(&game).await?;
        info!(
            game_id = ?game.id(),
            user_id = %user.id,
            turns_count,
            "Opened new game"
        );
        Ok(game)
    }

    /// [`find_or_create_game`](Self::find_or_create_game) with the configured
    /// default game length.
    pub async fn quick_match(&self, user: &User) -> Result<Game, DomainError> {
        self.find_or_create_game(user, self.settings.default_turns_count)
            .await
    }

    /// Seat `user` in a specific waiting game.
    ///
    /// Fails with `Conflict(LostRace)` when the game left `WaitingToStart`
    /// between the read and the conditional write.
    pub async fn join_game(&self, game_id: GameId, user: &User) -> Result<Game, DomainError> {
        let mut game = require_game(&self.games, game_id).await?;
        if game.has_player(user.id) {
            debug!(%game_id, user_id = %user.id, "User already seated");
            return Ok(game);
        }

        game.add_player(user)?;
        if !self.games.try_update_waiting_to_start(&game).await? {
            warn!(%game_id, user_id = %user.id, "Lost race for waiting game");
            return Err(DomainError::conflict(
                ConflictKind::LostRace,
                format!("Game {game_id} is no longer waiting for players"),
            ));
        }
        info!(%game_id, user_id = %user.id, status = %game.status(), "Joined game");
        Ok(game)
    }

    /// Record `user_id`'s decision for the round in progress and resolve the
    /// round once both players have decided.
    ///
    /// The write is conditional on the game being unchanged since it was
    /// read; otherwise nothing is stored and the caller gets
    /// `Conflict(LostRace)` and may resubmit. A resolved round is stored
    /// together with the game in one atomic write.
    pub async fn submit_decision(
        &self,
        game_id: GameId,
        user_id: UserId,
        decision: Decision,
    ) -> Result<DecisionOutcome, DomainError> {
        let read = require_game(&self.games, game_id).await?;
        if !read.has_player(user_id) {
            return Err(DomainError::not_found(
                NotFoundKind::Player,
                format!("User {user_id} is not seated in game {game_id}"),
            ));
        }

        let mut game = read.clone();
        game.set_player_decision(user_id, decision)?;

        if !game.have_decision_of_every_player() {
            if !self.games.try_replace(&read, &game).await? {
                return Err(lost_race(game_id, user_id));
            }
            debug!(%game_id, %user_id, %decision, "Decision recorded");
            return Ok(DecisionOutcome::Waiting(game));
        }

        let turn = game.finish_turn()?;
        if !self.games.record_turn(&read, &game, &turn).await? {
            return Err(lost_race(game_id, user_id));
        }
        info!(
            %game_id,
            turn_index = turn.turn_index(),
            winner_id = ?turn.winner_id(),
            status = %game.status(),
            "Turn finished"
        );
        if game.is_finished() {
            info!(%game_id, "Game finished");
        }
        Ok(DecisionOutcome::TurnFinished { game, turn })
    }

    /// Cancel a game. Finished games are returned unchanged.
    pub async fn cancel_game(&self, game_id: GameId) -> Result<Game, DomainError> {
        let read = require_game(&self.games, game_id).await?;
        let mut game = read.clone();
        game.cancel();
        if game.status() != read.status() {
            if !self.games.try_replace(&read, &game).await? {
                warn!(%game_id, "Game changed while canceling");
                return Err(DomainError::conflict(
                    ConflictKind::LostRace,
                    format!("Game {game_id} changed while canceling"),
                ));
            }
            info!(%game_id, from = %read.status(), "Game canceled");
        }
        Ok(game)
    }

    /// Most recent turns of `game_id`, newest first.
    pub async fn last_turns(
        &self,
        game_id: GameId,
        limit: u64,
    ) -> Result<Vec<TurnSnapshot>, DomainError> {
        require_game(&self.games, game_id).await?;
        self.turns.get_last_turns(game_id, limit).await
    }
}

fn require_turns(turns_count: u32) -> Result<(), DomainError> {
    if turns_count == 0 {
        return Err(DomainError::validation("turns_count must be at least 1"));
    }
    Ok(())
}

fn lost_race(game_id: GameId, user_id: UserId) -> DomainError {
    warn!(%game_id, %user_id, "Game changed since it was read");
    DomainError::conflict(
        ConflictKind::LostRace,
        format!("Game {game_id} changed since it was read"),
    )
}
