use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use time::OffsetDateTime;

use crate::domain::errors::GameError;
use crate::domain::{Decision, GameId, Player, TurnPlayer, TurnSnapshot, User, UserId};

/// Seats per game.
pub const PLAYERS: usize = 2;

/// Lifecycle of a game.
///
/// Moves forward only: `WaitingToStart -> Playing -> Finished`, with
/// `Canceled` reachable from the first two. `Finished` and `Canceled` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    WaitingToStart,
    Playing,
    Finished,
    Canceled,
}

impl GameStatus {
    /// Stable storage name.
    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::WaitingToStart => "WAITING_TO_START",
            GameStatus::Playing => "PLAYING",
            GameStatus::Finished => "FINISHED",
            GameStatus::Canceled => "CANCELED",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Finished | GameStatus::Canceled)
    }
}

impl Display for GameStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameStatus {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING_TO_START" => Ok(GameStatus::WaitingToStart),
            "PLAYING" => Ok(GameStatus::Playing),
            "FINISHED" => Ok(GameStatus::Finished),
            "CANCELED" => Ok(GameStatus::Canceled),
            other => Err(GameError::ParseStatus(other.to_string())),
        }
    }
}

/// In-memory state machine for one match.
///
/// A `Game` is a plain value: it does no locking and no I/O. Callers that
/// share a game across requests must persist it with a conditional write
/// (see [`GameRepo`](crate::repos::games::GameRepo)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    id: Option<GameId>,
    status: GameStatus,
    turns_count: u32,
    current_turn_index: u32,
    players: Vec<Player>,
}

impl Game {
    /// A fresh game with no seats taken and no id yet.
    pub fn new(turns_count: u32) -> Self {
        Self::restore(None, GameStatus::WaitingToStart, turns_count, 0, Vec::new())
    }

    /// Rebuild a game from persisted fields.
    pub fn restore(
        id: Option<GameId>,
        status: GameStatus,
        turns_count: u32,
        current_turn_index: u32,
        players: Vec<Player>,
    ) -> Self {
        Self {
            id,
            status,
            turns_count,
            current_turn_index,
            players,
        }
    }

    pub fn id(&self) -> Option<GameId> {
        self.id
    }

    /// Returns a copy carrying `id`. Used by the game store on insert.
    pub fn with_id(mut self, id: GameId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn turns_count(&self) -> u32 {
        self.turns_count
    }

    /// Rounds completed so far.
    pub fn current_turn_index(&self) -> u32 {
        self.current_turn_index
    }

    /// Seated players in join order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, user_id: UserId) -> Option<&Player> {
        self.players.iter().find(|p| p.user_id() == user_id)
    }

    pub fn has_player(&self, user_id: UserId) -> bool {
        self.player(user_id).is_some()
    }

    /// Seat `user`. The second seat starts the game.
    ///
    /// Only the status is checked: the caller must not admit a third player
    /// into a game that somehow is still waiting with two seats taken.
    pub fn add_player(&mut self, user: &User) -> Result<(), GameError> {
        if self.status != GameStatus::WaitingToStart {
            return Err(GameError::InvalidState {
                status: self.status,
            });
        }

        self.players.push(Player::new(user.id, user.login.clone()));
        if self.players.len() == PLAYERS {
            self.status = GameStatus::Playing;
        }
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.current_turn_index >= self.turns_count || self.status.is_terminal()
    }

    /// Cancel unless already finished. Calling it again is a no-op.
    pub fn cancel(&mut self) {
        if !self.is_finished() {
            self.status = GameStatus::Canceled;
        }
    }

    pub fn have_decision_of_every_player(&self) -> bool {
        self.players.iter().all(|p| p.decision().is_some())
    }

    /// Record `decision` for the round in progress.
    ///
    /// An unknown `user_id` matches no seat and is silently ignored; use
    /// [`Game::has_player`] first when that must be an error.
    pub fn set_player_decision(
        &mut self,
        user_id: UserId,
        decision: Decision,
    ) -> Result<(), GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::InvalidState {
                status: self.status,
            });
        }

        for player in self.players.iter_mut().filter(|p| p.user_id() == user_id) {
            if let Some(existing) = player.decision() {
                return Err(GameError::AlreadyDecided { decision: existing });
            }
            player.set_decision(decision);
        }
        Ok(())
    }

    /// Resolve the round in progress, stamped with the current UTC time.
    pub fn finish_turn(&mut self) -> Result<TurnSnapshot, GameError> {
        self.finish_turn_at(OffsetDateTime::now_utc())
    }

    /// Resolve the round in progress.
    ///
    /// Scores the winner (if any), snapshots both seats, clears decisions and
    /// advances the turn counter, moving to `Finished` on the last round.
    /// A game that [`is_finished`](Game::is_finished) has no round to resolve.
    pub fn finish_turn_at(
        &mut self,
        finished_at: OffsetDateTime,
    ) -> Result<TurnSnapshot, GameError> {
        if self.players.len() != PLAYERS {
            return Err(GameError::TwoPlayersRequired {
                found: self.players.len(),
            });
        }
        // Keeps current_turn_index <= turns_count and terminal states terminal.
        if self.is_finished() {
            return Err(GameError::InvalidState {
                status: self.status,
            });
        }
        let decisions = match (self.players[0].decision(), self.players[1].decision()) {
            (Some(first), Some(second)) => [first, second],
            _ => return Err(GameError::IncompleteRound),
        };

        let mut winner_id = None;
        for (i, player) in self.players.iter_mut().enumerate() {
            if decisions[i].beats(decisions[1 - i]) {
                player.record_win();
                winner_id = Some(player.user_id());
            }
        }

        let turn_players = self
            .players
            .iter()
            .zip(decisions)
            .map(|(p, decision)| TurnPlayer::new(p.user_id(), p.name(), decision, p.score()))
            .collect();
        let snapshot = TurnSnapshot::new(
            self.id,
            self.current_turn_index,
            winner_id,
            finished_at,
            turn_players,
        );

        for player in &mut self.players {
            player.clear_decision();
        }
        self.current_turn_index += 1;
        if self.current_turn_index == self.turns_count {
            self.status = GameStatus::Finished;
        }

        Ok(snapshot)
    }
}
