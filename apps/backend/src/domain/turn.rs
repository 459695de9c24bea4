use time::OffsetDateTime;

use crate::domain::{Decision, GameId, TurnId, UserId};

/// One player's line in a resolved round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnPlayer {
    user_id: UserId,
    name: String,
    decision: Decision,
    score_after_turn: u32,
}

impl TurnPlayer {
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        decision: Decision,
        score_after_turn: u32,
    ) -> Self {
        Self {
            user_id,
            name: name.into(),
            decision,
            score_after_turn,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    pub fn score_after_turn(&self) -> u32 {
        self.score_after_turn
    }
}

/// Immutable record of one resolved round.
///
/// Produced only by [`Game::finish_turn`](crate::domain::Game::finish_turn) (or
/// rebuilt from storage via [`TurnSnapshot::restore`]); there are no setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSnapshot {
    id: TurnId,
    game_id: Option<GameId>,
    turn_index: u32,
    winner_id: Option<UserId>,
    finished_at: OffsetDateTime,
    players: Vec<TurnPlayer>,
}

impl TurnSnapshot {
    pub(crate) fn new(
        game_id: Option<GameId>,
        turn_index: u32,
        winner_id: Option<UserId>,
        finished_at: OffsetDateTime,
        players: Vec<TurnPlayer>,
    ) -> Self {
        Self::restore(
            uuid::Uuid::new_v4(),
            game_id,
            turn_index,
            winner_id,
            finished_at,
            players,
        )
    }

    /// Rebuild a snapshot from persisted fields.
    pub fn restore(
        id: TurnId,
        game_id: Option<GameId>,
        turn_index: u32,
        winner_id: Option<UserId>,
        finished_at: OffsetDateTime,
        players: Vec<TurnPlayer>,
    ) -> Self {
        Self {
            id,
            game_id,
            turn_index,
            winner_id,
            finished_at,
            players,
        }
    }

    pub fn id(&self) -> TurnId {
        self.id
    }

    /// Owning game; `None` when the game was never stored.
    pub fn game_id(&self) -> Option<GameId> {
        self.game_id
    }

    /// 0-based round number.
    pub fn turn_index(&self) -> u32 {
        self.turn_index
    }

    /// `None` on a tie.
    pub fn winner_id(&self) -> Option<UserId> {
        self.winner_id
    }

    pub fn finished_at(&self) -> OffsetDateTime {
        self.finished_at
    }

    pub fn players(&self) -> &[TurnPlayer] {
        &self.players
    }

    pub fn player(&self, user_id: UserId) -> Option<&TurnPlayer> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    pub fn winner(&self) -> Option<&TurnPlayer> {
        self.winner_id.and_then(|id| self.player(id))
    }
}
