use crate::domain::{Decision, UserId};

/// A seat in one game.
///
/// Fields are read-only outside the domain: only [`Game`](crate::domain::Game)
/// records decisions and bumps scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    user_id: UserId,
    name: String,
    decision: Option<Decision>,
    score: u32,
}

impl Player {
    pub(crate) fn new(user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            decision: None,
            score: 0,
        }
    }

    /// Rebuild a player from persisted fields.
    pub fn restore(
        user_id: UserId,
        name: impl Into<String>,
        decision: Option<Decision>,
        score: u32,
    ) -> Self {
        Self {
            user_id,
            name: name.into(),
            decision,
            score,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decision for the round in progress; `None` once the round resolves.
    pub fn decision(&self) -> Option<Decision> {
        self.decision
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn set_decision(&mut self, decision: Decision) {
        self.decision = Some(decision);
    }

    pub(crate) fn clear_decision(&mut self) {
        self.decision = None;
    }

    pub(crate) fn record_win(&mut self) {
        self.score += 1;
    }
}
