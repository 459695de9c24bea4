use thiserror::Error;

use crate::domain::{Decision, GameStatus};

/// Rule violations raised by the game state machine.
///
/// Every variant is returned before any field of the game is touched, so a
/// failed call leaves the game exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The current status forbids the operation.
    #[error("operation not allowed while game is {status}")]
    InvalidState { status: GameStatus },
    /// The player already picked for this round.
    #[error("player already decided {decision} this round")]
    AlreadyDecided { decision: Decision },
    /// A round can only be resolved between exactly two players.
    #[error("two players required to finish a turn, found {found}")]
    TwoPlayersRequired { found: usize },
    /// At least one player has not decided yet.
    #[error("all players must decide before the turn can finish")]
    IncompleteRound,
    #[error("unknown decision: {0}")]
    ParseDecision(String),
    #[error("unknown game status: {0}")]
    ParseStatus(String),
}
