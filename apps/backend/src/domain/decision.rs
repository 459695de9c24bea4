use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::domain::errors::GameError;

/// A player's choice for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Rock,
    Paper,
    Scissors,
}

impl Decision {
    pub const ALL: [Decision; 3] = [Decision::Rock, Decision::Paper, Decision::Scissors];

    /// Cyclic dominance: Rock > Scissors > Paper > Rock.
    ///
    /// Equal decisions never beat each other, so a round with identical picks
    /// has no winner.
    pub fn beats(self, other: Decision) -> bool {
        matches!(
            (self, other),
            (Decision::Rock, Decision::Scissors)
                | (Decision::Scissors, Decision::Paper)
                | (Decision::Paper, Decision::Rock)
        )
    }

    /// Stable storage name.
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Rock => "ROCK",
            Decision::Paper => "PAPER",
            Decision::Scissors => "SCISSORS",
        }
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decision {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROCK" => Ok(Decision::Rock),
            "PAPER" => Ok(Decision::Paper),
            "SCISSORS" => Ok(Decision::Scissors),
            other => Err(GameError::ParseDecision(other.to_string())),
        }
    }
}
