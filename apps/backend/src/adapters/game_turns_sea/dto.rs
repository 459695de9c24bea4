//! Storage schema for the `game_turns.players` column.

use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Decision, TurnPlayer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnPlayerDoc {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "name")]
    pub name: String,
    #[serde(rename = "decision")]
    pub decision: String,
    #[serde(rename = "scoreAfterTurn")]
    pub score_after_turn: u32,
}

impl From<&TurnPlayer> for TurnPlayerDoc {
    fn from(p: &TurnPlayer) -> Self {
        Self {
            user_id: p.user_id(),
            name: p.name().to_string(),
            decision: p.decision().as_str().to_string(),
            score_after_turn: p.score_after_turn(),
        }
    }
}

impl TryFrom<TurnPlayerDoc> for TurnPlayer {
    type Error = DbErr;

    fn try_from(doc: TurnPlayerDoc) -> Result<Self, Self::Error> {
        let decision = doc
            .decision
            .parse::<Decision>()
            .map_err(|e| DbErr::Json(e.to_string()))?;
        Ok(TurnPlayer::new(
            doc.user_id,
            doc.name,
            decision,
            doc.score_after_turn,
        ))
    }
}

pub fn encode_turn_players(players: &[TurnPlayer]) -> Result<String, DbErr> {
    let docs: Vec<TurnPlayerDoc> = players.iter().map(TurnPlayerDoc::from).collect();
    serde_json::to_string(&docs).map_err(|e| DbErr::Json(e.to_string()))
}

pub fn decode_turn_players(raw: &str) -> Result<Vec<TurnPlayer>, DbErr> {
    let docs: Vec<TurnPlayerDoc> =
        serde_json::from_str(raw).map_err(|e| DbErr::Json(e.to_string()))?;
    docs.into_iter().map(TurnPlayer::try_from).collect()
}
