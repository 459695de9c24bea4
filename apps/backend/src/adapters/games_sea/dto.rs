//! Storage schema for the `games.players` column.
//!
//! The column holds a JSON array; each element is a [`PlayerDoc`]. Field names
//! are fixed here rather than derived from the domain types so the stored
//! format survives refactors of `domain::Player`.

use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Decision, Player};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDoc {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "name")]
    pub name: String,
    /// Storage name of the pending decision (`"ROCK"`, ...), absent between rounds.
    #[serde(rename = "decision", default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,
    #[serde(rename = "score")]
    pub score: u32,
}

impl From<&Player> for PlayerDoc {
    fn from(p: &Player) -> Self {
        Self {
            user_id: p.user_id(),
            name: p.name().to_string(),
            decision: p.decision().map(|d| d.as_str().to_string()),
            score: p.score(),
        }
    }
}

impl TryFrom<PlayerDoc> for Player {
    type Error = DbErr;

    fn try_from(doc: PlayerDoc) -> Result<Self, Self::Error> {
        let decision = doc
            .decision
            .as_deref()
            .map(str::parse::<Decision>)
            .transpose()
            .map_err(|e| DbErr::Json(e.to_string()))?;
        Ok(Player::restore(doc.user_id, doc.name, decision, doc.score))
    }
}

pub fn encode_players(players: &[Player]) -> Result<String, DbErr> {
    let docs: Vec<PlayerDoc> = players.iter().map(PlayerDoc::from).collect();
    serde_json::to_string(&docs).map_err(|e| DbErr::Json(e.to_string()))
}

pub fn decode_players(raw: &str) -> Result<Vec<Player>, DbErr> {
    let docs: Vec<PlayerDoc> =
        serde_json::from_str(raw).map_err(|e| DbErr::Json(e.to_string()))?;
    docs.into_iter().map(Player::try_from).collect()
}
