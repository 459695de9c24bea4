use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::GameStatus;

/// Stored form of [`GameStatus`]; the string values are the stable names
/// produced by `GameStatus::as_str`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum DbGameStatus {
    #[sea_orm(string_value = "WAITING_TO_START")]
    WaitingToStart,
    #[sea_orm(string_value = "PLAYING")]
    Playing,
    #[sea_orm(string_value = "FINISHED")]
    Finished,
    #[sea_orm(string_value = "CANCELED")]
    Canceled,
}

impl From<GameStatus> for DbGameStatus {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::WaitingToStart => DbGameStatus::WaitingToStart,
            GameStatus::Playing => DbGameStatus::Playing,
            GameStatus::Finished => DbGameStatus::Finished,
            GameStatus::Canceled => DbGameStatus::Canceled,
        }
    }
}

impl From<DbGameStatus> for GameStatus {
    fn from(status: DbGameStatus) -> Self {
        match status {
            DbGameStatus::WaitingToStart => GameStatus::WaitingToStart,
            DbGameStatus::Playing => GameStatus::Playing,
            DbGameStatus::Finished => GameStatus::Finished,
            DbGameStatus::Canceled => GameStatus::Canceled,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub status: DbGameStatus,
    #[sea_orm(column_name = "turns_count")]
    pub turns_count: i32,
    #[sea_orm(column_name = "current_turn_index")]
    pub current_turn_index: i32,
    /// JSON array of `adapters::games_sea::dto::PlayerDoc`
    #[sea_orm(column_type = "Text")]
    pub players: String,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::game_turns::Entity")]
    GameTurns,
}

impl Related<super::game_turns::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameTurns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
