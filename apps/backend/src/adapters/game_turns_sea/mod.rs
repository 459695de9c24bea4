//! SeaORM adapter for the turn store - generic over ConnectionTrait.

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::{GameId, TurnSnapshot};
use crate::entities::game_turns;

pub mod dto;

pub use dto::{decode_turn_players, encode_turn_players, TurnPlayerDoc};

pub fn into_domain(row: game_turns::Model) -> Result<TurnSnapshot, sea_orm::DbErr> {
    let turn_index = u32::try_from(row.turn_index)
        .map_err(|_| sea_orm::DbErr::Json(format!("negative turn_index: {}", row.turn_index)))?;
    Ok(TurnSnapshot::restore(
        row.id,
        Some(row.game_id),
        turn_index,
        row.winner_id,
        row.finished_at,
        decode_turn_players(&row.players)?,
    ))
}

/// Append a snapshot under `game_id`. A second snapshot for the same
/// (game, turn index) violates `idx_game_turns_game_turn`.
pub async fn insert_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: GameId,
    turn: &TurnSnapshot,
) -> Result<(), sea_orm::DbErr> {
    let turn_index = i32::try_from(turn.turn_index()).map_err(|_| {
        sea_orm::DbErr::Custom(format!("turn_index out of range: {}", turn.turn_index()))
    })?;

    let active = game_turns::ActiveModel {
        id: Set(turn.id()),
        game_id: Set(game_id),
        turn_index: Set(turn_index),
        winner_id: Set(turn.winner_id()),
        finished_at: Set(turn.finished_at()),
        players: Set(encode_turn_players(turn.players())?),
    };

    game_turns::Entity::insert(active)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

/// Up to `limit` snapshots of `game_id`, most recent first.
pub async fn find_last<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: GameId,
    limit: u64,
) -> Result<Vec<game_turns::Model>, sea_orm::DbErr> {
    game_turns::Entity::find()
        .filter(game_turns::Column::GameId.eq(game_id))
        .order_by_desc(game_turns::Column::TurnIndex)
        .limit(limit)
        .all(conn)
        .await
}
