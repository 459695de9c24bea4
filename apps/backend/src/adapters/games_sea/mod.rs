//! SeaORM adapter for the game store - generic over ConnectionTrait.

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::domain::{Game, GameId};
use crate::entities::games::{self, DbGameStatus};
use crate::infra::db_errors::GAME_NOT_FOUND;

pub mod dto;

pub use dto::{decode_players, encode_players, PlayerDoc};

// Adapter functions return DbErr; the repos layer maps to DomainError.

/// Decode a stored row into a domain game.
pub fn into_domain(row: games::Model) -> Result<Game, sea_orm::DbErr> {
    let players = decode_players(&row.players)?;
    Ok(Game::restore(
        Some(row.id),
        row.status.into(),
        to_u32(row.turns_count, "turns_count")?,
        to_u32(row.current_turn_index, "current_turn_index")?,
        players,
    ))
}

fn to_u32(value: i32, column: &str) -> Result<u32, sea_orm::DbErr> {
    u32::try_from(value)
        .map_err(|_| sea_orm::DbErr::Json(format!("negative {column}: {value}")))
}

fn to_i32(value: u32, column: &str) -> Result<i32, sea_orm::DbErr> {
    i32::try_from(value)
        .map_err(|_| sea_orm::DbErr::Custom(format!("{column} out of range: {value}")))
}

/// Mutable columns of a full replace; `id` and `created_at` never change.
fn replacement(game: &Game) -> Result<games::ActiveModel, sea_orm::DbErr> {
    Ok(games::ActiveModel {
        status: Set(game.status().into()),
        turns_count: Set(to_i32(game.turns_count(), "turns_count")?),
        current_turn_index: Set(to_i32(game.current_turn_index(), "current_turn_index")?),
        players: Set(encode_players(game.players())?),
        updated_at: Set(time::OffsetDateTime::now_utc()),
        ..Default::default()
    })
}

/// Insert a copy of `game`, assigning a fresh id when it has none.
pub async fn insert_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: &Game,
) -> Result<Game, sea_orm::DbErr> {
    let id = game.id().unwrap_or_else(Uuid::new_v4);
    let now = time::OffsetDateTime::now_utc();

    let mut active = replacement(game)?;
    active.id = Set(id);
    active.created_at = Set(now);
    active.updated_at = Set(now);

    games::Entity::insert(active)
        .exec_without_returning(conn)
        .await?;

    Ok(game.clone().with_id(id))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: GameId,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::Id.eq(game_id))
        .one(conn)
        .await
}

/// Unconditional full replace. Errors with a `GAME_NOT_FOUND` payload when no
/// row has this id.
pub async fn replace_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: GameId,
    game: &Game,
) -> Result<(), sea_orm::DbErr> {
    let result = games::Entity::update_many()
        .set(replacement(game)?)
        .filter(games::Column::Id.eq(game_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::Custom(format!("{GAME_NOT_FOUND}{game_id}")));
    }
    Ok(())
}

/// Compare-and-swap: replace only while the stored status is still
/// `expected`. One UPDATE statement, so concurrent writers cannot both win.
pub async fn replace_if_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: GameId,
    game: &Game,
    expected: DbGameStatus,
) -> Result<bool, sea_orm::DbErr> {
    let result = games::Entity::update_many()
        .set(replacement(game)?)
        .filter(games::Column::Id.eq(game_id))
        .filter(games::Column::Status.eq(expected))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}

/// Compare-and-swap on the whole game: replace only while the stored row
/// still holds exactly the state of `expected` (status, progress and seats).
///
/// Game state only moves forward, so a row that matches `expected` has not
/// been written since `expected` was read.
pub async fn replace_if_unchanged<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: GameId,
    expected: &Game,
    game: &Game,
) -> Result<bool, sea_orm::DbErr> {
    let result = games::Entity::update_many()
        .set(replacement(game)?)
        .filter(games::Column::Id.eq(game_id))
        .filter(games::Column::Status.eq(DbGameStatus::from(expected.status())))
        .filter(games::Column::CurrentTurnIndex.eq(to_i32(
            expected.current_turn_index(),
            "current_turn_index",
        )?))
        .filter(games::Column::Players.eq(encode_players(expected.players())?))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}

/// Games in `status`, longest-waiting first.
pub async fn find_by_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    status: DbGameStatus,
    limit: u64,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::Status.eq(status))
        .order_by_asc(games::Column::CreatedAt)
        .order_by_asc(games::Column::Id)
        .limit(limit)
        .all(conn)
        .await
}
