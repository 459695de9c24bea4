use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Games {
    Table,
    Id,
    Status,
    TurnsCount,
    CurrentTurnIndex,
    Players,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum GameTurns {
    Table,
    Id,
    GameId,
    TurnIndex,
    WinnerId,
    FinishedAt,
    Players,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // games
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Games::Status).string_len(32).not_null())
                    .col(ColumnDef::new(Games::TurnsCount).integer().not_null())
                    .col(
                        ColumnDef::new(Games::CurrentTurnIndex)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    // JSON array of seated players, see the games adapter DTOs
                    .col(ColumnDef::new(Games::Players).text().not_null())
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Matchmaking scans by status
        manager
            .create_index(
                Index::create()
                    .name("idx_games_status")
                    .table(Games::Table)
                    .col(Games::Status)
                    .to_owned(),
            )
            .await?;

        // game_turns
        manager
            .create_table(
                Table::create()
                    .table(GameTurns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameTurns::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameTurns::GameId).uuid().not_null())
                    .col(ColumnDef::new(GameTurns::TurnIndex).integer().not_null())
                    .col(ColumnDef::new(GameTurns::WinnerId).uuid().null())
                    .col(
                        ColumnDef::new(GameTurns::FinishedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GameTurns::Players).text().not_null())
                    .to_owned(),
            )
            .await?;

        // One snapshot per (game, turn); also serves "last N turns" lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_game_turns_game_turn")
                    .table(GameTurns::Table)
                    .col(GameTurns::GameId)
                    .col((GameTurns::TurnIndex, IndexOrder::Desc))
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("idx_game_turns_game_turn")
                    .table(GameTurns::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(GameTurns::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_games_status")
                    .table(Games::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await?;

        Ok(())
    }
}
