#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Two-player rock/paper/scissors matches with persisted turn history.
//!
//! [`domain`] holds the pure state machine; [`repos`] defines the stores it
//! is persisted through (SeaORM or in-process) and [`services`] composes the
//! two into matchmaking and round flow.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod repos;
pub mod services;
pub mod telemetry;

// Re-exports for public API
pub use config::db::{db_url, DbProfile};
pub use config::game::GameSettings;
pub use domain::{Decision, Game, GameError, GameStatus, TurnSnapshot, User};
pub use error::AppError;
pub use errors::DomainError;
pub use infra::db::connect_db;
pub use repos::{
    GameRepo, GameRepoSea, InMemoryGameRepo, InMemoryTurnRepo, TurnRepo, TurnRepoSea,
};
pub use services::{DecisionOutcome, GameService};

// Prelude for test convenience
pub mod prelude {
    pub use super::config::db::*;
    pub use super::domain::*;
    pub use super::error::*;
    pub use super::errors::domain::*;
    pub use super::repos::{
        GameRepo, GameRepoSea, InMemoryGameRepo, InMemoryTurnRepo, TurnRepo, TurnRepoSea,
    };
    pub use super::services::{DecisionOutcome, GameService};
}

// Unit tests share the integration tests' subscriber
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
