//! Adapters for external dependencies.

pub mod game_turns_sea;
pub mod games_sea;
