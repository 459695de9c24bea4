//! Domain layer: the rock/paper/scissors game state machine and its values.
//!
//! Everything here is synchronous and side-effect free. Persistence lives in
//! `repos`/`adapters`, orchestration in `services`.

pub mod decision;
pub mod errors;
pub mod game;
pub mod player;
pub mod turn;
pub mod user;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_game;
#[cfg(test)]
mod tests_props;

pub type UserId = uuid::Uuid;
pub type GameId = uuid::Uuid;
pub type TurnId = uuid::Uuid;

// Re-exports for ergonomics
pub use decision::Decision;
pub use errors::GameError;
pub use game::{Game, GameStatus, PLAYERS};
pub use player::Player;
pub use turn::{TurnPlayer, TurnSnapshot};
pub use user::User;
