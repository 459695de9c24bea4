pub mod game_turns;
pub mod games;

pub use game_turns::Entity as GameTurns;
pub use game_turns::Model as GameTurn;
pub use games::Entity as Games;
pub use games::Model as GameRow;
