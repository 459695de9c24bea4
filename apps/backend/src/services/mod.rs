pub mod games;

pub use games::{DecisionOutcome, GameService};
