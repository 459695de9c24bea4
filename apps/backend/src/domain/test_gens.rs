// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::Decision;

pub fn decision() -> impl Strategy<Value = Decision> {
    prop_oneof![
        Just(Decision::Rock),
        Just(Decision::Paper),
        Just(Decision::Scissors),
    ]
}

/// One round worth of picks, first seat then second seat.
pub fn round() -> impl Strategy<Value = (Decision, Decision)> {
    (decision(), decision())
}

/// A game length together with enough rounds to play it out (and then some).
pub fn game_plan() -> impl Strategy<Value = (u32, Vec<(Decision, Decision)>)> {
    (1u32..=7).prop_flat_map(|turns| {
        let rounds = prop::collection::vec(round(), turns as usize..=turns as usize + 2);
        (Just(turns), rounds)
    })
}
