use proptest::prelude::*;
use uuid::Uuid;

use crate::domain::{test_gens, test_prelude};
use crate::domain::{Decision, Game, GameError, GameStatus, User};

fn seated(turns: u32) -> (Game, User, User) {
    let a = User::new(Uuid::from_u128(1), "a");
    let b = User::new(Uuid::from_u128(2), "b");
    let mut game = Game::new(turns);
    game.add_player(&a).unwrap();
    game.add_player(&b).unwrap();
    (game, a, b)
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: for two distinct decisions exactly one beats the other;
    /// equal decisions never beat each other.
    #[test]
    fn prop_dominance_is_total_and_antisymmetric(
        (x, y) in test_gens::round(),
    ) {
        if x == y {
            prop_assert!(!x.beats(y));
        } else {
            prop_assert!(x.beats(y) ^ y.beats(x),
                "exactly one of {:?}/{:?} must dominate", x, y);
        }
    }

    /// Property: each resolved round advances the index by one, clears every
    /// decision, never overshoots turns_count, and only the last round moves
    /// the game to Finished.
    #[test]
    fn prop_turn_index_and_decisions(
        (turns, rounds) in test_gens::game_plan(),
    ) {
        let (mut game, a, b) = seated(turns);

        for (i, (da, db)) in rounds.into_iter().enumerate() {
            let before = game.current_turn_index();

            if game.is_finished() {
                let err = game.set_player_decision(a.id, da).unwrap_err();
                let is_invalid_state = matches!(err, GameError::InvalidState { .. });
                prop_assert!(is_invalid_state);
                prop_assert_eq!(game.current_turn_index(), turns);
                continue;
            }

            game.set_player_decision(a.id, da).unwrap();
            game.set_player_decision(b.id, db).unwrap();
            let turn = game.finish_turn().unwrap();

            prop_assert_eq!(turn.turn_index() as usize, i);
            prop_assert_eq!(game.current_turn_index(), before + 1);
            prop_assert!(game.current_turn_index() <= game.turns_count());
            prop_assert!(game.players().iter().all(|p| p.decision().is_none()));

            let expected = if game.current_turn_index() == turns {
                GameStatus::Finished
            } else {
                GameStatus::Playing
            };
            prop_assert_eq!(game.status(), expected);
        }
    }

    /// Property: the snapshot winner is exactly the seat whose decision
    /// dominates, and only that seat's score moves.
    #[test]
    fn prop_winner_matches_dominance(
        (da, db) in test_gens::round(),
    ) {
        let (mut game, a, b) = seated(1);
        game.set_player_decision(a.id, da).unwrap();
        game.set_player_decision(b.id, db).unwrap();

        let turn = game.finish_turn().unwrap();

        let expected = if da.beats(db) {
            Some(a.id)
        } else if db.beats(da) {
            Some(b.id)
        } else {
            None
        };
        prop_assert_eq!(turn.winner_id(), expected);

        let total: u32 = turn.players().iter().map(|p| p.score_after_turn()).sum();
        prop_assert_eq!(total, u32::from(expected.is_some()));
    }

    /// Property: scores never decrease across a whole game.
    #[test]
    fn prop_scores_monotonic(
        (turns, rounds) in test_gens::game_plan(),
    ) {
        let (mut game, a, b) = seated(turns);
        let mut last = (0u32, 0u32);

        for (da, db) in rounds.into_iter().take(turns as usize) {
            game.set_player_decision(a.id, da).unwrap();
            game.set_player_decision(b.id, db).unwrap();
            game.finish_turn().unwrap();

            let now = (
                game.player(a.id).unwrap().score(),
                game.player(b.id).unwrap().score(),
            );
            prop_assert!(now.0 >= last.0 && now.1 >= last.1);
            last = now;
        }
        prop_assert!(last.0 + last.1 <= turns);
    }
}

#[test]
fn every_decision_pair_is_covered() {
    let mut wins = 0;
    for x in Decision::ALL {
        for y in Decision::ALL {
            if x.beats(y) {
                wins += 1;
            }
        }
    }
    assert_eq!(wins, 3);
}
