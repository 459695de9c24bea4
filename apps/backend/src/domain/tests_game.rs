use time::macros::datetime;
use uuid::Uuid;

use crate::domain::{Decision, Game, GameError, GameStatus, User};

fn alice() -> User {
    User::new(Uuid::from_u128(0xA11CE), "alice")
}

fn bob() -> User {
    User::new(Uuid::from_u128(0xB0B), "bob")
}

fn started_game(turns: u32) -> Game {
    let mut game = Game::new(turns);
    game.add_player(&alice()).unwrap();
    game.add_player(&bob()).unwrap();
    game
}

fn play(game: &mut Game, a: Decision, b: Decision) {
    game.set_player_decision(alice().id, a).unwrap();
    game.set_player_decision(bob().id, b).unwrap();
}

#[test]
fn new_game_waits_for_players() {
    let game = Game::new(3);
    assert_eq!(game.id(), None);
    assert_eq!(game.status(), GameStatus::WaitingToStart);
    assert_eq!(game.turns_count(), 3);
    assert_eq!(game.current_turn_index(), 0);
    assert!(game.players().is_empty());
    assert!(!game.is_finished());
}

#[test]
fn first_player_keeps_game_waiting() {
    let mut game = Game::new(3);
    game.add_player(&alice()).unwrap();

    assert_eq!(game.status(), GameStatus::WaitingToStart);
    let seat = &game.players()[0];
    assert_eq!(seat.user_id(), alice().id);
    assert_eq!(seat.name(), "alice");
    assert_eq!(seat.decision(), None);
    assert_eq!(seat.score(), 0);
}

#[test]
fn second_player_starts_game() {
    let game = started_game(3);
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.players().len(), 2);
}

#[test]
fn add_player_after_start_is_invalid_state() {
    let mut game = started_game(3);
    let carol = User::new(Uuid::from_u128(0xCA201), "carol");

    let err = game.add_player(&carol).unwrap_err();
    assert_eq!(
        err,
        GameError::InvalidState {
            status: GameStatus::Playing
        }
    );
    assert_eq!(game.players().len(), 2);
}

#[test]
fn add_player_to_canceled_game_is_invalid_state() {
    let mut game = Game::new(3);
    game.cancel();
    assert!(matches!(
        game.add_player(&alice()),
        Err(GameError::InvalidState {
            status: GameStatus::Canceled
        })
    ));
    assert!(game.players().is_empty());
}

#[test]
fn decision_before_start_is_invalid_state() {
    let mut game = Game::new(3);
    game.add_player(&alice()).unwrap();

    let err = game
        .set_player_decision(alice().id, Decision::Rock)
        .unwrap_err();
    assert_eq!(
        err,
        GameError::InvalidState {
            status: GameStatus::WaitingToStart
        }
    );
    assert_eq!(game.players()[0].decision(), None);
}

#[test]
fn decision_for_unknown_user_is_ignored() {
    let mut game = started_game(3);
    let before = game.clone();

    game.set_player_decision(Uuid::from_u128(0xDEAD), Decision::Paper)
        .unwrap();

    assert_eq!(game, before);
    assert!(!game.has_player(Uuid::from_u128(0xDEAD)));
}

#[test]
fn have_decision_of_every_player_tracks_both_seats() {
    let mut game = started_game(3);
    assert!(!game.have_decision_of_every_player());

    game.set_player_decision(alice().id, Decision::Rock).unwrap();
    assert!(!game.have_decision_of_every_player());

    game.set_player_decision(bob().id, Decision::Rock).unwrap();
    assert!(game.have_decision_of_every_player());
}

// Scenario A
#[test]
fn rock_beats_scissors_round() {
    let mut game = started_game(3);
    play(&mut game, Decision::Rock, Decision::Scissors);

    let turn = game.finish_turn().unwrap();

    assert_eq!(turn.winner_id(), Some(alice().id));
    assert_eq!(turn.turn_index(), 0);
    assert_eq!(turn.player(alice().id).unwrap().score_after_turn(), 1);
    assert_eq!(turn.player(bob().id).unwrap().score_after_turn(), 0);
    assert_eq!(turn.winner().unwrap().name(), "alice");
    assert_eq!(game.current_turn_index(), 1);
    assert_eq!(game.status(), GameStatus::Playing);
}

// Scenario B
#[test]
fn equal_decisions_tie() {
    let mut game = started_game(3);
    play(&mut game, Decision::Paper, Decision::Paper);

    let turn = game.finish_turn().unwrap();

    assert_eq!(turn.winner_id(), None);
    assert!(turn.winner().is_none());
    assert!(turn.players().iter().all(|p| p.score_after_turn() == 0));
    assert!(game.players().iter().all(|p| p.score() == 0));
}

// Scenario C
#[test]
fn last_round_finishes_game_and_cancel_is_noop() {
    let mut game = started_game(1);
    play(&mut game, Decision::Scissors, Decision::Paper);

    game.finish_turn().unwrap();
    assert_eq!(game.status(), GameStatus::Finished);
    assert!(game.is_finished());

    game.cancel();
    assert_eq!(game.status(), GameStatus::Finished);
}

// Scenario D
#[test]
fn second_decision_is_already_decided() {
    let mut game = started_game(3);
    game.set_player_decision(alice().id, Decision::Rock).unwrap();

    let err = game
        .set_player_decision(alice().id, Decision::Paper)
        .unwrap_err();

    assert_eq!(
        err,
        GameError::AlreadyDecided {
            decision: Decision::Rock
        }
    );
    assert_eq!(game.player(alice().id).unwrap().decision(), Some(Decision::Rock));
}

// Scenario E
#[test]
fn finish_turn_with_one_player_is_structural_error() {
    let mut game = Game::new(3);
    game.add_player(&alice()).unwrap();

    let err = game.finish_turn().unwrap_err();
    assert_eq!(err, GameError::TwoPlayersRequired { found: 1 });
    assert_eq!(game.current_turn_index(), 0);
}

#[test]
fn finish_turn_without_all_decisions_is_incomplete() {
    let mut game = started_game(3);
    game.set_player_decision(bob().id, Decision::Rock).unwrap();
    let before = game.clone();

    assert_eq!(game.finish_turn().unwrap_err(), GameError::IncompleteRound);
    assert_eq!(game, before);
}

#[test]
fn finish_turn_on_canceled_game_is_rejected() {
    let mut game = started_game(3);
    play(&mut game, Decision::Rock, Decision::Paper);
    game.cancel();

    assert_eq!(
        game.finish_turn().unwrap_err(),
        GameError::InvalidState {
            status: GameStatus::Canceled
        }
    );
    assert_eq!(game.current_turn_index(), 0);
}

#[test]
fn finish_turn_clears_decisions_and_stamps_snapshot() {
    let mut game = started_game(3).with_id(Uuid::from_u128(42));
    play(&mut game, Decision::Paper, Decision::Scissors);
    let at = datetime!(2026-10-19 12:00 UTC);

    let turn = game.finish_turn_at(at).unwrap();

    assert_eq!(turn.game_id(), Some(Uuid::from_u128(42)));
    assert_eq!(turn.finished_at(), at);
    assert_eq!(turn.winner_id(), Some(bob().id));
    let picks: Vec<_> = turn.players().iter().map(|p| p.decision()).collect();
    assert_eq!(picks, vec![Decision::Paper, Decision::Scissors]);
    assert!(game.players().iter().all(|p| p.decision().is_none()));
    assert!(!game.have_decision_of_every_player());
}

#[test]
fn scores_accumulate_across_rounds() {
    let mut game = started_game(3);
    play(&mut game, Decision::Rock, Decision::Scissors);
    game.finish_turn().unwrap();
    play(&mut game, Decision::Rock, Decision::Paper);
    game.finish_turn().unwrap();
    play(&mut game, Decision::Paper, Decision::Rock);
    let last = game.finish_turn().unwrap();

    assert_eq!(last.turn_index(), 2);
    assert_eq!(game.player(alice().id).unwrap().score(), 2);
    assert_eq!(game.player(bob().id).unwrap().score(), 1);
    assert_eq!(game.status(), GameStatus::Finished);
    assert_eq!(game.current_turn_index(), game.turns_count());
}

#[test]
fn snapshot_ids_are_unique() {
    let mut game = started_game(2);
    play(&mut game, Decision::Rock, Decision::Rock);
    let first = game.finish_turn().unwrap();
    play(&mut game, Decision::Rock, Decision::Rock);
    let second = game.finish_turn().unwrap();

    assert_ne!(first.id(), second.id());
}

#[test]
fn cancel_twice_matches_cancel_once() {
    let mut once = started_game(3);
    once.cancel();
    let mut twice = started_game(3);
    twice.cancel();
    twice.cancel();

    assert_eq!(once, twice);
    assert_eq!(twice.status(), GameStatus::Canceled);
    assert!(twice.is_finished());
}

#[test]
fn cancel_waiting_game() {
    let mut game = Game::new(3);
    game.cancel();
    assert_eq!(game.status(), GameStatus::Canceled);
}

#[test]
fn zero_turn_game_counts_as_finished() {
    let mut game = Game::new(0);
    assert!(game.is_finished());
    game.cancel();
    assert_eq!(game.status(), GameStatus::WaitingToStart);
}

#[test]
fn status_storage_names_parse_back() {
    for status in [
        GameStatus::WaitingToStart,
        GameStatus::Playing,
        GameStatus::Finished,
        GameStatus::Canceled,
    ] {
        assert_eq!(status.as_str().parse::<GameStatus>().unwrap(), status);
    }
    assert!("LOBBY".parse::<GameStatus>().is_err());
}
