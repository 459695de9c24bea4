use roshambo::config::game::GameSettings;
use roshambo::domain::{Decision, Game, GameError, GameStatus, User};
use roshambo::errors::domain::{DomainError, NotFoundKind};
use roshambo::repos::{GameRepoSea, TurnRepoSea};
use roshambo::services::{DecisionOutcome, GameService};
use uuid::Uuid;

use crate::support::db::sea_repos;
use crate::support::factory::user;

struct Table {
    svc: GameService<GameRepoSea, TurnRepoSea>,
    alice: User,
    bob: User,
    game: Game,
}

async fn seated(turns_count: u32) -> Table {
    let (games, turns) = sea_repos().await;
    let svc = GameService::new(games, turns, GameSettings::default());
    let (alice, bob) = (user("alice"), user("bob"));
    svc.find_or_create_game(&alice, turns_count).await.unwrap();
    let game = svc.find_or_create_game(&bob, turns_count).await.unwrap();
    Table {
        svc,
        alice,
        bob,
        game,
    }
}

#[tokio::test]
async fn first_decision_waits_second_finishes_turn() {
    let t = seated(3).await;
    let id = t.game.id().unwrap();

    let first = t
        .svc
        .submit_decision(id, t.alice.id, Decision::Rock)
        .await
        .unwrap();
    match &first {
        DecisionOutcome::Waiting(game) => {
            assert_eq!(
                game.player(t.alice.id).unwrap().decision(),
                Some(Decision::Rock)
            );
        }
        other => panic!("expected Waiting, got {other:?}"),
    }

    let second = t
        .svc
        .submit_decision(id, t.bob.id, Decision::Scissors)
        .await
        .unwrap();
    let DecisionOutcome::TurnFinished { game, turn } = second else {
        panic!("expected TurnFinished");
    };
    assert_eq!(turn.turn_index(), 0);
    assert_eq!(turn.winner_id(), Some(t.alice.id));
    assert_eq!(game.current_turn_index(), 1);
    assert!(game.players().iter().all(|p| p.decision().is_none()));

    let history = t.svc.last_turns(id, 5).await.unwrap();
    assert_eq!(history, vec![turn]);
}

#[tokio::test]
async fn deciding_twice_is_rejected() {
    let t = seated(3).await;
    let id = t.game.id().unwrap();

    t.svc
        .submit_decision(id, t.alice.id, Decision::Paper)
        .await
        .unwrap();
    let err = t
        .svc
        .submit_decision(id, t.alice.id, Decision::Rock)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        DomainError::Game(GameError::AlreadyDecided {
            decision: Decision::Paper
        })
    );
}

#[tokio::test]
async fn outsider_cannot_decide() {
    let t = seated(3).await;

    let err = t
        .svc
        .submit_decision(t.game.id().unwrap(), Uuid::new_v4(), Decision::Rock)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Player, _)));
}

#[tokio::test]
async fn unknown_game_is_not_found() {
    let t = seated(1).await;

    let err = t
        .svc
        .submit_decision(Uuid::new_v4(), t.alice.id, Decision::Rock)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));
}

#[tokio::test]
async fn full_game_ends_finished_with_scores() {
    let t = seated(3).await;
    let id = t.game.id().unwrap();
    let rounds = [
        (Decision::Rock, Decision::Scissors),
        (Decision::Rock, Decision::Rock),
        (Decision::Scissors, Decision::Rock),
    ];

    let mut last = None;
    for (a, b) in rounds {
        t.svc.submit_decision(id, t.alice.id, a).await.unwrap();
        last = Some(t.svc.submit_decision(id, t.bob.id, b).await.unwrap());
    }

    let game = last.expect("three rounds played").game().clone();
    assert_eq!(game.status(), GameStatus::Finished);
    assert_eq!(game.current_turn_index(), 3);
    assert_eq!(game.player(t.alice.id).unwrap().score(), 1);
    assert_eq!(game.player(t.bob.id).unwrap().score(), 1);

    let history = t.svc.last_turns(id, 10).await.unwrap();
    let winners: Vec<_> = history.iter().map(|turn| turn.winner_id()).collect();
    assert_eq!(winners, vec![Some(t.bob.id), None, Some(t.alice.id)]);

    let err = t
        .svc
        .submit_decision(id, t.alice.id, Decision::Paper)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Game(GameError::InvalidState { .. })));
}

#[tokio::test]
async fn cancel_stops_play_and_is_idempotent() {
    let t = seated(3).await;
    let id = t.game.id().unwrap();

    let canceled = t.svc.cancel_game(id).await.unwrap();
    assert_eq!(canceled.status(), GameStatus::Canceled);
    let again = t.svc.cancel_game(id).await.unwrap();
    assert_eq!(again.status(), GameStatus::Canceled);

    let err = t
        .svc
        .submit_decision(id, t.alice.id, Decision::Rock)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Game(GameError::InvalidState { .. })));
}

#[tokio::test]
async fn cancel_after_finish_keeps_finished() {
    let t = seated(1).await;
    let id = t.game.id().unwrap();
    t.svc
        .submit_decision(id, t.alice.id, Decision::Paper)
        .await
        .unwrap();
    t.svc
        .submit_decision(id, t.bob.id, Decision::Rock)
        .await
        .unwrap();

    let game = t.svc.cancel_game(id).await.unwrap();
    assert_eq!(game.status(), GameStatus::Finished);
}
