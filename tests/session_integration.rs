//! Integration tests: sessions, the file store and the leaderboard together.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use nim_arena::agent::{PlayerSpec, RandomAgent, ScriptedAgent};
use nim_arena::arena::{ArenaConfig, run_arena};
use nim_arena::game::{ForfeitReason, Outcome, Side, Variant};
use nim_arena::rating::{EloConfig, Leaderboard};
use nim_arena::record::{JsonlStore, ResultStore};
use nim_arena::session::{Decision, GameConfig, Seat, Session};
use nim_arena::{PersistenceError, SessionError};
use tempfile::tempdir;

#[test]
fn test_human_vs_agent_game_is_recorded() {
    let dir = tempdir().unwrap();
    let mut store = JsonlStore::new(dir.path().join("results.jsonl"));

    // Normal, 5 sticks: human takes 2, bot takes 1, human takes 2 and wins.
    let mut session = Session::new(
        GameConfig {
            variant: Variant::Normal,
            pile: 5,
        },
        Seat::human("alice"),
        Seat::agent(ScriptedAgent::from_moves("bot", &[1])),
    );

    assert!(matches!(
        session.run_until_blocked().as_slice(),
        [Decision::AwaitingHuman(_)]
    ));
    session.human_move(2).unwrap();
    assert_eq!(session.run_until_blocked().len(), 2);
    session.human_move(2).unwrap();

    assert_eq!(session.game().outcome(), Outcome::Won(Side::Red));
    assert_eq!(session.status_message(), "Red wins by taking the last stick!");
    assert!(session.record_at(&mut store, 1_700_000_000).unwrap());

    let log = store.all_results().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].red_player, "alice");
    assert_eq!(log[0].blue_player, "bot");
    assert!(log[0].red_won && !log[0].blue_won);
}

#[test]
fn test_persistence_failure_leaves_session_intact() {
    let dir = tempdir().unwrap();
    // A directory cannot be appended to.
    let mut broken = JsonlStore::new(dir.path());
    let mut working = JsonlStore::new(dir.path().join("ok.jsonl"));

    let mut session = Session::new(
        GameConfig::default(),
        Seat::agent(RandomAgent::new("r1", 3)),
        Seat::agent(RandomAgent::new("r2", 4)),
    );
    session.run_until_blocked();
    let finished = session.game().clone();

    let err = session.record(&mut broken).unwrap_err();
    assert!(matches!(err, PersistenceError::Io { .. }));
    assert_eq!(session.game(), &finished);
    assert!(!session.is_recorded());

    // Retrying against a working store succeeds exactly once.
    assert!(session.record(&mut working).unwrap());
    assert!(!session.record(&mut working).unwrap());
    assert_eq!(working.all_results().unwrap().len(), 1);
}

#[test]
fn test_forfeit_is_recorded_for_the_opponent() {
    let dir = tempdir().unwrap();
    let mut store = JsonlStore::new(dir.path().join("results.jsonl"));

    let mut session = Session::new(
        GameConfig {
            variant: Variant::A,
            pile: 21,
        },
        // 2 is not legal on an odd pile in variant A.
        Seat::agent(ScriptedAgent::from_moves("cheater", &[2])),
        Seat::agent(ScriptedAgent::from_moves("honest", &[])),
    );
    let decisions = session.run_until_blocked();
    assert!(matches!(
        decisions.as_slice(),
        [Decision::Forfeit {
            side: Side::Red,
            reason: ForfeitReason::IllegalMove { amount: 2 },
            ..
        }]
    ));
    assert_eq!(
        session.status_message(),
        "Blue wins because Red played an invalid move (2)."
    );

    session.record(&mut store).unwrap();
    let log = store.all_results().unwrap();
    assert!(log[0].blue_won);
    assert_eq!(log[0].variant, Variant::A);
}

#[test]
fn test_variant_locked_after_first_move() {
    let mut session = Session::new(GameConfig::default(), Seat::human("a"), Seat::human("b"));
    session.human_move(1).unwrap();
    assert_eq!(session.set_variant(Variant::B), Err(SessionError::AlreadyStarted));
    assert_eq!(session.game().variant(), Variant::Normal);
}

#[test]
fn test_arena_results_feed_the_leaderboard() {
    let dir = tempdir().unwrap();
    let mut store = JsonlStore::new(dir.path().join("results.jsonl"));

    let players: Vec<PlayerSpec> = ["a=random", "b=random", "c=random"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let config = ArenaConfig {
        games_per_pair: 2,
        game: GameConfig {
            variant: Variant::B,
            pile: 15,
        },
        seed: 11,
    };
    let games = run_arena(&players, &config, |_| {}).unwrap();
    assert_eq!(games.len(), 12);
    for game in &games {
        store.append_result(&game.result).unwrap();
    }

    let log = store.all_results().unwrap();
    assert_eq!(log.len(), 12);
    let board = Leaderboard::build(&log, &EloConfig::default());
    assert_eq!(board.ratings.len(), 3);
    assert_eq!(board.anomalies, 0);
    // Only variant B was played.
    assert!(board.ratings.iter().all(|row| row.normal == 1000 && row.a == 1000));
    assert!(board.ratings.iter().all(|row| row.global == row.b));
}
