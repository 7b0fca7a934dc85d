//! Benchmarks for playing complete games.
//!
//! Covers the raw state machine and the session loop with random agents,
//! which is what an arena run spends its time on.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use nim_arena::agent::{PlayerSpec, RandomAgent};
use nim_arena::arena::{ArenaConfig, run_arena};
use nim_arena::game::{NimGame, Variant};
use nim_arena::session::{GameConfig, Seat, Session};

fn bench_state_machine(c: &mut Criterion) {
    // Always take the smallest legal amount: the longest possible game
    for variant in Variant::ALL {
        c.bench_function(&format!("state_machine_{variant}_pile_1000"), |b| {
            b.iter(|| {
                let mut game = NimGame::new(variant, black_box(1000));
                while let Some(amount) = game.legal_moves().iter().next() {
                    let _ = game.apply_move(amount);
                }
                black_box(game.outcome())
            });
        });
    }
}

fn bench_session_random(c: &mut Criterion) {
    c.bench_function("session_random_vs_random", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            let mut session = Session::new(
                GameConfig {
                    variant: Variant::B,
                    pile: 21,
                },
                Seat::agent(RandomAgent::new("r1", seed)),
                Seat::agent(RandomAgent::new("r2", seed ^ 0xABCD)),
            );
            black_box(session.run_until_blocked())
        });
    });
}

fn bench_arena(c: &mut Criterion) {
    let players: Vec<PlayerSpec> = ["a=random", "b=random", "c=random", "d=random"]
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();
    let config = ArenaConfig {
        games_per_pair: 10,
        ..ArenaConfig::default()
    };

    c.bench_function("arena_4_players_120_games", |b| {
        b.iter(|| black_box(run_arena(black_box(&players), &config, |_| {})))
    });
}

criterion_group!(benches, bench_state_machine, bench_session_random, bench_arena);
criterion_main!(benches);
