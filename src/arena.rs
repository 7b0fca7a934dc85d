//! Batch play between agents.
//!
//! Provides a pure function interface: `(entrants, config) -> Vec<ArenaGame>`
//!
//! - Every ordered pair of distinct entrants plays `games_per_pair` games,
//!   so each pairing is played with both colours
//! - Games are independent and run in parallel with rayon, each with its own
//!   session and freshly built agents
//! - Results come back in fixture order whatever the scheduling, and with a
//!   fixed seed two runs of seeded agents produce the same games

use std::collections::HashSet;
use std::fmt;

use rayon::prelude::*;
use serde::Serialize;

use crate::agent::PlayerSpec;
use crate::game::{ForfeitReason, Outcome, Side};
use crate::record::{MatchResult, now_timestamp};
use crate::session::{GameConfig, Seat, Session};

/// Arena settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Games played by each ordered pair of entrants.
    pub games_per_pair: u32,
    /// Variant and pile size of every game.
    pub game: GameConfig,
    /// Base seed; game `i` derives its agent seeds from `seed + i`.
    pub seed: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games_per_pair: 1,
            game: GameConfig::default(),
            seed: 0,
        }
    }
}

/// One scheduled game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fixture {
    /// Position in the schedule.
    pub index: usize,
    /// Entrant playing Red.
    pub red: usize,
    /// Entrant playing Blue.
    pub blue: usize,
    /// Seed for this game's agents.
    pub seed: u64,
}

/// Schedule for `entrants` players: every ordered pair of distinct entrants,
/// `games_per_pair` times each.
#[must_use]
pub fn fixtures(entrants: usize, config: &ArenaConfig) -> Vec<Fixture> {
    let mut schedule = Vec::new();
    for red in 0..entrants {
        for blue in (0..entrants).filter(|&blue| blue != red) {
            for _ in 0..config.games_per_pair {
                let index = schedule.len();
                schedule.push(Fixture {
                    index,
                    red,
                    blue,
                    seed: config.seed.wrapping_add(index as u64),
                });
            }
        }
    }
    schedule
}

/// A finished arena game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArenaGame {
    /// The fixture that was played.
    pub fixture: Fixture,
    /// Record to append to the result log.
    pub result: MatchResult,
    /// Final outcome.
    pub outcome: Outcome,
    /// Amounts removed, in play order.
    pub history: Vec<u32>,
}

impl ArenaGame {
    /// The forfeiting side and reason, if the game ended by forfeit.
    #[must_use]
    pub fn forfeit(&self) -> Option<(Side, ForfeitReason)> {
        match self.outcome {
            Outcome::Forfeited { winner, reason } => Some((winner.other(), reason)),
            _ => None,
        }
    }
}

/// Error type for arena runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    /// Fewer than two entrants.
    TooFewEntrants(usize),
    /// A human cannot take part in unattended play.
    HumanEntrant(String),
    /// Two entrants share a name, so their results could not be told apart.
    DuplicateName(String),
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewEntrants(n) => write!(f, "Too few entrants: {n} (minimum 2)"),
            Self::HumanEntrant(name) => {
                write!(f, "Entrant '{name}' is human; the arena only runs agents")
            }
            Self::DuplicateName(name) => {
                write!(f, "Two entrants are named '{name}'; use name=<spec> to tell them apart")
            }
        }
    }
}

impl std::error::Error for ArenaError {}

/// Check that `entrants` can play an unattended arena.
///
/// # Errors
///
/// Returns an error for fewer than two entrants, a human entrant, or a
/// repeated name.
pub fn validate_entrants(entrants: &[PlayerSpec]) -> Result<(), ArenaError> {
    if entrants.len() < 2 {
        return Err(ArenaError::TooFewEntrants(entrants.len()));
    }
    let mut names = HashSet::new();
    for spec in entrants {
        let name = spec.name();
        if spec.is_human() {
            return Err(ArenaError::HumanEntrant(name));
        }
        if !names.insert(name.clone()) {
            return Err(ArenaError::DuplicateName(name));
        }
    }
    Ok(())
}

/// Play one fixture to the end.
///
/// Returns `None` if a seat is human, since the game would wait forever.
#[must_use]
pub fn play_fixture(
    entrants: &[PlayerSpec],
    fixture: Fixture,
    config: &ArenaConfig,
) -> Option<ArenaGame> {
    let red = entrants.get(fixture.red)?.agent(fixture.seed.wrapping_mul(2))?;
    let blue = entrants
        .get(fixture.blue)?
        .agent(fixture.seed.wrapping_mul(2).wrapping_add(1))?;

    let mut session = Session::new(config.game, Seat::Agent(red), Seat::Agent(blue));
    session.run_until_blocked();

    let result = session.result(now_timestamp())?;
    Some(ArenaGame {
        fixture,
        result,
        outcome: session.game().outcome(),
        history: session.game().history().to_vec(),
    })
}

/// Play the whole schedule in parallel.
///
/// `on_game` is called from worker threads as each game finishes, in no
/// particular order; the returned games are in fixture order.
///
/// # Errors
///
/// Returns an error if the entrants fail [`validate_entrants`].
pub fn run_arena<F>(
    entrants: &[PlayerSpec],
    config: &ArenaConfig,
    on_game: F,
) -> Result<Vec<ArenaGame>, ArenaError>
where
    F: Fn(&ArenaGame) + Sync,
{
    validate_entrants(entrants)?;
    let schedule = fixtures(entrants.len(), config);

    let games = schedule
        .into_par_iter()
        .filter_map(|fixture| {
            let game = play_fixture(entrants, fixture, config)?;
            on_game(&game);
            Some(game)
        })
        .collect();
    Ok(games)
}

/// Win/loss tally of one entrant over an arena run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    /// Entrant name.
    pub player: String,
    /// Games played.
    pub games: u32,
    /// Games won.
    pub wins: u32,
    /// Games lost.
    pub losses: u32,
    /// Losses by forfeit.
    pub forfeits: u32,
}

impl Standing {
    /// Share of games won, 0 when no game was played.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.games)
        }
    }
}

/// Tally wins per entrant, in entrant order.
#[must_use]
pub fn standings(entrants: &[PlayerSpec], games: &[ArenaGame]) -> Vec<Standing> {
    let mut table: Vec<Standing> = entrants
        .iter()
        .map(|spec| Standing {
            player: spec.name(),
            games: 0,
            wins: 0,
            losses: 0,
            forfeits: 0,
        })
        .collect();

    for game in games {
        let seats = [(Side::Red, game.fixture.red), (Side::Blue, game.fixture.blue)];
        for (side, entrant) in seats {
            let Some(row) = table.get_mut(entrant) else {
                continue;
            };
            row.games += 1;
            match game.result.winner() {
                Some(winner) if winner == side => row.wins += 1,
                Some(_) => {
                    row.losses += 1;
                    if game.forfeit().is_some_and(|(by, _)| by == side) {
                        row.forfeits += 1;
                    }
                }
                None => {}
            }
        }
    }
    table
}
