//! Leaderboard command implementation.

use super::output::{format_leaderboard_csv, format_leaderboard_text};
use super::{CliError, OutputFormat, results_path};
use nim_arena::rating::{EloConfig, Leaderboard, LeaderboardRow};
use nim_arena::record::{JsonlStore, ResultStore};
use serde::Serialize;
use std::path::PathBuf;

/// JSON-serializable leaderboard (ratings only).
#[derive(Debug, Serialize)]
struct JsonLeaderboard<'a> {
    /// Games in the log.
    games: usize,
    /// Records scored as draws because both sides were marked winners.
    anomalies: usize,
    /// Rows, best global rating first.
    ratings: &'a [LeaderboardRow],
}

/// Execute the leaderboard command.
///
/// # Errors
///
/// Returns an error if the result log cannot be read.
pub(crate) fn execute(
    results: Option<PathBuf>,
    format: OutputFormat,
    k_factor: f64,
    initial_rating: f64,
) -> Result<(), CliError> {
    let store = JsonlStore::new(results_path(results)?);
    let log = store.all_results()?;

    let config = EloConfig {
        k_factor,
        initial_rating,
    };
    let board = Leaderboard::build(&log, &config);

    match format {
        OutputFormat::Text => {
            print!(
                "{}",
                format_leaderboard_text(&board.ratings, log.len(), board.anomalies)
            );
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonLeaderboard {
                games: log.len(),
                anomalies: board.anomalies,
                ratings: &board.ratings,
            })?;
            println!("{json}");
        }
        OutputFormat::Csv => {
            print!("{}", format_leaderboard_csv(&board.ratings));
        }
    }

    Ok(())
}
