//! Arena command implementation.

use super::output::{JsonArenaResult, format_arena_csv, format_arena_text};
use super::{CliError, OutputFormat, RecordTarget};
use indicatif::{ProgressBar, ProgressStyle};
use nim_arena::agent::PlayerSpec;
use nim_arena::arena::{ArenaConfig, fixtures, run_arena, standings, validate_entrants};
use nim_arena::game::Variant;
use nim_arena::rating::{EloConfig, compute_ratings};
use nim_arena::record::{MatchResult, ResultStore};
use nim_arena::session::GameConfig;
use std::time::Instant;

/// Execute the arena command.
///
/// # Errors
///
/// Returns an error if the entrants are invalid or output fails. A failure
/// to record results is only a warning.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute(
    players: &[PlayerSpec],
    games: u32,
    variant: Variant,
    pile: u32,
    seed: Option<u64>,
    threads: Option<usize>,
    target: &RecordTarget,
    format: OutputFormat,
    progress: bool,
) -> Result<(), CliError> {
    validate_entrants(players)?;

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    // Base seed
    let base_seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() ^ u64::from(d.subsec_nanos()))
            .unwrap_or(42)
    });

    let config = ArenaConfig {
        games_per_pair: games,
        game: GameConfig { variant, pile },
        seed: base_seed,
    };

    // Progress bar
    let pb = if progress {
        let pb = ProgressBar::new(fixtures(players.len(), &config).len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let played = run_arena(players, &config, |_| {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    })?;
    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }
    let duration = start.elapsed();

    // Append in fixture order so the log is reproducible
    let results: Vec<MatchResult> = played.iter().map(|g| g.result.clone()).collect();
    if let Some(mut store) = target.open() {
        let mut written = 0;
        for result in &results {
            if let Err(e) = store.append_result(result) {
                eprintln!("Warning: {written} of {} results recorded: {e}", results.len());
                break;
            }
            written += 1;
        }
    }

    let table = standings(players, &played);
    let ratings = compute_ratings(&results, None, &EloConfig::default());

    // Output based on format
    match format {
        OutputFormat::Text => {
            println!();
            print!("{}", format_arena_text(&played, &table, &ratings));
            println!();
            println!("Seed: {base_seed}");
            println!("Duration: {:.2}s", duration.as_secs_f64());
        }
        OutputFormat::Json => {
            let json_result = JsonArenaResult::new(&played, &table, &ratings);
            let json = serde_json::to_string_pretty(&json_result)?;
            println!("{json}");
        }
        OutputFormat::Csv => {
            print!("{}", format_arena_csv(&table, &ratings));
        }
    }

    Ok(())
}
