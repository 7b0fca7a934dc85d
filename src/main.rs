//! nim-arena CLI - Play Nim, run agent arenas and view ratings.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use nim_arena::agent::PlayerSpec;
use nim_arena::game::{DEFAULT_PILE, Variant};
use std::path::PathBuf;
use std::process::ExitCode;

/// nim-arena - Single-pile Nim between humans and agents, with ELO ratings
#[derive(Parser, Debug)]
#[command(name = "nim-arena")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play one game
    Play {
        /// Red player (moves first): human, random, random:<seed>, cmd:<program> [args], name=<spec>
        #[arg(long, default_value = "human")]
        red: PlayerSpec,

        /// Blue player
        #[arg(long, default_value = "random")]
        blue: PlayerSpec,

        /// Rule variant: normal, a, or b
        #[arg(short, long, default_value = "normal")]
        variant: Variant,

        /// Sticks at the start (at least 1)
        #[arg(long, default_value_t = DEFAULT_PILE, value_parser = clap::value_parser!(u32).range(1..))]
        pile: u32,

        /// Seed for random agents (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Result log (default: ~/.nim-arena/results.jsonl)
        #[arg(long, env = "NIM_ARENA_RESULTS")]
        results: Option<PathBuf>,

        /// Do not append the result to the log
        #[arg(long)]
        no_record: bool,

        /// Output format for the final result: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Suppress turn-by-turn output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run every ordered pair of agents against each other
    Arena {
        /// Agent specs (at least 2)
        #[arg(required = true, num_args = 2..)]
        players: Vec<PlayerSpec>,

        /// Games per ordered pair (default: 1)
        #[arg(short, long, default_value = "1")]
        games: u32,

        /// Rule variant: normal, a, or b
        #[arg(short, long, default_value = "normal")]
        variant: Variant,

        /// Sticks at the start (at least 1)
        #[arg(long, default_value_t = DEFAULT_PILE, value_parser = clap::value_parser!(u32).range(1..))]
        pile: u32,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Result log (default: ~/.nim-arena/results.jsonl)
        #[arg(long, env = "NIM_ARENA_RESULTS")]
        results: Option<PathBuf>,

        /// Do not append the results to the log
        #[arg(long)]
        no_record: bool,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Show ELO ratings, global and per variant
    Leaderboard {
        /// Result log (default: ~/.nim-arena/results.jsonl)
        #[arg(long, env = "NIM_ARENA_RESULTS")]
        results: Option<PathBuf>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Maximum rating change per game
        #[arg(long, default_value = "32")]
        k_factor: f64,

        /// Rating of a new player
        #[arg(long, default_value = "1000")]
        initial_rating: f64,
    },

    /// List recorded games, newest first
    Results {
        /// Result log (default: ~/.nim-arena/results.jsonl)
        #[arg(long, env = "NIM_ARENA_RESULTS")]
        results: Option<PathBuf>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show at most this many games
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Play {
            red,
            blue,
            variant,
            pile,
            seed,
            results,
            no_record,
            format,
            quiet,
        } => cli::play::execute(
            &red,
            &blue,
            variant,
            pile,
            seed,
            &cli::RecordTarget::new(results, no_record),
            format,
            quiet,
        ),

        Commands::Arena {
            players,
            games,
            variant,
            pile,
            seed,
            threads,
            results,
            no_record,
            format,
            progress,
        } => cli::arena::execute(
            &players,
            games,
            variant,
            pile,
            seed,
            threads,
            &cli::RecordTarget::new(results, no_record),
            format,
            progress,
        ),

        Commands::Leaderboard {
            results,
            format,
            k_factor,
            initial_rating,
        } => cli::leaderboard::execute(results, format, k_factor, initial_rating),

        Commands::Results {
            results,
            format,
            limit,
        } => cli::results::execute(results, format, limit),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
