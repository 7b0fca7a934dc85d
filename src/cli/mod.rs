//! CLI command implementations for nim-arena.

pub(crate) mod arena;
pub(crate) mod leaderboard;
pub(crate) mod play;
pub(crate) mod results;

mod output;

use clap::ValueEnum;
use nim_arena::arena::ArenaError;
use nim_arena::record::{JsonlStore, default_results_path};
use nim_arena::{PersistenceError, SessionError};
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Output format shared by all commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// Where finished games are appended, if anywhere.
#[derive(Debug, Clone)]
pub(crate) struct RecordTarget {
    path: Option<PathBuf>,
    enabled: bool,
}

impl RecordTarget {
    /// Target from the `--results` and `--no-record` options.
    pub(crate) fn new(path: Option<PathBuf>, no_record: bool) -> Self {
        Self {
            path,
            enabled: !no_record,
        }
    }

    /// Open the store, or `None` when recording is off.
    ///
    /// A missing home directory is only a warning: the game is still
    /// played, it just isn't recorded.
    pub(crate) fn open(&self) -> Option<JsonlStore> {
        if !self.enabled {
            return None;
        }
        match results_path(self.path.clone()) {
            Ok(path) => Some(JsonlStore::new(path)),
            Err(e) => {
                eprintln!("Warning: results will not be recorded: {e}");
                None
            }
        }
    }
}

/// Resolve the result log path, falling back to the default location.
pub(crate) fn results_path(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match path {
        Some(path) => Ok(path),
        None => default_results_path()
            .map_err(|e| CliError::new(format!("Failed to locate result log: {e}"))),
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<PersistenceError> for CliError {
    fn from(e: PersistenceError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ArenaError> for CliError {
    fn from(e: ArenaError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<SessionError> for CliError {
    fn from(e: SessionError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}
