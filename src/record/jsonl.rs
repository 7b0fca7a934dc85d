//! JSON Lines result store.
//!
//! One `MatchResult` per line, appended in the order games finish. The file
//! is opened in append mode for every write, so a crash can at worst leave a
//! truncated final line, which is reported as corrupt on the next read.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::PersistenceError;
use crate::record::{MatchResult, ResultStore};

/// Directory name under the home directory holding arena data.
const DATA_SUBDIR: &str = ".nim-arena";

/// File name of the default result log.
const RESULTS_FILE: &str = "results.jsonl";

/// File-backed result store.
#[derive(Debug, Clone)]
pub struct JsonlStore {
    path: PathBuf,
}

impl JsonlStore {
    /// Use the log at `path`. The file is created on first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ResultStore for JsonlStore {
    fn append_result(&mut self, result: &MatchResult) -> Result<(), PersistenceError> {
        let mut line =
            serde_json::to_string(result).map_err(|e| PersistenceError::Encode(e.to_string()))?;
        line.push('\n');

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        file.write_all(line.as_bytes()).map_err(|e| self.io_error(e))?;
        Ok(())
    }

    fn all_results(&self) -> Result<Vec<MatchResult>, PersistenceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            // Nothing recorded yet
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        let mut results = Vec::new();
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let result = serde_json::from_str(line).map_err(|e| PersistenceError::Corrupt {
                line: index + 1,
                message: e.to_string(),
            })?;
            results.push(result);
        }
        Ok(results)
    }
}

/// Get the path to the arena data directory (`~/.nim-arena`).
///
/// Creates the directory if it doesn't exist.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined or directory creation fails.
pub fn data_dir() -> io::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| io::Error::new(io::ErrorKind::NotFound, "cannot determine home directory"))?;

    let data_dir = Path::new(&home).join(DATA_SUBDIR);
    fs::create_dir_all(&data_dir)?;
    Ok(data_dir)
}

/// Get the path of the default result log (`~/.nim-arena/results.jsonl`).
///
/// # Errors
///
/// Returns an error if the data directory cannot be created.
pub fn default_results_path() -> io::Result<PathBuf> {
    Ok(data_dir()?.join(RESULTS_FILE))
}
