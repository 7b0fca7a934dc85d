//! Results command implementation.

use super::output::{format_results_csv, format_results_text};
use super::{CliError, OutputFormat, results_path};
use nim_arena::rating::ResultRow;
use nim_arena::record::{JsonlStore, ResultStore};
use std::path::PathBuf;

/// Execute the results command.
///
/// # Errors
///
/// Returns an error if the result log cannot be read.
pub(crate) fn execute(
    results: Option<PathBuf>,
    format: OutputFormat,
    limit: Option<usize>,
) -> Result<(), CliError> {
    let store = JsonlStore::new(results_path(results)?);
    let log = store.all_results()?;

    let rows: Vec<ResultRow> = log
        .iter()
        .rev()
        .take(limit.unwrap_or(usize::MAX))
        .map(ResultRow::from_result)
        .collect();

    match format {
        OutputFormat::Text => {
            print!("{}", format_results_text(&rows, log.len()));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rows)?;
            println!("{json}");
        }
        OutputFormat::Csv => {
            print!("{}", format_results_csv(&rows));
        }
    }

    Ok(())
}
