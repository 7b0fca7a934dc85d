//! Append-only log of finished games.
//!
//! Every finished game becomes one [`MatchResult`]. The ordered log of
//! results is the only input to rating computation; records are never
//! updated or deleted.
//!
//! Two stores are provided:
//! - [`JsonlStore`]: one JSON object per line in a file (the default on disk)
//! - [`MemoryStore`]: a vector, for tests and dry runs

mod jsonl;
mod result;
mod store;
mod time;

pub use jsonl::{data_dir, default_results_path, JsonlStore};
pub use result::MatchResult;
pub use store::{MemoryStore, ResultStore};
pub use time::{format_timestamp, now_timestamp};
