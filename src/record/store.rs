//! Result store interface.

use crate::error::PersistenceError;
use crate::record::MatchResult;

/// Append-only storage for match results.
///
/// Implementations must return results in the order they were appended.
pub trait ResultStore {
    /// Append one record at the end of the log.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn append_result(&mut self, result: &MatchResult) -> Result<(), PersistenceError>;

    /// All records, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or holds a corrupt record.
    fn all_results(&self) -> Result<Vec<MatchResult>, PersistenceError>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    results: Vec<MatchResult>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl ResultStore for MemoryStore {
    fn append_result(&mut self, result: &MatchResult) -> Result<(), PersistenceError> {
        self.results.push(result.clone());
        Ok(())
    }

    fn all_results(&self) -> Result<Vec<MatchResult>, PersistenceError> {
        Ok(self.results.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Variant;

    fn result(red: &str, date: u64) -> MatchResult {
        MatchResult {
            red_player: red.to_string(),
            blue_player: "blue".to_string(),
            variant: Variant::Normal,
            red_won: true,
            blue_won: false,
            date,
        }
    }

    #[test]
    fn test_memory_store_preserves_order() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        store.append_result(&result("first", 2)).unwrap();
        store.append_result(&result("second", 1)).unwrap();

        let all = store.all_results().unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(all[0].red_player, "first");
        assert_eq!(all[1].red_player, "second");
    }
}
