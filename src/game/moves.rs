//! Compact set of legal move amounts.

use std::fmt;

use serde::{Serialize, Serializer};

/// Largest amount any variant ever allows in a single move.
pub const MAX_MOVE: u32 = 4;

/// A set of move amounts in `1..=MAX_MOVE`.
///
/// Stored as a bit mask so legal-move sets are `Copy` and never allocate.
/// Bit `n` is set when removing `n` sticks is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MoveSet {
    bits: u8,
}

impl MoveSet {
    /// The empty set.
    pub const EMPTY: MoveSet = MoveSet { bits: 0 };

    /// Build a set from a list of amounts, ignoring anything outside `1..=MAX_MOVE`.
    #[must_use]
    pub fn from_amounts(amounts: &[u32]) -> Self {
        let mut set = Self::EMPTY;
        for &amount in amounts {
            set.insert(amount);
        }
        set
    }

    /// Add an amount to the set. Out-of-range amounts are ignored.
    pub fn insert(&mut self, amount: u32) {
        if (1..=MAX_MOVE).contains(&amount) {
            self.bits |= 1 << amount;
        }
    }

    /// Remove an amount from the set.
    pub fn remove(&mut self, amount: u32) {
        if (1..=MAX_MOVE).contains(&amount) {
            self.bits &= !(1 << amount);
        }
    }

    /// Keep only amounts that are at most `max`.
    #[must_use]
    pub fn up_to(self, max: u32) -> Self {
        let mut set = self;
        for amount in (max.saturating_add(1))..=MAX_MOVE {
            set.remove(amount);
        }
        set
    }

    /// Check whether `amount` is in the set.
    #[must_use]
    pub const fn contains(self, amount: u32) -> bool {
        amount >= 1 && amount <= MAX_MOVE && self.bits & (1 << amount) != 0
    }

    /// Number of amounts in the set.
    #[must_use]
    pub fn len(self) -> usize {
        self.iter().count()
    }

    /// True if no move is allowed.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Iterate amounts in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u32> {
        (1..=MAX_MOVE).filter(move |&amount| self.contains(amount))
    }

    /// Amounts as a vector, ascending.
    #[must_use]
    pub fn to_vec(self) -> Vec<u32> {
        self.iter().collect()
    }
}

impl fmt::Display for MoveSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for amount in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{amount}")?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for MoveSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
