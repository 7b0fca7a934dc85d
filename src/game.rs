//! Game layer for the arena.
//!
//! Implements the Nim rules as a pure state machine:
//! - Rule variants and their legal-move sets
//! - Turn alternation between Red and Blue
//! - Win, blocked and forfeit detection
//! - Invariant checks used by tests and fuzzers
//!
//! The state machine knows nothing about players, agents or persistence.

mod invariants;
mod moves;
mod player;
mod state;
mod variant;

pub use invariants::{assert_invariants, check_invariants, InvariantViolation};
pub use moves::{MoveSet, MAX_MOVE};
pub use player::Side;
pub use state::{ForfeitReason, NimGame, Outcome, Status, DEFAULT_PILE};
pub use variant::{ParseVariantError, Variant};
