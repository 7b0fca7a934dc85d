//! Game invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger for a game that was only mutated through
//! `apply_move` and `forfeit`. If they do, it indicates a bug in the state
//! machine.

use crate::game::{NimGame, Outcome, Variant};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(game: &NimGame) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let history = game.history();

    // Conservation of sticks
    let removed: u64 = history.iter().map(|&amount| u64::from(amount)).sum();
    if removed + u64::from(game.pile()) != u64::from(game.initial_pile()) {
        violations.push(InvariantViolation {
            message: format!(
                "history removes {removed} and {} remain, but the game started with {}",
                game.pile(),
                game.initial_pile()
            ),
        });
    }

    // Every recorded move must have been legal in the position it was played
    let mut pile = game.initial_pile();
    let mut last = None;
    for (turn, &amount) in history.iter().enumerate() {
        let legal = game.variant().legal_moves(pile, last);
        if !legal.contains(amount) {
            violations.push(InvariantViolation {
                message: format!(
                    "move {turn} removed {amount} from {pile}, legal moves were [{legal}]"
                ),
            });
            break;
        }
        pile -= amount;
        last = Some(amount);
    }

    if game.variant() == Variant::B
        && let Some(pair) = history.windows(2).find(|w| w[0] == w[1])
    {
        violations.push(InvariantViolation {
            message: format!("variant B history repeats {} on consecutive turns", pair[0]),
        });
    }

    match game.outcome() {
        Outcome::InProgress => {
            if game.legal_moves().is_empty() {
                violations.push(InvariantViolation {
                    message: format!("active game with {} sticks has no legal move", game.pile()),
                });
            }
        }
        Outcome::Won(_) => {
            let stuck = game.variant().legal_moves(game.pile(), game.last_move()).is_empty();
            if !stuck {
                violations.push(InvariantViolation {
                    message: format!("game won with {} sticks still playable", game.pile()),
                });
            }
        }
        Outcome::Forfeited { .. } => {}
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(game: &NimGame) {
    let violations = check_invariants(game);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_game: &NimGame) {}
