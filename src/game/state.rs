//! Game state management.

use std::fmt;

use serde::Serialize;

use crate::error::MoveError;
use crate::game::{MoveSet, Side, Variant};

/// Starting pile size when none is given.
pub const DEFAULT_PILE: u32 = 21;

/// Why a side forfeited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ForfeitReason {
    /// The side submitted an amount outside the legal-move set.
    IllegalMove {
        /// Amount that was submitted.
        amount: u32,
    },
    /// The side's agent answered with something that is not a move.
    MalformedResponse,
    /// The side's agent could not be reached.
    AgentUnavailable,
}

impl fmt::Display for ForfeitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForfeitReason::IllegalMove { amount } => write!(f, "played an invalid move ({amount})"),
            ForfeitReason::MalformedResponse => write!(f, "gave an unreadable answer"),
            ForfeitReason::AgentUnavailable => write!(f, "could not be reached"),
        }
    }
}

/// Game outcome. `Won` and `Forfeited` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Moves are still being played.
    InProgress,
    /// The side left its opponent without a legal move (usually by taking the last stick).
    Won(Side),
    /// The other side submitted an invalid move or an unusable answer.
    Forfeited {
        /// Side credited with the win.
        winner: Side,
        /// What the losing side did wrong.
        reason: ForfeitReason,
    },
}

impl Outcome {
    /// The winning side, if the game is over.
    #[must_use]
    pub const fn winner(self) -> Option<Side> {
        match self {
            Outcome::InProgress => None,
            Outcome::Won(side) | Outcome::Forfeited { winner: side, .. } => Some(side),
        }
    }
}

/// Read-only projection of a game for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Status {
    /// Sticks remaining.
    pub pile: u32,
    /// Side to move, or the winning mover once the game is won.
    pub turn: Side,
    /// Rule variant in force.
    pub variant: Variant,
    /// Current outcome.
    pub outcome: Outcome,
    /// Moves available to `turn`; empty once the game is over.
    pub legal_moves: MoveSet,
}

/// A single game of Nim.
///
/// All mutation goes through [`NimGame::apply_move`] and
/// [`NimGame::forfeit`]; both either succeed completely or leave the game
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NimGame {
    pile: u32,
    initial_pile: u32,
    variant: Variant,
    history: Vec<u32>,
    turn: Side,
    outcome: Outcome,
}

impl Default for NimGame {
    fn default() -> Self {
        Self::new(Variant::Normal, DEFAULT_PILE)
    }
}

impl NimGame {
    /// Create a new game. Red moves first.
    #[must_use]
    pub fn new(variant: Variant, pile: u32) -> Self {
        // With nothing to take, Red is stuck before the first move.
        let outcome = if variant.legal_moves(pile, None).is_empty() {
            Outcome::Won(Side::Blue)
        } else {
            Outcome::InProgress
        };
        Self {
            pile,
            initial_pile: pile,
            variant,
            history: Vec::new(),
            turn: Side::Red,
            outcome,
        }
    }

    /// Sticks remaining.
    #[must_use]
    pub const fn pile(&self) -> u32 {
        self.pile
    }

    /// Pile size the game started with.
    #[must_use]
    pub const fn initial_pile(&self) -> u32 {
        self.initial_pile
    }

    /// Rule variant in force.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Amounts removed so far, in play order.
    #[must_use]
    pub fn history(&self) -> &[u32] {
        &self.history
    }

    /// Amount removed on the previous turn.
    #[must_use]
    pub fn last_move(&self) -> Option<u32> {
        self.history.last().copied()
    }

    /// Side to move.
    #[must_use]
    pub const fn turn(&self) -> Side {
        self.turn
    }

    /// Current outcome.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Winning side, once the game is over.
    #[must_use]
    pub const fn winner(&self) -> Option<Side> {
        self.outcome.winner()
    }

    /// True while moves can still be played.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.outcome, Outcome::InProgress)
    }

    /// True once at least one move has been played.
    #[must_use]
    pub fn has_started(&self) -> bool {
        !self.history.is_empty()
    }

    /// Change the variant. Only allowed before the first move.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::AlreadyStarted`] if a move has already been
    /// played, or [`MoveError::GameOver`] if the game ended before any move.
    pub fn set_variant(&mut self, variant: Variant) -> Result<(), MoveError> {
        if self.has_started() {
            return Err(MoveError::AlreadyStarted);
        }
        if !self.is_active() {
            return Err(MoveError::GameOver);
        }
        self.variant = variant;
        Ok(())
    }

    /// Moves available to the side to move. Empty once the game is over.
    #[must_use]
    pub fn legal_moves(&self) -> MoveSet {
        if !self.is_active() {
            return MoveSet::EMPTY;
        }
        self.variant.legal_moves(self.pile, self.last_move())
    }

    /// Remove `amount` sticks for the side to move.
    ///
    /// On success the amount is appended to the history. If the opponent is
    /// left without a legal move (the pile is empty, or a blocked
    /// [`Variant::B`] position) the mover wins; otherwise the turn passes.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::GameOver`] if the game is finished, or
    /// [`MoveError::InvalidMove`] if `amount` is not legal. The game is left
    /// unchanged in both cases.
    pub fn apply_move(&mut self, amount: u32) -> Result<(), MoveError> {
        if !self.is_active() {
            return Err(MoveError::GameOver);
        }
        let legal = self.legal_moves();
        if !legal.contains(amount) {
            return Err(MoveError::InvalidMove { amount, legal });
        }

        self.pile -= amount;
        self.history.push(amount);
        if self.variant.legal_moves(self.pile, Some(amount)).is_empty() {
            self.outcome = Outcome::Won(self.turn);
        } else {
            self.turn = self.turn.other();
        }
        Ok(())
    }

    /// End the game because `by` submitted an invalid move or answer.
    ///
    /// The opponent of `by` is credited with the win.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::GameOver`] if the game is already finished.
    pub fn forfeit(&mut self, by: Side, reason: ForfeitReason) -> Result<(), MoveError> {
        if !self.is_active() {
            return Err(MoveError::GameOver);
        }
        self.outcome = Outcome::Forfeited {
            winner: by.other(),
            reason,
        };
        Ok(())
    }

    /// Start over with the same variant and pile size.
    pub fn reset(&mut self) {
        *self = Self::new(self.variant, self.initial_pile);
    }

    /// Projection of the current state.
    #[must_use]
    pub fn status(&self) -> Status {
        Status {
            pile: self.pile,
            turn: self.turn,
            variant: self.variant,
            outcome: self.outcome,
            legal_moves: self.legal_moves(),
        }
    }

    /// Human-readable description of the current state.
    #[must_use]
    pub fn status_message(&self) -> String {
        match self.outcome {
            Outcome::InProgress => format!(
                "{} stick{} left. {} to move ({}).",
                self.pile,
                if self.pile == 1 { "" } else { "s" },
                self.turn,
                self.legal_moves()
            ),
            Outcome::Won(winner) if self.pile == 0 => {
                format!("{winner} wins by taking the last stick!")
            }
            Outcome::Won(winner) => format!(
                "{winner} wins! {} has no legal move with {} stick{} left.",
                winner.other(),
                self.pile,
                if self.pile == 1 { "" } else { "s" }
            ),
            Outcome::Forfeited { winner, reason } => {
                format!("{winner} wins because {} {reason}.", winner.other())
            }
        }
    }
}
