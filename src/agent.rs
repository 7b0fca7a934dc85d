//! Agents: whoever picks the move for a seat that is not played by a human.
//!
//! An agent sees a [`TurnView`] and answers with an [`AgentReply`]. The reply
//! is not checked against the legal moves here; the session does that and
//! forfeits the seat on an illegal amount.
//!
//! Built-in agents:
//! - [`RandomAgent`]: uniform pick among the legal moves, seeded
//! - [`ScriptedAgent`]: replays fixed raw answers, mainly for tests
//! - [`CommandAgent`]: runs an external program once per turn

mod command;
mod prompt;
mod random;
mod reply;
mod scripted;
mod spec;

pub use command::{AgentRequest, CommandAgent};
pub use prompt::{system_prompt, user_prompt};
pub use random::RandomAgent;
pub use reply::{AgentReply, Thoughts};
pub use scripted::ScriptedAgent;
pub use spec::{ParsePlayerSpecError, PlayerKind, PlayerSpec};

use std::fmt;

use crate::error::AgentError;
use crate::game::{MoveSet, NimGame, Side, Variant};

/// What an agent is shown before choosing a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnView<'a> {
    /// Side to move.
    pub side: Side,
    /// Sticks left.
    pub pile: u32,
    /// Legal amounts for this turn. Never empty while the game is active.
    pub legal: MoveSet,
    /// Rule variant.
    pub variant: Variant,
    /// Amounts removed so far, in play order.
    pub history: &'a [u32],
}

impl<'a> TurnView<'a> {
    /// View of the side to move in `game`.
    #[must_use]
    pub fn of(game: &'a NimGame) -> Self {
        Self {
            side: game.turn(),
            pile: game.pile(),
            legal: game.legal_moves(),
            variant: game.variant(),
            history: game.history(),
        }
    }
}

/// A move source for one seat.
pub trait Agent: fmt::Debug + Send {
    /// Identifier recorded in results and used for ratings.
    fn name(&self) -> &str;

    /// Choose a move for the position in `view`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::MalformedResponse`] if the answer cannot be
    /// parsed and [`AgentError::Unavailable`] if the agent cannot be reached.
    fn choose(&mut self, view: &TurnView<'_>) -> Result<AgentReply, AgentError>;
}
