//! Agent that replays a fixed list of raw answers.

use std::collections::VecDeque;

use crate::agent::{Agent, AgentReply, TurnView};
use crate::error::AgentError;

/// Replays raw answers in order, parsing each one like a real reply.
///
/// Running out of answers reports the agent as unavailable.
#[derive(Debug, Clone)]
pub struct ScriptedAgent {
    name: String,
    replies: VecDeque<String>,
}

impl ScriptedAgent {
    /// Agent answering with `replies`, one per turn.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            replies: replies.into_iter().map(Into::into).collect(),
        }
    }

    /// Agent answering with well-formed replies for `moves`.
    #[must_use]
    pub fn from_moves(name: impl Into<String>, moves: &[u32]) -> Self {
        Self::new(
            name,
            moves.iter().map(|m| format!("{{\"move_remove\": {m}}}")),
        )
    }

    /// Answers not yet used.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl Agent for ScriptedAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose(&mut self, _view: &TurnView<'_>) -> Result<AgentReply, AgentError> {
        let raw = self
            .replies
            .pop_front()
            .ok_or_else(|| AgentError::Unavailable(format!("{} has no answers left", self.name)))?;
        AgentReply::parse(&raw)
    }
}
