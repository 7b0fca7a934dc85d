//! Uniform random agent.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::agent::{Agent, AgentReply, TurnView};
use crate::error::AgentError;
use crate::game::MoveSet;

/// Picks uniformly among the legal moves.
///
/// Seeded, so a game between random agents is reproducible.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    name: String,
    rng: SmallRng,
}

impl RandomAgent {
    /// Create an agent with a fixed seed.
    #[must_use]
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

/// Pick one amount of `legal` uniformly, or `None` if it is empty.
pub(crate) fn pick_uniform(legal: MoveSet, rng: &mut impl Rng) -> Option<u32> {
    if legal.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..legal.len());
    legal.iter().nth(index)
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose(&mut self, view: &TurnView<'_>) -> Result<AgentReply, AgentError> {
        let amount = pick_uniform(view.legal, &mut self.rng)
            .ok_or_else(|| AgentError::Unavailable("no legal move to choose from".to_string()))?;
        Ok(AgentReply {
            strategy: format!("Random pick among {}", view.legal),
            ..AgentReply::with_move(amount)
        })
    }
}
