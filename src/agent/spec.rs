//! Textual player specifications.
//!
//! ```text
//! human                  a person at the terminal
//! random                 uniform random agent, fresh seed
//! random:<seed>          uniform random agent, fixed seed
//! cmd:<program> [args]   external program, see CommandAgent
//! <name>=<any of above>  same, recorded under <name>
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::agent::{Agent, CommandAgent, RandomAgent};

/// Who controls a seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerKind {
    /// A person entering moves.
    Human,
    /// Built-in random agent.
    Random {
        /// Fixed seed, or `None` to derive one when the agent is built.
        seed: Option<u64>,
    },
    /// External program.
    Command {
        /// Program to run.
        program: String,
        /// Arguments passed on every run.
        args: Vec<String>,
    },
}

/// A parsed player specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSpec {
    name: Option<String>,
    kind: PlayerKind,
}

impl PlayerSpec {
    /// Spec for `kind` under its default name.
    #[must_use]
    pub fn new(kind: PlayerKind) -> Self {
        Self { name: None, kind }
    }

    /// Record the player under `name`.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Who controls the seat.
    #[must_use]
    pub fn kind(&self) -> &PlayerKind {
        &self.kind
    }

    /// True for a human seat.
    #[must_use]
    pub fn is_human(&self) -> bool {
        self.kind == PlayerKind::Human
    }

    /// Identifier used in results and ratings.
    ///
    /// Defaults to `human`, `random`, or the program's file name.
    #[must_use]
    pub fn name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        match &self.kind {
            PlayerKind::Human => "human".to_string(),
            PlayerKind::Random { .. } => "random".to_string(),
            PlayerKind::Command { program, .. } => Path::new(program)
                .file_name()
                .map_or_else(|| program.clone(), |f| f.to_string_lossy().into_owned()),
        }
    }

    /// Build the agent for this seat, or `None` for a human.
    ///
    /// `seed` is used by random agents without a fixed seed and to seed the
    /// example move of command agents, so a whole arena run can be replayed.
    #[must_use]
    pub fn agent(&self, seed: u64) -> Option<Box<dyn Agent>> {
        let name = self.name();
        match &self.kind {
            PlayerKind::Human => None,
            PlayerKind::Random { seed: fixed } => {
                Some(Box::new(RandomAgent::new(name, fixed.unwrap_or(seed))))
            }
            PlayerKind::Command { program, args } => Some(Box::new(
                CommandAgent::new(name, program, args.clone()).with_seed(seed),
            )),
        }
    }
}

impl fmt::Display for PlayerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name}=")?;
        }
        match &self.kind {
            PlayerKind::Human => write!(f, "human"),
            PlayerKind::Random { seed: None } => write!(f, "random"),
            PlayerKind::Random { seed: Some(seed) } => write!(f, "random:{seed}"),
            PlayerKind::Command { program, args } => {
                write!(f, "cmd:{program}")?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                Ok(())
            }
        }
    }
}

/// Invalid player specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePlayerSpecError {
    input: String,
    reason: &'static str,
}

impl fmt::Display for ParsePlayerSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid player '{}': {} (expected human, random, random:<seed> or cmd:<program>)",
            self.input, self.reason
        )
    }
}

impl std::error::Error for ParsePlayerSpecError {}

impl FromStr for PlayerSpec {
    type Err = ParsePlayerSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |reason| ParsePlayerSpecError {
            input: s.to_string(),
            reason,
        };
        let s = s.trim();

        // `name=` prefix, as long as the name itself looks like a name
        let (name, body) = match s.split_once('=') {
            Some((name, body))
                if !name.contains(':') && !name.contains(char::is_whitespace) =>
            {
                if name.is_empty() {
                    return Err(error("empty name"));
                }
                (Some(name.to_string()), body.trim())
            }
            _ => (None, s),
        };

        let kind = match body.split_once(':') {
            None if body.eq_ignore_ascii_case("human") => PlayerKind::Human,
            None if body.eq_ignore_ascii_case("random") => PlayerKind::Random { seed: None },
            Some((head, seed)) if head.eq_ignore_ascii_case("random") => PlayerKind::Random {
                seed: Some(seed.trim().parse().map_err(|_| error("seed is not a number"))?),
            },
            Some((head, command)) if head.eq_ignore_ascii_case("cmd") => {
                let mut words = command.split_whitespace().map(str::to_string);
                let program = words.next().ok_or_else(|| error("missing program"))?;
                PlayerKind::Command {
                    program,
                    args: words.collect(),
                }
            }
            _ => return Err(error("unknown player kind")),
        };

        Ok(Self { name, kind })
    }
}
