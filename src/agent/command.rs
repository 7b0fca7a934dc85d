//! Agent backed by an external program.
//!
//! The program is started once per turn. It receives one JSON request on
//! stdin and must print its answer on stdout, then exit with status 0. The
//! request carries both ready-made prompts and the raw position, so a wrapper
//! around a language model can forward the prompts while a scripted bot can
//! read the position directly.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;

use crate::agent::random::pick_uniform;
use crate::agent::{Agent, AgentReply, TurnView, system_prompt, user_prompt};
use crate::error::AgentError;
use crate::game::{MoveSet, Side, Variant};

/// Request written to the program's stdin.
#[derive(Debug, Clone, Serialize)]
pub struct AgentRequest<'a> {
    /// System prompt.
    pub system: String,
    /// User prompt.
    pub user: String,
    /// Side to move.
    pub side: Side,
    /// Sticks left.
    pub pile: u32,
    /// Legal amounts.
    pub legal_moves: MoveSet,
    /// Rule variant.
    pub variant: Variant,
    /// Amounts removed so far.
    pub history: &'a [u32],
}

/// Runs `program args...` for every turn.
#[derive(Debug)]
pub struct CommandAgent {
    name: String,
    program: PathBuf,
    args: Vec<String>,
    rng: SmallRng,
}

impl CommandAgent {
    /// Create an agent running `program` with `args`.
    #[must_use]
    pub fn new(name: impl Into<String>, program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Seed the generator that picks the example move in the prompt.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Build the request for a turn.
    pub fn request<'a>(&mut self, view: &TurnView<'a>) -> AgentRequest<'a> {
        let example = pick_uniform(view.legal, &mut self.rng).unwrap_or(1);
        AgentRequest {
            system: system_prompt(view),
            user: user_prompt(view, example),
            side: view.side,
            pile: view.pile,
            legal_moves: view.legal,
            variant: view.variant,
            history: view.history,
        }
    }

    fn unavailable(&self, why: &dyn fmt::Display) -> AgentError {
        AgentError::Unavailable(format!("{}: {why}", self.program.display()))
    }
}

impl Agent for CommandAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose(&mut self, view: &TurnView<'_>) -> Result<AgentReply, AgentError> {
        let request = self.request(view);
        let mut payload = serde_json::to_vec(&request).map_err(|e| self.unavailable(&e))?;
        payload.push(b'\n');

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.unavailable(&e))?;

        if let Some(mut stdin) = child.stdin.take() {
            // A program may answer without reading its input
            if let Err(e) = stdin.write_all(&payload)
                && e.kind() != std::io::ErrorKind::BrokenPipe
            {
                return Err(self.unavailable(&e));
            }
        }

        let output = child.wait_with_output().map_err(|e| self.unavailable(&e))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.unavailable(&format_args!("{} {}", output.status, stderr.trim())));
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| AgentError::MalformedResponse("answer is not UTF-8".to_string()))?;
        AgentReply::parse(&stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::NimGame;

    #[test]
    fn test_request_shape() {
        let mut game = NimGame::new(Variant::B, 21);
        game.apply_move(1).unwrap();
        let mut agent = CommandAgent::new("bot", "bot", Vec::new()).with_seed(3);
        let request = agent.request(&TurnView::of(&game));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["pile"], 20);
        assert_eq!(json["side"], "blue");
        assert_eq!(json["variant"], "b");
        assert_eq!(json["legal_moves"], serde_json::json!([2, 3]));
        assert_eq!(json["history"], serde_json::json!([1]));
        assert!(json["system"].as_str().unwrap().contains("Nim"));
        assert!(json["user"].as_str().unwrap().contains("20 sticks remaining"));
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let game = NimGame::default();
        let mut agent = CommandAgent::new("ghost", "/nonexistent/nim-agent", Vec::new());
        let err = agent.choose(&TurnView::of(&game)).unwrap_err();
        assert!(matches!(err, AgentError::Unavailable(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_program_answer_is_parsed() {
        let game = NimGame::default();
        let mut agent = CommandAgent::new(
            "echo",
            "sh",
            vec!["-c".to_string(), r#"cat > /dev/null; echo '{"move_remove": "2"}'"#.to_string()],
        );
        assert_eq!(agent.choose(&TurnView::of(&game)).unwrap().move_remove, 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_is_unavailable() {
        let game = NimGame::default();
        let mut agent = CommandAgent::new(
            "fail",
            "sh",
            vec!["-c".to_string(), "echo oops >&2; exit 3".to_string()],
        );
        match agent.choose(&TurnView::of(&game)) {
            Err(AgentError::Unavailable(why)) => assert!(why.contains("oops")),
            other => panic!("expected unavailable, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_garbage_answer_is_malformed() {
        let game = NimGame::default();
        let mut agent = CommandAgent::new(
            "chatty",
            "sh",
            vec!["-c".to_string(), "cat > /dev/null; echo 'I take two'".to_string()],
        );
        assert!(matches!(
            agent.choose(&TurnView::of(&game)).unwrap_err(),
            AgentError::MalformedResponse(_)
        ));
    }
}
