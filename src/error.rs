//! Error types for the arena.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::game::{MoveSet, Side};

/// Rejection of a move by the game state machine.
///
/// A rejected move never changes the game: the caller may re-prompt or
/// forfeit the offending side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The amount is not in the current legal-move set.
    InvalidMove {
        /// Amount that was submitted.
        amount: u32,
        /// Moves that were legal at the time.
        legal: MoveSet,
    },
    /// The game already has a winner.
    GameOver,
    /// The change is only allowed before the first move.
    AlreadyStarted,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::InvalidMove { amount, legal } => {
                write!(f, "invalid move: {amount} (legal moves: {legal})")
            }
            MoveError::GameOver => write!(f, "the game is over"),
            MoveError::AlreadyStarted => write!(f, "a move has already been played"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Failure of an external agent to produce a usable answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// The agent answered, but the answer is not a parseable move.
    MalformedResponse(String),
    /// The agent could not be reached or exited abnormally.
    Unavailable(String),
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentError::MalformedResponse(why) => write!(f, "malformed agent response: {why}"),
            AgentError::Unavailable(why) => write!(f, "agent unavailable: {why}"),
        }
    }
}

impl std::error::Error for AgentError {}

/// Failure of the result store.
///
/// Recording is best effort: a persistence failure is reported to the caller
/// and never touches in-memory game state.
#[derive(Debug)]
pub enum PersistenceError {
    /// The backing file could not be opened, read or written.
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A stored line could not be decoded.
    Corrupt {
        /// 1-based line number in the store.
        line: usize,
        /// Decoder message.
        message: String,
    },
    /// A record could not be encoded.
    Encode(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Io { path, source } => {
                write!(f, "result store {} unavailable: {source}", path.display())
            }
            PersistenceError::Corrupt { line, message } => {
                write!(f, "corrupt result record at line {line}: {message}")
            }
            PersistenceError::Encode(message) => {
                write!(f, "failed to encode result record: {message}")
            }
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Error returned by session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The underlying game rejected the move.
    Move(MoveError),
    /// A human move was submitted while an agent seat is to move.
    NotHumanTurn(Side),
    /// Seats and variant are frozen once the first move is played.
    AlreadyStarted,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Move(e) => write!(f, "{e}"),
            SessionError::NotHumanTurn(side) => {
                write!(f, "{side} is not controlled by a human")
            }
            SessionError::AlreadyStarted => write!(f, "the game has already started"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<MoveError> for SessionError {
    fn from(e: MoveError) -> Self {
        match e {
            MoveError::AlreadyStarted => SessionError::AlreadyStarted,
            other => SessionError::Move(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_move_display_lists_legal_moves() {
        let err = MoveError::InvalidMove {
            amount: 5,
            legal: MoveSet::from_amounts(&[1, 2]),
        };
        assert_eq!(err.to_string(), "invalid move: 5 (legal moves: 1, 2)");
    }

    #[test]
    fn test_persistence_error_keeps_source() {
        use std::error::Error;

        let err = PersistenceError::Io {
            path: PathBuf::from("/nowhere/results.jsonl"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("/nowhere/results.jsonl"));
    }

    #[test]
    fn test_session_error_from_move_error() {
        let err: SessionError = MoveError::GameOver.into();
        assert_eq!(err, SessionError::Move(MoveError::GameOver));
        assert_eq!(err.to_string(), "the game is over");

        let err: SessionError = MoveError::AlreadyStarted.into();
        assert_eq!(err, SessionError::AlreadyStarted);
    }
}
