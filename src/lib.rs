// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Nim arena: single-pile Nim between humans and agents, with ELO ratings.
//!
//! This crate provides:
//! - A game state machine for three rule variants
//! - Sessions that drive a game between human and agent seats, forfeiting
//!   agents that answer badly
//! - An append-only result log and ELO ratings derived from it
//! - Parallel agent-vs-agent arena runs
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Arena runner / CLI front end      │
//! ├─────────────────────────────────────┤
//! │   Session (seats, agents, forfeits) │
//! ├──────────────────┬──────────────────┤
//! │   Game state     │  Result log      │
//! │   machine        │  → ELO ratings   │
//! └──────────────────┴──────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use nim_arena::agent::RandomAgent;
//! use nim_arena::record::{MemoryStore, ResultStore};
//! use nim_arena::rating::{compute_ratings, EloConfig};
//! use nim_arena::session::{GameConfig, Seat, Session};
//!
//! let mut session = Session::new(
//!     GameConfig::default(),
//!     Seat::agent(RandomAgent::new("alpha", 1)),
//!     Seat::agent(RandomAgent::new("beta", 2)),
//! );
//! session.run_until_blocked();
//!
//! let mut store = MemoryStore::new();
//! assert!(session.record(&mut store).unwrap());
//!
//! let ratings = compute_ratings(&store.all_results().unwrap(), None, &EloConfig::default());
//! assert_eq!(ratings.len(), 2);
//! ```

pub mod agent;
pub mod arena;
pub mod error;
pub mod game;
pub mod rating;
pub mod record;
pub mod session;

pub use error::{AgentError, MoveError, PersistenceError, SessionError};

// Re-export key types at crate root for convenience
pub use game::{ForfeitReason, MoveSet, NimGame, Outcome, Side, Status, Variant};
pub use rating::{EloConfig, Ratings, compute_ratings};
pub use record::MatchResult;
pub use session::{Decision, GameConfig, Seat, Session};
