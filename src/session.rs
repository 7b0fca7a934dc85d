//! Session orchestrator: one game, two seats.
//!
//! A [`Session`] drives a [`NimGame`] turn by turn. Agent seats are asked
//! for a move in [`Session::step`]; human seats block the session until
//! [`Session::human_move`] is called. An agent that fails to answer, answers
//! garbage, or answers an illegal amount forfeits the game on the spot.
//!
//! ```text
//! step() ──► agent seat? ──yes──► choose() ──ok──► apply_move() ──ok──► Move
//!               │                    │                 │
//!               no                  err           InvalidMove
//!               ▼                    ▼                 ▼
//!         AwaitingHuman           Forfeit           Forfeit
//! ```

mod registry;

pub use registry::SessionRegistry;

use std::fmt;

use crate::agent::{Agent, PlayerSpec, Thoughts, TurnView};
use crate::error::{AgentError, MoveError, PersistenceError, SessionError};
use crate::game::{
    DEFAULT_PILE, ForfeitReason, MoveSet, NimGame, Side, Status, Variant, assert_invariants,
};
use crate::record::{MatchResult, ResultStore, now_timestamp};

/// Variant and pile size for new games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Rule variant.
    pub variant: Variant,
    /// Sticks at the start.
    pub pile: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Normal,
            pile: DEFAULT_PILE,
        }
    }
}

/// Who controls a seat.
pub enum Seat {
    /// A person, identified by name.
    Human(String),
    /// An agent.
    Agent(Box<dyn Agent>),
}

impl Seat {
    /// A human seat.
    #[must_use]
    pub fn human(name: impl Into<String>) -> Self {
        Seat::Human(name.into())
    }

    /// An agent seat.
    #[must_use]
    pub fn agent(agent: impl Agent + 'static) -> Self {
        Seat::Agent(Box::new(agent))
    }

    /// Seat for a parsed player specification.
    #[must_use]
    pub fn from_spec(spec: &PlayerSpec, seed: u64) -> Self {
        match spec.agent(seed) {
            Some(agent) => Seat::Agent(agent),
            None => Seat::Human(spec.name()),
        }
    }

    /// Identifier recorded in results.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Seat::Human(name) => name,
            Seat::Agent(agent) => agent.name(),
        }
    }

    /// True for a human seat.
    #[must_use]
    pub fn is_human(&self) -> bool {
        matches!(self, Seat::Human(_))
    }
}

impl fmt::Debug for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Human(name) => f.debug_tuple("Human").field(name).finish(),
            Seat::Agent(agent) => f.debug_tuple("Agent").field(agent).finish(),
        }
    }
}

/// What happened on one call to [`Session::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The agent to move removed this many sticks.
    Move(u32),
    /// A human is to move; nothing changed.
    AwaitingHuman(MoveSet),
    /// The agent to move forfeited; the game is over.
    Forfeit {
        /// Side that forfeited.
        side: Side,
        /// Why.
        reason: ForfeitReason,
        /// Agent error or rejected answer, for diagnostics.
        detail: String,
    },
}

/// One game between two seats.
#[derive(Debug)]
pub struct Session {
    game: NimGame,
    config: GameConfig,
    seats: [Seat; 2],
    thoughts: [Thoughts; 2],
    recorded: bool,
}

impl Session {
    /// Start a session. Red moves first.
    #[must_use]
    pub fn new(config: GameConfig, red: Seat, blue: Seat) -> Self {
        Self {
            game: NimGame::new(config.variant, config.pile),
            config,
            seats: [red, blue],
            thoughts: [Thoughts::default(), Thoughts::default()],
            recorded: false,
        }
    }

    /// The game being played.
    #[must_use]
    pub fn game(&self) -> &NimGame {
        &self.game
    }

    /// Settings used by [`Session::reset`].
    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Seat of `side`.
    #[must_use]
    pub fn seat(&self, side: Side) -> &Seat {
        &self.seats[side.index()]
    }

    /// Latest reasoning of `side`.
    #[must_use]
    pub fn thoughts(&self, side: Side) -> &Thoughts {
        &self.thoughts[side.index()]
    }

    /// Display projection of the game.
    #[must_use]
    pub fn status(&self) -> Status {
        self.game.status()
    }

    /// Text describing the game state.
    #[must_use]
    pub fn status_message(&self) -> String {
        self.game.status_message()
    }

    /// True once the finished game has been written to a store.
    #[must_use]
    pub fn is_recorded(&self) -> bool {
        self.recorded
    }

    /// Replace who controls `side`. Only allowed before the first move.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyStarted`] once a move has been played.
    pub fn set_seat(&mut self, side: Side, seat: Seat) -> Result<(), SessionError> {
        if self.game.has_started() {
            return Err(SessionError::AlreadyStarted);
        }
        self.seats[side.index()] = seat;
        self.thoughts[side.index()] = Thoughts::default();
        Ok(())
    }

    /// Change the variant of the current and future games. Only allowed
    /// before the first move.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyStarted`] once a move has been played,
    /// or [`SessionError::Move`] if the game ended before any move.
    pub fn set_variant(&mut self, variant: Variant) -> Result<(), SessionError> {
        self.game.set_variant(variant)?;
        self.config.variant = variant;
        Ok(())
    }

    /// Start a new game with the same seats and settings.
    pub fn reset(&mut self) {
        self.game = NimGame::new(self.config.variant, self.config.pile);
        self.thoughts = [Thoughts::default(), Thoughts::default()];
        self.recorded = false;
    }

    /// Advance the game by one turn if an agent is to move.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::GameOver`] if the game has already ended.
    pub fn step(&mut self) -> Result<Decision, MoveError> {
        if !self.game.is_active() {
            return Err(MoveError::GameOver);
        }
        let side = self.game.turn();
        let agent = match &mut self.seats[side.index()] {
            Seat::Human(_) => return Ok(Decision::AwaitingHuman(self.game.legal_moves())),
            Seat::Agent(agent) => agent,
        };

        let reply = match agent.choose(&TurnView::of(&self.game)) {
            Ok(reply) => reply,
            Err(AgentError::MalformedResponse(detail)) => {
                return self.forfeit(side, ForfeitReason::MalformedResponse, detail);
            }
            Err(AgentError::Unavailable(detail)) => {
                return self.forfeit(side, ForfeitReason::AgentUnavailable, detail);
            }
        };

        let amount = reply.move_remove;
        self.thoughts[side.index()] = reply.into();
        match self.game.apply_move(amount) {
            Ok(()) => {
                assert_invariants(&self.game);
                Ok(Decision::Move(amount))
            }
            Err(e @ MoveError::InvalidMove { .. }) => {
                self.forfeit(side, ForfeitReason::IllegalMove { amount }, e.to_string())
            }
            Err(e) => Err(e),
        }
    }

    fn forfeit(
        &mut self,
        side: Side,
        reason: ForfeitReason,
        detail: String,
    ) -> Result<Decision, MoveError> {
        self.game.forfeit(side, reason)?;
        Ok(Decision::Forfeit {
            side,
            reason,
            detail,
        })
    }

    /// Step until a human is to move or the game ends.
    ///
    /// Returns the decisions taken, in order. The last one is
    /// [`Decision::AwaitingHuman`] if the session stopped for a human.
    pub fn run_until_blocked(&mut self) -> Vec<Decision> {
        let mut decisions = Vec::new();
        while let Ok(decision) = self.step() {
            let blocked = matches!(decision, Decision::AwaitingHuman(_));
            decisions.push(decision);
            if blocked {
                break;
            }
        }
        decisions
    }

    /// Play a move for the human seat to move.
    ///
    /// An illegal amount is rejected and leaves the game untouched, so the
    /// caller can ask again.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotHumanTurn`] if an agent is to move and
    /// [`SessionError::Move`] if the game rejects the move.
    pub fn human_move(&mut self, amount: u32) -> Result<(), SessionError> {
        if !self.game.is_active() {
            return Err(SessionError::Move(MoveError::GameOver));
        }
        let side = self.game.turn();
        if !self.seat(side).is_human() {
            return Err(SessionError::NotHumanTurn(side));
        }
        self.game.apply_move(amount)?;
        assert_invariants(&self.game);
        self.thoughts[side.index()] = Thoughts::human(amount);
        Ok(())
    }

    /// Result record of the finished game, or `None` while it is running.
    #[must_use]
    pub fn result(&self, date: u64) -> Option<MatchResult> {
        MatchResult::from_game(
            &self.game,
            self.seats[Side::Red.index()].name(),
            self.seats[Side::Blue.index()].name(),
            date,
        )
    }

    /// Write the finished game to `store`, stamped with the current time.
    ///
    /// See [`Session::record_at`].
    ///
    /// # Errors
    ///
    /// Returns the store's error; the session is unchanged and recording
    /// can be retried.
    pub fn record<S: ResultStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<bool, PersistenceError> {
        self.record_at(store, now_timestamp())
    }

    /// Write the finished game to `store` once.
    ///
    /// Returns `Ok(false)` without writing if the game is still running, was
    /// already recorded, or ended before any move.
    ///
    /// # Errors
    ///
    /// Returns the store's error; the session is unchanged and recording
    /// can be retried.
    pub fn record_at<S: ResultStore + ?Sized>(
        &mut self,
        store: &mut S,
        date: u64,
    ) -> Result<bool, PersistenceError> {
        if self.recorded {
            return Ok(false);
        }
        let Some(result) = self.result(date) else {
            return Ok(false);
        };
        store.append_result(&result)?;
        self.recorded = true;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{RandomAgent, ScriptedAgent};
    use crate::game::Outcome;
    use crate::record::MemoryStore;

    fn scripted(name: &str, moves: &[u32]) -> Seat {
        Seat::agent(ScriptedAgent::from_moves(name, moves))
    }

    #[test]
    fn test_agents_play_to_the_end() {
        let mut session = Session::new(
            GameConfig::default(),
            Seat::agent(RandomAgent::new("r1", 1)),
            Seat::agent(RandomAgent::new("r2", 2)),
        );
        let decisions = session.run_until_blocked();
        assert!(!session.game().is_active());
        assert!(decisions.iter().all(|d| matches!(d, Decision::Move(_))));
        let removed: u32 = decisions
            .iter()
            .map(|d| match d {
                Decision::Move(n) => *n,
                _ => 0,
            })
            .sum();
        assert_eq!(removed, 21);
        assert!(matches!(session.game().outcome(), Outcome::Won(_)));
        assert_eq!(session.step(), Err(MoveError::GameOver));
    }

    #[test]
    fn test_human_blocks_until_move() {
        let mut session = Session::new(
            GameConfig::default(),
            Seat::human("alice"),
            scripted("bot", &[2]),
        );
        let decisions = session.run_until_blocked();
        assert_eq!(decisions, vec![Decision::AwaitingHuman(MoveSet::from_amounts(&[1, 2]))]);
        assert_eq!(session.game().pile(), 21);

        assert_eq!(
            session.human_move(3),
            Err(SessionError::Move(MoveError::InvalidMove {
                amount: 3,
                legal: MoveSet::from_amounts(&[1, 2]),
            }))
        );
        assert_eq!(session.game().pile(), 21);

        session.human_move(1).unwrap();
        assert_eq!(session.thoughts(Side::Red).move_remove, Some(1));
        assert_eq!(session.human_move(1), Err(SessionError::NotHumanTurn(Side::Blue)));

        assert_eq!(session.step(), Ok(Decision::Move(2)));
        assert_eq!(session.game().pile(), 18);
        assert_eq!(session.thoughts(Side::Blue).move_remove, Some(2));
    }

    #[test]
    fn test_illegal_reply_forfeits() {
        let mut session = Session::new(
            GameConfig::default(),
            scripted("red", &[7]),
            scripted("blue", &[]),
        );
        match session.step().unwrap() {
            Decision::Forfeit { side, reason, .. } => {
                assert_eq!(side, Side::Red);
                assert_eq!(reason, ForfeitReason::IllegalMove { amount: 7 });
            }
            other => panic!("expected forfeit, got {other:?}"),
        }
        assert_eq!(session.game().winner(), Some(Side::Blue));
        assert_eq!(session.game().pile(), 21);
    }

    #[test]
    fn test_malformed_reply_forfeits() {
        let mut session = Session::new(
            GameConfig::default(),
            scripted("red", &[1]),
            Seat::agent(ScriptedAgent::new("blue", ["remove two please"])),
        );
        let decisions = session.run_until_blocked();
        assert_eq!(decisions.len(), 2);
        assert!(matches!(
            decisions[1],
            Decision::Forfeit {
                side: Side::Blue,
                reason: ForfeitReason::MalformedResponse,
                ..
            }
        ));
        assert_eq!(session.game().winner(), Some(Side::Red));
    }

    #[test]
    fn test_unavailable_agent_forfeits() {
        let mut session = Session::new(
            GameConfig::default(),
            scripted("red", &[]),
            scripted("blue", &[]),
        );
        assert!(matches!(
            session.step().unwrap(),
            Decision::Forfeit {
                reason: ForfeitReason::AgentUnavailable,
                ..
            }
        ));
    }

    #[test]
    fn test_seats_and_variant_frozen_after_first_move() {
        let mut session = Session::new(
            GameConfig::default(),
            Seat::human("a"),
            Seat::human("b"),
        );
        session.set_variant(Variant::B).unwrap();
        session.set_seat(Side::Blue, scripted("bot", &[1])).unwrap();
        assert_eq!(session.seat(Side::Blue).name(), "bot");

        session.human_move(2).unwrap();
        assert_eq!(session.set_variant(Variant::A), Err(SessionError::AlreadyStarted));
        assert!(matches!(
            session.set_seat(Side::Red, Seat::human("c")),
            Err(SessionError::AlreadyStarted)
        ));
        assert_eq!(session.game().variant(), Variant::B);

        session.reset();
        assert_eq!(session.game().variant(), Variant::B);
        assert_eq!(session.game().pile(), 21);
        assert!(session.thoughts(Side::Red).is_empty());
    }

    #[test]
    fn test_record_once() {
        let mut store = MemoryStore::new();
        let mut session = Session::new(
            GameConfig {
                variant: Variant::Normal,
                pile: 3,
            },
            scripted("red", &[1, 1]),
            scripted("blue", &[1]),
        );
        assert!(!session.record_at(&mut store, 5).unwrap());

        session.run_until_blocked();
        assert_eq!(session.game().winner(), Some(Side::Red));
        assert!(session.record_at(&mut store, 5).unwrap());
        assert!(!session.record_at(&mut store, 6).unwrap());
        assert!(session.is_recorded());

        let all = store.all_results().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].red_player, "red");
        assert!(all[0].red_won);
        assert_eq!(all[0].date, 5);
    }

    #[test]
    fn test_empty_pile_is_not_recorded() {
        let mut store = MemoryStore::new();
        let mut session = Session::new(
            GameConfig {
                variant: Variant::Normal,
                pile: 0,
            },
            scripted("red", &[]),
            scripted("blue", &[]),
        );
        assert!(session.run_until_blocked().is_empty());
        assert!(!session.game().is_active());
        assert!(!session.record_at(&mut store, 5).unwrap());
        assert!(store.is_empty());
    }
}
