//! Match result record.

use serde::{Deserialize, Serialize};

use crate::game::{NimGame, Outcome, Side, Variant};

/// Result of one finished game, as stored in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Identifier of the Red seat (model or human name).
    pub red_player: String,
    /// Identifier of the Blue seat.
    pub blue_player: String,
    /// Variant the game was played under.
    pub variant: Variant,
    /// Red won.
    pub red_won: bool,
    /// Blue won.
    pub blue_won: bool,
    /// When the game finished (Unix seconds, UTC).
    pub date: u64,
}

impl MatchResult {
    /// Build a record for a finished game.
    ///
    /// Returns `None` while the game is still in progress, and for a game
    /// that was over before any move (an empty pile), which has nothing to
    /// rate. A forfeit credits the side that did not forfeit.
    #[must_use]
    pub fn from_game(
        game: &NimGame,
        red_player: impl Into<String>,
        blue_player: impl Into<String>,
        date: u64,
    ) -> Option<Self> {
        if !game.has_started() && matches!(game.outcome(), Outcome::Won(_)) {
            return None;
        }
        let winner = game.winner()?;
        Some(Self {
            red_player: red_player.into(),
            blue_player: blue_player.into(),
            variant: game.variant(),
            red_won: winner == Side::Red,
            blue_won: winner == Side::Blue,
            date,
        })
    }

    /// The winning side, or `None` for a draw or an anomalous record.
    #[must_use]
    pub const fn winner(&self) -> Option<Side> {
        match (self.red_won, self.blue_won) {
            (true, false) => Some(Side::Red),
            (false, true) => Some(Side::Blue),
            _ => None,
        }
    }

    /// Both sides marked as winners. Never produced by a game; only found in
    /// hand-edited or imported logs.
    #[must_use]
    pub const fn is_anomalous(&self) -> bool {
        self.red_won && self.blue_won
    }

    /// Both seats were played by the same identifier.
    #[must_use]
    pub fn is_self_play(&self) -> bool {
        self.red_player == self.blue_player
    }

    /// Label for listings: "Red", "Blue" or "Draw".
    #[must_use]
    pub fn winner_label(&self) -> &'static str {
        match self.winner() {
            Some(Side::Red) => "Red",
            Some(Side::Blue) => "Blue",
            None => "Draw",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ForfeitReason;

    #[test]
    fn test_unfinished_game_has_no_record() {
        let game = NimGame::default();
        assert!(MatchResult::from_game(&game, "a", "b", 0).is_none());
    }

    #[test]
    fn test_record_from_won_game() {
        let mut game = NimGame::new(Variant::A, 4);
        game.apply_move(4).unwrap();
        let record = MatchResult::from_game(&game, "alpha", "beta", 1_700_000_000).unwrap();
        assert!(record.red_won);
        assert!(!record.blue_won);
        assert_eq!(record.variant, Variant::A);
        assert_eq!(record.winner_label(), "Red");
    }

    #[test]
    fn test_forfeit_credits_opponent() {
        let mut game = NimGame::default();
        game.forfeit(Side::Red, ForfeitReason::MalformedResponse).unwrap();
        let record = MatchResult::from_game(&game, "alpha", "beta", 0).unwrap();
        assert_eq!(record.winner(), Some(Side::Blue));
    }

    #[test]
    fn test_empty_pile_game_has_no_record() {
        let game = NimGame::new(Variant::Normal, 0);
        assert_eq!(game.winner(), Some(Side::Blue));
        assert!(MatchResult::from_game(&game, "a", "b", 0).is_none());
    }

    #[test]
    fn test_first_turn_forfeit_is_recorded() {
        let mut game = NimGame::default();
        game.forfeit(Side::Red, ForfeitReason::AgentUnavailable).unwrap();
        assert!(!game.has_started());
        assert!(MatchResult::from_game(&game, "a", "b", 0).is_some());
    }

    #[test]
    fn test_anomalous_record() {
        let record = MatchResult {
            red_player: "x".into(),
            blue_player: "y".into(),
            variant: Variant::Normal,
            red_won: true,
            blue_won: true,
            date: 0,
        };
        assert!(record.is_anomalous());
        assert_eq!(record.winner(), None);
        assert_eq!(record.winner_label(), "Draw");
    }

    #[test]
    fn test_json_shape() {
        let record = MatchResult {
            red_player: "x".into(),
            blue_player: "x".into(),
            variant: Variant::B,
            red_won: false,
            blue_won: true,
            date: 42,
        };
        assert!(record.is_self_play());
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"red_player":"x","blue_player":"x","variant":"b","red_won":false,"blue_won":true,"date":42}"#
        );
    }
}
