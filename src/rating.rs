//! ELO ratings from the result log.
//!
//! Ratings are never stored. They are a pure function of the ordered log:
//! `(results, variant filter, config) -> player -> rating`.
//!
//! - Results are folded strictly in the order given
//! - Self-play records are skipped
//! - Both players of a match are updated from their pre-match ratings
//! - Per-variant ratings filter the log first and run the same fold; they are
//!   independent of the global table

mod leaderboard;

pub use leaderboard::{Leaderboard, LeaderboardRow, ResultRow};

use std::collections::BTreeMap;

use crate::game::Variant;
use crate::record::MatchResult;

/// Ratings by player identifier.
pub type Ratings = BTreeMap<String, f64>;

/// ELO parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EloConfig {
    /// Maximum rating change per match.
    pub k_factor: f64,
    /// Rating of a player before their first match.
    pub initial_rating: f64,
}

impl Default for EloConfig {
    fn default() -> Self {
        Self {
            k_factor: 32.0,
            initial_rating: 1000.0,
        }
    }
}

/// Expected score of a player rated `rating_a` against one rated `rating_b`.
///
/// `1 / (1 + 10^((rating_b - rating_a) / 400))`
#[must_use]
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10_f64.powf((rating_b - rating_a) / 400.0))
}

/// Actual scores of a match, Red first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchScore {
    /// Red's score: 1 win, 0.5 draw, 0 loss.
    pub red: f64,
    /// Blue's score.
    pub blue: f64,
}

impl MatchScore {
    /// Score a record. Anything but a clean win for one side counts as a
    /// draw, including the anomalous double win.
    #[must_use]
    pub fn of(result: &MatchResult) -> Self {
        match (result.red_won, result.blue_won) {
            (true, false) => Self { red: 1.0, blue: 0.0 },
            (false, true) => Self { red: 0.0, blue: 1.0 },
            _ => Self { red: 0.5, blue: 0.5 },
        }
    }
}

/// Rating change produced by one match.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingUpdate {
    /// Red player identifier.
    pub red_player: String,
    /// Blue player identifier.
    pub blue_player: String,
    /// Red's rating before the match.
    pub red_before: f64,
    /// Blue's rating before the match.
    pub blue_before: f64,
    /// Red's rating after the match.
    pub red_after: f64,
    /// Blue's rating after the match.
    pub blue_after: f64,
}

impl RatingUpdate {
    /// Red's rating change.
    #[must_use]
    pub fn red_delta(&self) -> f64 {
        self.red_after - self.red_before
    }

    /// Blue's rating change.
    #[must_use]
    pub fn blue_delta(&self) -> f64 {
        self.blue_after - self.blue_before
    }
}

/// Incremental rating accumulator.
///
/// Feed results in chronological order with [`EloCalculator::apply`].
#[derive(Debug, Clone, Default)]
pub struct EloCalculator {
    config: EloConfig,
    ratings: Ratings,
}

impl EloCalculator {
    /// Create an empty calculator.
    #[must_use]
    pub fn new(config: EloConfig) -> Self {
        Self {
            config,
            ratings: Ratings::new(),
        }
    }

    /// Current rating of a player, or the initial rating if unseen.
    #[must_use]
    pub fn rating(&self, player: &str) -> f64 {
        self.ratings
            .get(player)
            .copied()
            .unwrap_or(self.config.initial_rating)
    }

    /// Fold one result into the ratings.
    ///
    /// Returns `None` for self-play, which leaves all ratings untouched.
    pub fn apply(&mut self, result: &MatchResult) -> Option<RatingUpdate> {
        if result.is_self_play() {
            return None;
        }

        let red_before = self.rating(&result.red_player);
        let blue_before = self.rating(&result.blue_player);

        let expected_red = expected_score(red_before, blue_before);
        let expected_blue = 1.0 - expected_red;
        let score = MatchScore::of(result);

        // R' = R + K * (S - E), both sides from pre-match ratings
        let red_after = red_before + self.config.k_factor * (score.red - expected_red);
        let blue_after = blue_before + self.config.k_factor * (score.blue - expected_blue);

        self.ratings.insert(result.red_player.clone(), red_after);
        self.ratings.insert(result.blue_player.clone(), blue_after);

        Some(RatingUpdate {
            red_player: result.red_player.clone(),
            blue_player: result.blue_player.clone(),
            red_before,
            blue_before,
            red_after,
            blue_after,
        })
    }

    /// Ratings of every player seen so far.
    #[must_use]
    pub fn ratings(&self) -> &Ratings {
        &self.ratings
    }

    /// Consume the calculator, returning the ratings.
    #[must_use]
    pub fn into_ratings(self) -> Ratings {
        self.ratings
    }
}

/// Compute ratings from an ordered result log.
///
/// With a `variant` filter only records of that variant are folded. Players
/// that appear in no processed match are absent from the output.
#[must_use]
pub fn compute_ratings(
    results: &[MatchResult],
    variant: Option<Variant>,
    config: &EloConfig,
) -> Ratings {
    let mut calculator = EloCalculator::new(*config);
    for result in results
        .iter()
        .filter(|r| variant.is_none_or(|v| r.variant == v))
    {
        calculator.apply(result);
    }
    calculator.into_ratings()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(red: &str, blue: &str, red_won: bool, blue_won: bool, variant: Variant) -> MatchResult {
        MatchResult {
            red_player: red.to_string(),
            blue_player: blue.to_string(),
            variant,
            red_won,
            blue_won,
            date: 0,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_expected_score_equal_ratings() {
        assert!(approx(expected_score(1000.0, 1000.0), 0.5));
    }

    #[test]
    fn test_expected_score_400_points() {
        // A 400 point edge means 10:1 odds.
        assert!(approx(expected_score(1400.0, 1000.0), 10.0 / 11.0));
        assert!(approx(expected_score(1000.0, 1400.0), 1.0 / 11.0));
    }

    #[test]
    fn test_single_win_moves_16_points() {
        let ratings = compute_ratings(
            &[result("A", "B", true, false, Variant::Normal)],
            None,
            &EloConfig::default(),
        );
        assert!(approx(ratings["A"], 1016.0));
        assert!(approx(ratings["B"], 984.0));
    }

    #[test]
    fn test_draw_between_equals_changes_nothing() {
        let ratings = compute_ratings(
            &[result("A", "B", false, false, Variant::Normal)],
            None,
            &EloConfig::default(),
        );
        assert!(approx(ratings["A"], 1000.0));
        assert!(approx(ratings["B"], 1000.0));
    }

    #[test]
    fn test_double_win_scored_as_draw() {
        let log = [
            result("A", "B", true, false, Variant::Normal),
            result("A", "B", true, true, Variant::Normal),
        ];
        let anomalous = compute_ratings(&log, None, &EloConfig::default());
        let draw = compute_ratings(
            &[log[0].clone(), result("A", "B", false, false, Variant::Normal)],
            None,
            &EloConfig::default(),
        );
        assert_eq!(anomalous.len(), draw.len());
        assert!(approx(anomalous["A"], draw["A"]));
        assert!(approx(anomalous["B"], draw["B"]));
    }

    #[test]
    fn test_self_play_skipped() {
        let mut calculator = EloCalculator::new(EloConfig::default());
        assert!(calculator.apply(&result("A", "A", true, false, Variant::Normal)).is_none());
        assert!(calculator.ratings().is_empty());
    }

    #[test]
    fn test_order_matters() {
        let config = EloConfig::default();
        let log = [
            result("A", "B", true, false, Variant::Normal),
            result("B", "C", true, false, Variant::Normal),
            result("C", "A", true, false, Variant::Normal),
        ];
        let forward = compute_ratings(&log, None, &config);
        let reversed: Vec<_> = log.iter().rev().cloned().collect();
        let backward = compute_ratings(&reversed, None, &config);
        assert!(!approx(forward["A"], backward["A"]));
    }

    #[test]
    fn test_variant_filter_is_independent() {
        let config = EloConfig::default();
        let log = [
            result("A", "B", true, false, Variant::Normal),
            result("A", "C", false, true, Variant::B),
        ];
        let normal = compute_ratings(&log, Some(Variant::Normal), &config);
        let b = compute_ratings(&log, Some(Variant::B), &config);
        let a = compute_ratings(&log, Some(Variant::A), &config);

        assert_eq!(normal.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(b.keys().collect::<Vec<_>>(), vec!["A", "C"]);
        assert!(a.is_empty());
        // In variant B, A starts fresh at 1000 rather than at the global 1016.
        assert!(approx(b["A"], 984.0));
    }

    #[test]
    fn test_update_is_zero_sum() {
        let mut calculator = EloCalculator::new(EloConfig::default());
        calculator.apply(&result("A", "B", true, false, Variant::A));
        let update = calculator
            .apply(&result("C", "A", true, false, Variant::A))
            .unwrap();
        assert!(approx(update.red_delta(), -update.blue_delta()));
        assert!(update.red_delta() > 16.0);
    }

    #[test]
    fn test_custom_config() {
        let config = EloConfig {
            k_factor: 10.0,
            initial_rating: 1500.0,
        };
        let ratings = compute_ratings(&[result("A", "B", false, true, Variant::A)], None, &config);
        assert!(approx(ratings["A"], 1495.0));
        assert!(approx(ratings["B"], 1505.0));
    }
}
