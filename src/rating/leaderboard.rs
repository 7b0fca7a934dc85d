//! Combined leaderboard: global and per-variant ratings side by side.

// Ratings are rounded to whole points for display
#![allow(clippy::cast_possible_truncation)]

use std::collections::BTreeSet;

use serde::Serialize;

use crate::game::Variant;
use crate::rating::{compute_ratings, EloConfig, Ratings};
use crate::record::{format_timestamp, MatchResult};

/// One player's ratings, rounded to whole points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardRow {
    /// Player identifier.
    pub player: String,
    /// Rating over all variants.
    pub global: i64,
    /// Rating over normal games only.
    pub normal: i64,
    /// Rating over variant A games only.
    pub a: i64,
    /// Rating over variant B games only.
    pub b: i64,
}

/// One finished game, formatted for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    /// Finish time, `YYYY-MM-DD HH:MM:SS` UTC.
    pub date: String,
    /// Variant played.
    pub variant: Variant,
    /// Red player identifier.
    pub red_player: String,
    /// Blue player identifier.
    pub blue_player: String,
    /// "Red", "Blue" or "Draw".
    pub winner: String,
}

impl ResultRow {
    /// Format a stored record.
    #[must_use]
    pub fn from_result(result: &MatchResult) -> Self {
        Self {
            date: format_timestamp(result.date),
            variant: result.variant,
            red_player: result.red_player.clone(),
            blue_player: result.blue_player.clone(),
            winner: result.winner_label().to_string(),
        }
    }
}

/// Ratings table plus the game listing it was computed from.
#[derive(Debug, Clone, Serialize)]
pub struct Leaderboard {
    /// Players sorted by global rating, best first.
    pub ratings: Vec<LeaderboardRow>,
    /// Games, newest first.
    pub results: Vec<ResultRow>,
    /// Records marking both sides as winners (scored as draws).
    pub anomalies: usize,
}

impl Leaderboard {
    /// Build the leaderboard from an ordered result log.
    ///
    /// The four rating tables are independent folds over the same log and
    /// are computed in parallel. A player missing from a per-variant table
    /// is shown at the initial rating.
    #[must_use]
    pub fn build(results: &[MatchResult], config: &EloConfig) -> Self {
        let table = |filter| compute_ratings(results, filter, config);
        let ((global, normal), (a, b)) = rayon::join(
            || rayon::join(|| table(None), || table(Some(Variant::Normal))),
            || rayon::join(|| table(Some(Variant::A)), || table(Some(Variant::B))),
        );

        let players: BTreeSet<&String> = global
            .keys()
            .chain(normal.keys())
            .chain(a.keys())
            .chain(b.keys())
            .collect();

        let points = |table: &Ratings, player: &str| -> i64 {
            table
                .get(player)
                .copied()
                .unwrap_or(config.initial_rating)
                .round() as i64
        };

        let mut ratings: Vec<LeaderboardRow> = players
            .into_iter()
            .map(|player| LeaderboardRow {
                player: player.clone(),
                global: points(&global, player),
                normal: points(&normal, player),
                a: points(&a, player),
                b: points(&b, player),
            })
            .collect();
        ratings.sort_by(|x, y| y.global.cmp(&x.global).then_with(|| x.player.cmp(&y.player)));

        Self {
            ratings,
            results: results.iter().rev().map(ResultRow::from_result).collect(),
            anomalies: results.iter().filter(|r| r.is_anomalous()).count(),
        }
    }
}
