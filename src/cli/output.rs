//! Output formatting utilities for CLI.

use nim_arena::arena::{ArenaGame, Standing};
use nim_arena::game::{NimGame, Outcome, Side, Variant};
use nim_arena::rating::{LeaderboardRow, Ratings, ResultRow};
use serde::Serialize;

/// Quote a CSV field if it needs it.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// JSON-serializable result of a single game.
#[derive(Debug, Serialize)]
pub(super) struct JsonGameResult {
    /// Variant played.
    variant: Variant,
    /// Red player identifier.
    red_player: String,
    /// Blue player identifier.
    blue_player: String,
    /// Winning side (null if unfinished).
    winner: Option<Side>,
    /// Final outcome.
    outcome: Outcome,
    /// Amounts removed, in play order.
    history: Vec<u32>,
    /// Whether the result was appended to the log.
    recorded: bool,
}

impl JsonGameResult {
    /// Create from a finished game.
    pub(super) fn from_game(game: &NimGame, names: [&str; 2], recorded: bool) -> Self {
        Self {
            variant: game.variant(),
            red_player: names[0].to_string(),
            blue_player: names[1].to_string(),
            winner: game.winner(),
            outcome: game.outcome(),
            history: game.history().to_vec(),
            recorded,
        }
    }
}

/// Format a finished game as CSV (header plus one row).
pub(super) fn format_game_csv(game: &NimGame, names: [&str; 2]) -> String {
    let mut output = String::new();
    output.push_str("variant,red_player,blue_player,winner,moves,history\n");
    let history: Vec<String> = game.history().iter().map(u32::to_string).collect();
    output.push_str(&format!(
        "{},{},{},{},{},{}\n",
        game.variant(),
        csv_field(names[0]),
        csv_field(names[1]),
        game.winner().map_or_else(String::new, |side| side.to_string()),
        game.history().len(),
        history.join(" ")
    ));
    output
}

/// JSON-serializable arena run.
#[derive(Debug, Serialize)]
pub(super) struct JsonArenaResult<'a> {
    /// Total games played.
    games_played: usize,
    /// Per-entrant tallies.
    standings: &'a [Standing],
    /// Ratings over this batch only.
    ratings: &'a Ratings,
    /// Every game, in fixture order.
    games: &'a [ArenaGame],
}

impl<'a> JsonArenaResult<'a> {
    /// Create from the arena output.
    pub(super) fn new(
        games: &'a [ArenaGame],
        standings: &'a [Standing],
        ratings: &'a Ratings,
    ) -> Self {
        Self {
            games_played: games.len(),
            standings,
            ratings,
            games,
        }
    }
}

/// Format arena standings as human-readable text.
pub(super) fn format_arena_text(
    games: &[ArenaGame],
    standings: &[Standing],
    ratings: &Ratings,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Arena Results ({} games)\n", games.len()));
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for row in standings {
        output.push_str(&format!(
            "  {}: {:.1}% ({} wins, {} losses",
            row.player,
            row.win_rate() * 100.0,
            row.wins,
            row.losses
        ));
        if row.forfeits > 0 {
            output.push_str(&format!(", {} by forfeit", row.forfeits));
        }
        output.push_str(")\n");
    }

    output.push_str("\nBatch Ratings:\n");
    let mut ranked: Vec<(&String, &f64)> = ratings.iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (player, rating) in ranked {
        output.push_str(&format!("  {player}: {rating:.0}\n"));
    }

    output
}

/// Format arena standings as CSV.
pub(super) fn format_arena_csv(standings: &[Standing], ratings: &Ratings) -> String {
    let mut output = String::new();

    // Header
    output.push_str("player,games,wins,losses,forfeits,win_rate,rating\n");

    // Data rows
    for row in standings {
        let rating = ratings.get(&row.player).map_or_else(String::new, |r| format!("{r:.1}"));
        output.push_str(&format!(
            "{},{},{},{},{},{:.4},{}\n",
            csv_field(&row.player),
            row.games,
            row.wins,
            row.losses,
            row.forfeits,
            row.win_rate(),
            rating
        ));
    }

    output
}

/// Format the ratings table as human-readable text.
pub(super) fn format_leaderboard_text(
    rows: &[LeaderboardRow],
    games: usize,
    anomalies: usize,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Leaderboard ({games} games)\n"));
    output.push_str("========================================\n\n");

    if rows.is_empty() {
        output.push_str("  No rated games yet.\n");
        return output;
    }

    let width = rows.iter().map(|r| r.player.len()).max().unwrap_or(0).max("Player".len());
    output.push_str(&format!(
        "  {:<4} {:<width$} {:>7} {:>7} {:>7} {:>7}\n",
        "#", "Player", "Global", "Normal", "A", "B"
    ));
    for (rank, row) in rows.iter().enumerate() {
        output.push_str(&format!(
            "  {:<4} {:<width$} {:>7} {:>7} {:>7} {:>7}\n",
            rank + 1,
            row.player,
            row.global,
            row.normal,
            row.a,
            row.b
        ));
    }

    if anomalies > 0 {
        output.push_str(&format!(
            "\n  {anomalies} record(s) mark both players as winners; scored as draws.\n"
        ));
    }

    output
}

/// Format the ratings table as CSV.
pub(super) fn format_leaderboard_csv(rows: &[LeaderboardRow]) -> String {
    let mut output = String::new();

    // Header
    output.push_str("rank,player,global,normal,a,b\n");

    // Data rows
    for (rank, row) in rows.iter().enumerate() {
        output.push_str(&format!(
            "{},{},{},{},{},{}\n",
            rank + 1,
            csv_field(&row.player),
            row.global,
            row.normal,
            row.a,
            row.b
        ));
    }

    output
}

/// Format the game listing as human-readable text.
pub(super) fn format_results_text(rows: &[ResultRow], total: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("Games ({} of {total}, newest first)\n", rows.len()));
    output.push_str("========================================\n\n");

    for row in rows {
        output.push_str(&format!(
            "  {}  {:<6}  {} vs {}  -> {}\n",
            row.date, row.variant, row.red_player, row.blue_player, row.winner
        ));
    }

    output
}

/// Format the game listing as CSV.
pub(super) fn format_results_csv(rows: &[ResultRow]) -> String {
    let mut output = String::new();

    // Header
    output.push_str("date,variant,red_player,blue_player,winner\n");

    // Data rows
    for row in rows {
        output.push_str(&format!(
            "{},{},{},{},{}\n",
            row.date,
            row.variant,
            csv_field(&row.red_player),
            csv_field(&row.blue_player),
            row.winner
        ));
    }

    output
}
