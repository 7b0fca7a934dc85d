//! Play command implementation.

use super::output::{JsonGameResult, format_game_csv};
use super::{CliError, OutputFormat, RecordTarget};
use nim_arena::agent::PlayerSpec;
use nim_arena::game::{Side, Variant};
use nim_arena::session::{Decision, GameConfig, Seat, Session};
use std::io::{self, BufRead, Write};

/// Render the pile as groups of five sticks.
fn render_sticks(pile: u32) -> String {
    let mut out = String::new();
    for i in 0..pile {
        if i > 0 && i % 5 == 0 {
            out.push(' ');
        }
        out.push('|');
    }
    out
}

/// Ask the terminal for a move until the session accepts one.
fn read_human_move(session: &mut Session, input: &mut impl BufRead) -> Result<(), CliError> {
    let side = session.game().turn();
    let name = session.seat(side).name().to_string();
    loop {
        print!(
            "{side} ({name}), remove how many sticks? [{}]: ",
            session.game().legal_moves()
        );
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(CliError::new("input closed before the game ended"));
        }
        let Ok(amount) = line.trim().parse::<u32>() else {
            println!("Please enter a number.");
            continue;
        };
        match session.human_move(amount) {
            Ok(()) => return Ok(()),
            Err(e) => println!("Rejected: {e}"),
        }
    }
}

/// Print what an agent just did, with its reasoning.
fn print_agent_move(session: &Session, side: Side, amount: u32) {
    let thoughts = session.thoughts(side);
    println!("{side} ({}) removes {amount}.", session.seat(side).name());
    if !thoughts.strategy.is_empty() {
        println!("  Strategy: {}", thoughts.strategy);
    }
    if !thoughts.evaluation.is_empty() {
        println!("  Evaluation: {}", thoughts.evaluation);
    }
}

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if human input fails or output cannot be written.
/// A failure to record the result is only a warning.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute(
    red: &PlayerSpec,
    blue: &PlayerSpec,
    variant: Variant,
    pile: u32,
    seed: Option<u64>,
    target: &RecordTarget,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    // Generate seed if not provided
    let seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() ^ u64::from(d.subsec_nanos()))
            .unwrap_or(42)
    });

    let mut session = Session::new(
        GameConfig { variant, pile },
        Seat::from_spec(red, seed.wrapping_mul(2)),
        Seat::from_spec(blue, seed.wrapping_mul(2).wrapping_add(1)),
    );
    let names = [
        session.seat(Side::Red).name().to_string(),
        session.seat(Side::Blue).name().to_string(),
    ];

    if !quiet {
        println!("Nim, variant {variant}: {}.", variant.rules());
        println!("Red: {} vs Blue: {}", names[0], names[1]);
        println!();
    }
    if names[0] == names[1] && !(red.is_human() && blue.is_human()) {
        eprintln!("Warning: both seats are named '{}'; the game will not be rated.", names[0]);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();

    while session.game().is_active() {
        if !quiet {
            println!("{}", render_sticks(session.game().pile()));
        }
        let side = session.game().turn();
        match session.step() {
            Ok(Decision::Move(amount)) => {
                if !quiet {
                    print_agent_move(&session, side, amount);
                }
            }
            Ok(Decision::AwaitingHuman(_)) => read_human_move(&mut session, &mut input)?,
            Ok(Decision::Forfeit { side, reason, detail }) => {
                eprintln!("{side} forfeits: {reason} ({detail})");
            }
            Err(_) => break,
        }
    }

    if !quiet {
        println!();
    }

    let mut recorded = false;
    if let Some(mut store) = target.open() {
        match session.record(&mut store) {
            Ok(saved) => {
                recorded = saved;
                if saved && !quiet {
                    println!("Result saved to: {}", store.path().display());
                }
            }
            Err(e) => eprintln!("Warning: result not recorded: {e}"),
        }
    }

    let name_refs = [names[0].as_str(), names[1].as_str()];
    match format {
        OutputFormat::Text => {
            println!("{}", session.status_message());
        }
        OutputFormat::Json => {
            let json_result = JsonGameResult::from_game(session.game(), name_refs, recorded);
            let json = serde_json::to_string_pretty(&json_result)?;
            println!("{json}");
        }
        OutputFormat::Csv => {
            print!("{}", format_game_csv(session.game(), name_refs));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_sticks() {
        assert_eq!(render_sticks(0), "");
        assert_eq!(render_sticks(3), "|||");
        assert_eq!(render_sticks(7), "||||| ||");
        assert_eq!(render_sticks(10), "||||| |||||");
    }
}
