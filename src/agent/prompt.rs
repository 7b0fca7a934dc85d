//! Prompts sent to language-model agents.

use crate::agent::TurnView;

fn answer_schema(legal: &str) -> String {
    format!(
        r#"{{
    "evaluation": "brief assessment of the current game state",
    "threats": "any immediate risks if you play poorly",
    "opportunities": "any winning patterns or advantages in the current position",
    "strategy": "concise reasoning behind the chosen move",
    "move_remove": "number of sticks to remove, must be one of: {legal}"
}}"#
    )
}

/// System prompt: the rules and the answer format.
#[must_use]
pub fn system_prompt(view: &TurnView<'_>) -> String {
    let legal = view.legal.to_string();
    format!(
        "You are an expert player in the game of Nim.
There is a single pile of sticks. The rule in this game is: {rules}.
On this turn you may remove one of: {legal} sticks.
You MUST remove at least 1 stick.
The player who takes the LAST stick WINS. A player left with no legal move LOSES.
You play optimally and rationally to maximize your chance of winning.
You should respond in JSON, and only in JSON, according to this spec:

{schema}
",
        rules = view.variant.rules(),
        schema = answer_schema(&legal),
    )
}

/// User prompt: the current position and an example answer.
///
/// `example_move` is the amount shown in the example; pick it among the
/// legal moves so the example does not suggest an illegal answer.
#[must_use]
pub fn user_prompt(view: &TurnView<'_>, example_move: u32) -> String {
    let legal = view.legal.to_string();
    let last = view
        .history
        .last()
        .map_or_else(String::new, |amount| {
            format!("Your opponent just removed {amount} stick(s).\n")
        });
    format!(
        r#"It is your turn to play. Choose your move.
There are {pile} sticks remaining.
{last}
Now with this in mind, make your decision. Respond only in JSON strictly according to this spec:
{schema}

For example, the following could be a response:

{{
  "evaluation": "The pile size allows forcing a losing position for the opponent.",
  "threats": "Removing the wrong number of sticks would allow the opponent to control the endgame.",
  "opportunities": "By leaving a multiple of 3, the opponent is forced into a losing sequence.",
  "strategy": "Remove 2 sticks to leave 3, which is a losing position for the next player.",
  "move_remove": "{example_move}"
}}

Now make your decision.
You must remove a number of sticks from the pile among: {legal}.
"#,
        pile = view.pile,
        schema = answer_schema(&legal),
    )
}
