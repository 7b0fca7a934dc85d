//! Agent answers and the reasoning shown next to each seat.

use serde::Serialize;
use serde_json::Value;

use crate::error::AgentError;

/// A parsed agent answer.
///
/// Only `move_remove` is required. The other fields are free text the agent
/// may use to explain itself; they are empty when absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AgentReply {
    /// Number of sticks to remove.
    pub move_remove: u32,
    /// Assessment of the position.
    pub evaluation: String,
    /// Risks the agent sees.
    pub threats: String,
    /// Advantages the agent sees.
    pub opportunities: String,
    /// Reasoning behind the move.
    pub strategy: String,
}

impl AgentReply {
    /// A bare reply with no commentary.
    #[must_use]
    pub fn with_move(amount: u32) -> Self {
        Self {
            move_remove: amount,
            ..Self::default()
        }
    }

    /// Parse a raw answer.
    ///
    /// The answer must be a JSON object whose `move_remove` is a
    /// non-negative integer, either as a number or as a numeric string
    /// (`2` and `"2"` are both accepted).
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::MalformedResponse`] for anything else.
    pub fn parse(raw: &str) -> Result<Self, AgentError> {
        let value: Value = serde_json::from_str(raw.trim())
            .map_err(|e| AgentError::MalformedResponse(format!("not JSON: {e}")))?;
        let Value::Object(fields) = value else {
            return Err(AgentError::MalformedResponse(
                "expected a JSON object".to_string(),
            ));
        };

        let move_remove = match fields.get("move_remove") {
            Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
            _ => {
                return Err(AgentError::MalformedResponse(
                    "missing move_remove".to_string(),
                ));
            }
        }
        .ok_or_else(|| {
            AgentError::MalformedResponse(format!(
                "move_remove is not a whole number: {}",
                fields["move_remove"]
            ))
        })?;

        let text = |key: &str| match fields.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };

        Ok(Self {
            move_remove,
            evaluation: text("evaluation"),
            threats: text("threats"),
            opportunities: text("opportunities"),
            strategy: text("strategy"),
        })
    }
}

/// Last reasoning shown for a seat.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Thoughts {
    /// Assessment of the position.
    pub evaluation: String,
    /// Risks the seat saw.
    pub threats: String,
    /// Advantages the seat saw.
    pub opportunities: String,
    /// Reasoning behind the move.
    pub strategy: String,
    /// Amount removed, once the seat has moved.
    pub move_remove: Option<u32>,
}

impl Thoughts {
    /// Thoughts recorded for a human move.
    #[must_use]
    pub fn human(amount: u32) -> Self {
        Self {
            evaluation: "Move chosen by a human player".to_string(),
            threats: "N/A".to_string(),
            opportunities: "N/A".to_string(),
            strategy: format!("The human player removed {amount} stick(s)"),
            move_remove: Some(amount),
        }
    }

    /// True before the seat has played.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.move_remove.is_none()
    }
}

impl From<AgentReply> for Thoughts {
    fn from(reply: AgentReply) -> Self {
        Self {
            evaluation: reply.evaluation,
            threats: reply.threats,
            opportunities: reply.opportunities,
            strategy: reply.strategy,
            move_remove: Some(reply.move_remove),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_reply() {
        let raw = r#"{
            "evaluation": "pile of 10",
            "threats": "leaving a multiple of 3",
            "opportunities": "force 9",
            "strategy": "take 1",
            "move_remove": "1"
        }"#;
        let reply = AgentReply::parse(raw).unwrap();
        assert_eq!(reply.move_remove, 1);
        assert_eq!(reply.evaluation, "pile of 10");
        assert_eq!(reply.strategy, "take 1");
    }

    #[test]
    fn test_parse_numeric_move() {
        let reply = AgentReply::parse(r#"{"move_remove": 2}"#).unwrap();
        assert_eq!(reply, AgentReply::with_move(2));
    }

    #[test]
    fn test_parse_padded_string_move() {
        let reply = AgentReply::parse("  {\"move_remove\": \" 3 \"}\n").unwrap();
        assert_eq!(reply.move_remove, 3);
    }

    #[test]
    fn test_non_string_commentary_is_kept_as_json() {
        let reply = AgentReply::parse(r#"{"move_remove": 1, "threats": ["a", "b"]}"#).unwrap();
        assert_eq!(reply.threats, r#"["a","b"]"#);
        assert_eq!(reply.evaluation, "");
    }

    #[test]
    fn test_malformed_replies() {
        for raw in [
            "",
            "take two",
            "[1, 2]",
            "2",
            r#"{"evaluation": "no move"}"#,
            r#"{"move_remove": null}"#,
            r#"{"move_remove": "two"}"#,
            r#"{"move_remove": -1}"#,
            r#"{"move_remove": 1.5}"#,
            r#"{"move_remove": true}"#,
        ] {
            let err = AgentReply::parse(raw).unwrap_err();
            assert!(
                matches!(err, AgentError::MalformedResponse(_)),
                "{raw:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_out_of_range_amount_still_parses() {
        // Legality is checked by the game, not the parser.
        assert_eq!(AgentReply::parse(r#"{"move_remove": 7}"#).unwrap().move_remove, 7);
    }

    #[test]
    fn test_thoughts() {
        assert!(Thoughts::default().is_empty());
        let thoughts = Thoughts::from(AgentReply::with_move(2));
        assert_eq!(thoughts.move_remove, Some(2));
        assert!(Thoughts::human(1).strategy.contains("removed 1"));
    }
}
