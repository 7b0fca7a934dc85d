//! Rule variants and their legal-move sets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::game::MoveSet;

/// Move-legality ruleset, fixed for a game once the first move is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Remove 1 or 2 sticks.
    #[default]
    Normal,
    /// Even pile: remove 1, 2 or 4. Odd pile: remove 1, 3 or 4.
    A,
    /// Remove 1, 2 or 3, but never the amount removed on the previous turn.
    B,
}

impl Variant {
    /// All variants, in display order.
    pub const ALL: [Variant; 3] = [Variant::Normal, Variant::A, Variant::B];

    /// Legal moves for a pile under this variant.
    ///
    /// `last_move` is the amount removed on the immediately preceding turn
    /// and only matters for [`Variant::B`]. The result is always a subset of
    /// `1..=pile`.
    #[must_use]
    pub fn legal_moves(self, pile: u32, last_move: Option<u32>) -> MoveSet {
        let candidates = match self {
            Variant::Normal => MoveSet::from_amounts(&[1, 2]),
            Variant::A if pile % 2 == 0 => MoveSet::from_amounts(&[1, 2, 4]),
            Variant::A => MoveSet::from_amounts(&[1, 3, 4]),
            Variant::B => {
                let mut set = MoveSet::from_amounts(&[1, 2, 3]);
                if let Some(last) = last_move {
                    set.remove(last);
                }
                set
            }
        };
        candidates.up_to(pile)
    }

    /// Short lowercase name used in records and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Variant::Normal => "normal",
            Variant::A => "a",
            Variant::B => "b",
        }
    }

    /// One-line description of the rule.
    #[must_use]
    pub const fn rules(self) -> &'static str {
        match self {
            Variant::Normal => "remove 1 or 2 sticks",
            Variant::A => "remove 1, 2 or 4 sticks from an even pile, 1, 3 or 4 from an odd pile",
            Variant::B => "remove 1, 2 or 3 sticks, never the amount removed on the previous turn",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Unknown variant name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVariantError {
    input: String,
}

impl fmt::Display for ParseVariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown variant '{}' (expected normal, a or b)", self.input)
    }
}

impl std::error::Error for ParseVariantError {}

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Variant::Normal),
            "a" | "variant_a" | "variant-a" => Ok(Variant::A),
            "b" | "variant_b" | "variant-b" => Ok(Variant::B),
            _ => Err(ParseVariantError { input: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_moves() {
        assert_eq!(Variant::Normal.legal_moves(21, None).to_vec(), vec![1, 2]);
        assert_eq!(Variant::Normal.legal_moves(1, Some(2)).to_vec(), vec![1]);
        assert!(Variant::Normal.legal_moves(0, None).is_empty());
    }

    #[test]
    fn test_variant_a_parity() {
        assert_eq!(Variant::A.legal_moves(20, None).to_vec(), vec![1, 2, 4]);
        assert_eq!(Variant::A.legal_moves(21, None).to_vec(), vec![1, 3, 4]);
        assert_eq!(Variant::A.legal_moves(3, None).to_vec(), vec![1, 3]);
        assert_eq!(Variant::A.legal_moves(2, None).to_vec(), vec![1, 2]);
    }

    #[test]
    fn test_variant_b_excludes_last_move() {
        assert_eq!(Variant::B.legal_moves(21, None).to_vec(), vec![1, 2, 3]);
        assert_eq!(Variant::B.legal_moves(5, Some(2)).to_vec(), vec![1, 3]);
        assert_eq!(Variant::B.legal_moves(2, Some(2)).to_vec(), vec![1]);
    }

    #[test]
    fn test_variant_b_blocked_position() {
        // One stick left and the previous turn also removed one.
        assert!(Variant::B.legal_moves(1, Some(1)).is_empty());
    }

    #[test]
    fn test_parse_and_display() {
        for variant in Variant::ALL {
            assert_eq!(variant.to_string().parse::<Variant>(), Ok(variant));
        }
        assert_eq!("VARIANT_A".parse::<Variant>(), Ok(Variant::A));
        assert!("c".parse::<Variant>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Variant::B).unwrap(), "\"b\"");
        let parsed: Variant = serde_json::from_str("\"normal\"").unwrap();
        assert_eq!(parsed, Variant::Normal);
    }
}
