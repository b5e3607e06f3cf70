//! Opponent difficulty levels.

use serde::{Deserialize, Serialize};

/// How often the computer opponent ignores strategy and plays at random.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Random move 40% of the time.
    Easy,
    /// Random move 15% of the time.
    #[default]
    Medium,
    /// Never plays at random.
    Hard,
}

impl Difficulty {
    /// Probability in `[0, 1)` that a turn is a random mistake.
    pub fn mistake_chance(self) -> f64 {
        match self {
            Difficulty::Easy => 0.40,
            Difficulty::Medium => 0.15,
            Difficulty::Hard => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_mistake_chances() {
        assert_eq!(Difficulty::Easy.mistake_chance(), 0.40);
        assert_eq!(Difficulty::Medium.mistake_chance(), 0.15);
        assert_eq!(Difficulty::Hard.mistake_chance(), 0.0);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(Difficulty::from_str("HARD").unwrap(), Difficulty::Hard);
        assert_eq!(Difficulty::from_str("easy").unwrap(), Difficulty::Easy);
        assert!(Difficulty::from_str("nightmare").is_err());
        assert_eq!(Difficulty::Medium.to_string(), "medium");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"hard\"");
        let parsed: Difficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(parsed, Difficulty::Easy);
    }
}
