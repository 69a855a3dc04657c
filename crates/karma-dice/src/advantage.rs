//! Advantage and disadvantage modes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How many d20s are drawn and which one is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvantageMode {
    /// One die, kept as drawn.
    #[default]
    Normal,
    /// Two dice (three with elven accuracy), keep the highest.
    Advantage,
    /// Two dice, keep the lowest.
    Disadvantage,
}

impl AdvantageMode {
    /// How many dice this mode draws, given the elven accuracy flag.
    pub fn dice_count(self, elven_accuracy: bool) -> usize {
        match self {
            Self::Normal => 1,
            Self::Advantage => {
                if elven_accuracy {
                    3
                } else {
                    2
                }
            }
            Self::Disadvantage => 2,
        }
    }
}

impl fmt::Display for AdvantageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Advantage => write!(f, "advantage"),
            Self::Disadvantage => write!(f, "disadvantage"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dice_counts() {
        assert_eq!(AdvantageMode::Normal.dice_count(false), 1);
        assert_eq!(AdvantageMode::Normal.dice_count(true), 1);
        assert_eq!(AdvantageMode::Advantage.dice_count(false), 2);
        assert_eq!(AdvantageMode::Advantage.dice_count(true), 3);
        assert_eq!(AdvantageMode::Disadvantage.dice_count(true), 2);
    }
}
