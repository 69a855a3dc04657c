//! Comparison operators shared by fudge directives and karma policies.
//!
//! An operator plus a threshold forms the acceptance predicate a fudged roll
//! must satisfy. The same enum doubles as karma's "badness" test over past
//! rolls, so both halves of the engine agree on what `<= 5` means.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A comparison between a rolled value and a configured threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FudgeOperator {
    /// Value must be less than or equal to the threshold.
    AtMost,
    /// Value must be strictly less than the threshold.
    LessThan,
    /// Value must be strictly greater than the threshold.
    GreaterThan,
    /// Value must be greater than or equal to the threshold.
    AtLeast,
    /// Value must equal the threshold exactly.
    Equal,
    /// Value must differ from the threshold.
    NotEqual,
}

impl FudgeOperator {
    /// Every operator, in a stable display order.
    pub const ALL: [FudgeOperator; 6] = [
        Self::AtMost,
        Self::LessThan,
        Self::GreaterThan,
        Self::AtLeast,
        Self::Equal,
        Self::NotEqual,
    ];

    /// Evaluate the predicate against a threshold.
    ///
    /// Pure and total over every pair of finite inputs, no error
    /// conditions. Generic so integer totals and fractional history
    /// averages go through the same comparison.
    pub fn evaluate<T: PartialOrd>(self, value: T, threshold: T) -> bool {
        match self {
            Self::AtMost => value <= threshold,
            Self::LessThan => value < threshold,
            Self::GreaterThan => value > threshold,
            Self::AtLeast => value >= threshold,
            Self::Equal => value == threshold,
            Self::NotEqual => value != threshold,
        }
    }

    /// Whether a still-failing `candidate` is strictly closer to satisfying
    /// the predicate than the previous `best`.
    ///
    /// Ordering operators compare directionally: when the goal is a low
    /// total, lower is better; when the goal is high, higher is better. The
    /// equality operators compare absolute distance to the threshold, which
    /// means `!=` never ranks one failing attempt above another (every
    /// failing attempt sits exactly on the threshold).
    pub fn is_improvement(self, best: i32, candidate: i32, threshold: i32) -> bool {
        match self {
            Self::AtMost | Self::LessThan => candidate < best,
            Self::GreaterThan | Self::AtLeast => candidate > best,
            Self::Equal | Self::NotEqual => {
                (candidate - threshold).abs() < (best - threshold).abs()
            }
        }
    }

    /// True when the satisfying side of the threshold is the low side
    /// (`<=` and `<`).
    ///
    /// Karma uses this to pick an adjustment direction: a policy whose
    /// badness predicate admits low rolls pulls the die up, and vice versa.
    pub fn favors_low(self) -> bool {
        matches!(self, Self::AtMost | Self::LessThan)
    }

    /// True for the four ordering operators, which have a well-defined
    /// adjustment direction. Karma policies reject the equality operators.
    pub fn is_ordering(self) -> bool {
        !matches!(self, Self::Equal | Self::NotEqual)
    }
}

impl fmt::Display for FudgeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::AtMost => "<=",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::AtLeast => ">=",
            Self::Equal => "=",
            Self::NotEqual => "!=",
        };
        write!(f, "{symbol}")
    }
}

impl FromStr for FudgeOperator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<=" | "≤" | "at-most" => Ok(Self::AtMost),
            "<" | "less-than" => Ok(Self::LessThan),
            ">" | "greater-than" => Ok(Self::GreaterThan),
            ">=" | "≥" | "at-least" => Ok(Self::AtLeast),
            "=" | "==" | "equal" => Ok(Self::Equal),
            "!=" | "≠" | "not-equal" => Ok(Self::NotEqual),
            other => Err(CoreError::UnknownOperator(other.to_string())),
        }
    }
}
