//! Evaluation parameters preserved across regenerated attempts.

use serde::{Deserialize, Serialize};

use crate::advantage::AdvantageMode;

/// Everything needed to regenerate an equivalent d20 roll.
///
/// A fudge retry copies this context verbatim; only the random draw
/// differs between the original roll and its regenerated attempts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollContext {
    /// How many dice are drawn and which is kept.
    pub advantage: AdvantageMode,
    /// Kept die face at or above this counts as a critical.
    pub critical: i32,
    /// Kept die face at or below this counts as a fumble.
    pub fumble: i32,
    /// Total at or above this counts as a success, when set.
    pub target_value: Option<i32>,
    /// Draw a third die under advantage.
    pub elven_accuracy: bool,
    /// Reroll natural 1s once.
    pub halfling_lucky: bool,
    /// Treat a kept die below 10 as a 10.
    pub reliable_talent: bool,
}

impl RollContext {
    /// Use an advantage mode.
    pub fn with_advantage(mut self, advantage: AdvantageMode) -> Self {
        self.advantage = advantage;
        self
    }

    /// Compare the total against a target value.
    pub fn with_target_value(mut self, target: i32) -> Self {
        self.target_value = Some(target);
        self
    }
}

impl Default for RollContext {
    fn default() -> Self {
        Self {
            advantage: AdvantageMode::Normal,
            critical: 20,
            fumble: 1,
            target_value: None,
            elven_accuracy: false,
            halfling_lucky: false,
            reliable_talent: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bounds_are_natural_20_and_1() {
        let context = RollContext::default();
        assert_eq!(context.critical, 20);
        assert_eq!(context.fumble, 1);
        assert_eq!(context.advantage, AdvantageMode::Normal);
        assert!(context.target_value.is_none());
    }

    #[test]
    fn builders_set_fields() {
        let context = RollContext::default()
            .with_advantage(AdvantageMode::Disadvantage)
            .with_target_value(14);
        assert_eq!(context.advantage, AdvantageMode::Disadvantage);
        assert_eq!(context.target_value, Some(14));
    }
}
