//! Roll requests and the fudge stamp they carry.

use std::fmt;

use serde::{Deserialize, Serialize};

use karma_core::FudgeParams;

use crate::advantage::AdvantageMode;
use crate::context::RollContext;

/// A d20 roll about to be evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollRequest {
    /// Flat modifier added to the kept die.
    pub modifier: i32,
    /// Evaluation parameters preserved across regenerated attempts.
    pub context: RollContext,
    /// Stamp placed by roll interception when a directive was consumed.
    pub fudge: Option<FudgeParams>,
    /// Set on rolls regenerated by the fudge loop. Retry attempts are
    /// evaluated directly and never trigger further fudging.
    pub is_retry_attempt: bool,
}

impl RollRequest {
    /// Create a plain request with the default context.
    pub fn new(modifier: i32) -> Self {
        Self {
            modifier,
            context: RollContext::default(),
            fudge: None,
            is_retry_attempt: false,
        }
    }

    /// Use a specific evaluation context.
    pub fn with_context(mut self, context: RollContext) -> Self {
        self.context = context;
        self
    }

    /// Whether interception stamped this request for fudging.
    pub fn is_fudged(&self) -> bool {
        self.fudge.is_some()
    }

    /// Re-issue this request as a regenerated attempt: same modifier,
    /// context, and stamp, with the retry flag set.
    pub fn retry(&self) -> Self {
        Self {
            modifier: self.modifier,
            context: self.context.clone(),
            fudge: self.fudge.clone(),
            is_retry_attempt: true,
        }
    }

    /// Render the dice formula, e.g. `2d20kh + 3`.
    pub fn formula(&self) -> String {
        let dice = self.context.advantage.dice_count(self.context.elven_accuracy);
        let keep = match self.context.advantage {
            AdvantageMode::Normal => "",
            AdvantageMode::Advantage => "kh",
            AdvantageMode::Disadvantage => "kl",
        };
        match self.modifier {
            0 => format!("{dice}d20{keep}"),
            m if m < 0 => format!("{dice}d20{keep} - {}", -m),
            m => format!("{dice}d20{keep} + {m}"),
        }
    }
}

impl fmt::Display for RollRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formula())
    }
}

#[cfg(test)]
mod tests {
    use karma_core::FudgeOperator;

    use super::*;

    #[test]
    fn formula_rendering() {
        assert_eq!(RollRequest::new(0).formula(), "1d20");
        assert_eq!(RollRequest::new(3).formula(), "1d20 + 3");
        assert_eq!(RollRequest::new(-2).formula(), "1d20 - 2");

        let adv = RollRequest::new(5)
            .with_context(RollContext::default().with_advantage(AdvantageMode::Advantage));
        assert_eq!(adv.formula(), "2d20kh + 5");

        let dis = RollRequest::new(0)
            .with_context(RollContext::default().with_advantage(AdvantageMode::Disadvantage));
        assert_eq!(dis.formula(), "2d20kl");

        let elven = RollRequest::new(1).with_context(RollContext {
            advantage: AdvantageMode::Advantage,
            elven_accuracy: true,
            ..RollContext::default()
        });
        assert_eq!(elven.formula(), "3d20kh + 1");
    }

    #[test]
    fn retry_preserves_context_and_stamp() {
        let mut request = RollRequest::new(4)
            .with_context(RollContext::default().with_target_value(12));
        request.fudge = Some(FudgeParams {
            operator: FudgeOperator::AtLeast,
            threshold: 15,
            how: "boss fight".to_string(),
        });

        let retry = request.retry();
        assert!(retry.is_retry_attempt);
        assert!(!request.is_retry_attempt);
        assert_eq!(retry.modifier, request.modifier);
        assert_eq!(retry.context, request.context);
        assert_eq!(retry.fudge, request.fudge);
    }
}
