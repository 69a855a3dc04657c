//! Roll outcomes and in-place merging.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::request::RollRequest;

/// The result of one d20 evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// The request that produced this outcome.
    pub request: RollRequest,
    /// Every natural face drawn, in draw order, discarded rerolls included.
    pub rolls: Vec<i32>,
    /// The kept natural face after advantage selection and rerolls.
    pub kept: i32,
    /// Kept face plus modifier.
    pub total: i32,
    /// Kept face met the critical bound.
    pub is_critical: bool,
    /// Kept face met the fumble bound.
    pub is_fumble: bool,
    /// Total met the target value, when one was set.
    pub success: Option<bool>,
}

impl RollOutcome {
    /// Build an outcome from drawn faces, computing the derived fields.
    pub fn from_kept(request: RollRequest, rolls: Vec<i32>, kept: i32) -> Self {
        let mut outcome = Self {
            request,
            rolls,
            kept,
            total: 0,
            is_critical: false,
            is_fumble: false,
            success: None,
        };
        outcome.recompute();
        outcome
    }

    /// Adopt an accepted attempt's dice and derived fields, keeping this
    /// outcome's own request identity. The caller's handle on the original
    /// roll ends up holding the merged result.
    pub fn merge_from(&mut self, attempt: &RollOutcome) {
        self.rolls = attempt.rolls.clone();
        self.kept = attempt.kept;
        self.total = attempt.total;
        self.is_critical = attempt.is_critical;
        self.is_fumble = attempt.is_fumble;
        self.success = attempt.success;
    }

    /// Replace the kept face and recompute everything derived from it.
    /// Karma nudges land here.
    pub fn override_kept(&mut self, kept: i32) {
        self.kept = kept;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.total = self.kept + self.request.modifier;
        self.is_critical = self.kept >= self.request.context.critical;
        self.is_fumble = self.kept <= self.request.context.fumble;
        self.success = self
            .request
            .context
            .target_value
            .map(|target| self.total >= target);
    }
}

impl fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<String> = self.rolls.iter().map(|r| r.to_string()).collect();
        write!(
            f,
            "{}: [{}] kept {} = {}",
            self.request.formula(),
            faces.join(", "),
            self.kept,
            self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_kept_derives_fields() {
        let outcome = RollOutcome::from_kept(RollRequest::new(3), vec![17], 17);
        assert_eq!(outcome.total, 20);
        assert!(!outcome.is_critical);
        assert!(!outcome.is_fumble);
        assert_eq!(outcome.success, None);
    }

    #[test]
    fn natural_20_is_critical() {
        let outcome = RollOutcome::from_kept(RollRequest::new(0), vec![20], 20);
        assert!(outcome.is_critical);
        assert!(!outcome.is_fumble);
    }

    #[test]
    fn natural_1_is_fumble() {
        let outcome = RollOutcome::from_kept(RollRequest::new(0), vec![1], 1);
        assert!(outcome.is_fumble);
    }

    #[test]
    fn target_value_derives_success() {
        let request = RollRequest::new(2)
            .with_context(crate::context::RollContext::default().with_target_value(15));
        let hit = RollOutcome::from_kept(request.clone(), vec![13], 13);
        assert_eq!(hit.success, Some(true));
        let miss = RollOutcome::from_kept(request, vec![12], 12);
        assert_eq!(miss.success, Some(false));
    }

    #[test]
    fn merge_adopts_attempt_but_keeps_request() {
        let root_request = RollRequest::new(1);
        let mut root = RollOutcome::from_kept(root_request.clone(), vec![4], 4);
        let attempt = RollOutcome::from_kept(root_request.retry(), vec![19], 19);

        root.merge_from(&attempt);
        assert_eq!(root.kept, 19);
        assert_eq!(root.total, 20);
        assert_eq!(root.rolls, vec![19]);
        // Identity stays with the root roll, not the retry.
        assert!(!root.request.is_retry_attempt);
    }

    #[test]
    fn override_kept_recomputes_flags() {
        let request = RollRequest::new(0)
            .with_context(crate::context::RollContext::default().with_target_value(10));
        let mut outcome = RollOutcome::from_kept(request, vec![1], 1);
        assert!(outcome.is_fumble);
        assert_eq!(outcome.success, Some(false));

        outcome.override_kept(10);
        assert!(!outcome.is_fumble);
        assert_eq!(outcome.total, 10);
        assert_eq!(outcome.success, Some(true));
    }

    #[test]
    fn display_shows_faces_and_total() {
        let outcome = RollOutcome::from_kept(RollRequest::new(3), vec![11, 17], 17);
        assert_eq!(outcome.to_string(), "1d20 + 3: [11, 17] kept 17 = 20");
    }
}
