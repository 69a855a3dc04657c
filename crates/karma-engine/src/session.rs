//! Ephemeral per-roll retry state.

/// Tracks one fudge loop: the remaining retry budget and the audit trail
/// of attempted totals.
///
/// Created when a fudge-eligible roll completes unsatisfied, dropped when
/// the loop terminates. Nothing here outlives a single roll's resolution;
/// the caller's outcome object carries the best-so-far result itself.
#[derive(Debug, Clone)]
pub struct FudgeSession {
    remaining: i32,
    original_total: i32,
    attempts: Vec<i32>,
}

impl FudgeSession {
    /// Start a session with the configured budget. A non-positive budget
    /// permits zero retries.
    pub fn new(budget: i32, original_total: i32) -> Self {
        Self {
            remaining: budget.max(0),
            original_total,
            attempts: Vec::new(),
        }
    }

    /// Retries left in the budget.
    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    /// Spend one retry from the budget.
    pub fn spend(&mut self) {
        self.remaining -= 1;
    }

    /// Record a regenerated attempt's total.
    pub fn record(&mut self, total: i32) {
        self.attempts.push(total);
    }

    /// Totals of the regenerated attempts, in order.
    pub fn attempts(&self) -> &[i32] {
        &self.attempts
    }

    /// The total the loop started from.
    pub fn original_total(&self) -> i32 {
        self.original_total
    }

    /// Every total seen, original first, rendered for audit messages.
    pub fn values_label(&self) -> String {
        let mut values = vec![self.original_total.to_string()];
        values.extend(self.attempts.iter().map(|t| t.to_string()));
        values.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_budget_clamps_to_zero() {
        let session = FudgeSession::new(-3, 7);
        assert_eq!(session.remaining(), 0);
    }

    #[test]
    fn spend_and_record() {
        let mut session = FudgeSession::new(2, 5);
        session.spend();
        session.record(8);
        session.spend();
        session.record(12);
        assert_eq!(session.remaining(), 0);
        assert_eq!(session.attempts(), &[8, 12]);
        assert_eq!(session.original_total(), 5);
    }

    #[test]
    fn values_label_lists_original_first() {
        let mut session = FudgeSession::new(3, 5);
        session.record(8);
        session.record(12);
        assert_eq!(session.values_label(), "5, 8, 12");
    }
}
