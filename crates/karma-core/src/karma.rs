//! Karma policies: history-based die adjustment rules.
//!
//! Where a fudge directive targets one specific upcoming roll, a karma
//! policy watches a user's recent natural rolls and leans on the dice
//! whenever the history looks bad — every roll too low for too long, or a
//! sagging average. Policies adjust the kept die face, not the modified
//! total.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::operator::FudgeOperator;

/// Unique identifier for a karma policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyId(pub Uuid);

impl PolicyId {
    /// Generate a new random policy ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PolicyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Which users a karma policy applies to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserScope {
    /// Apply to every gamemaster.
    pub all_gms: bool,
    /// Apply to every non-gamemaster player.
    pub all_players: bool,
    /// Apply to these specific users regardless of role.
    pub users: Vec<String>,
}

impl UserScope {
    /// A scope covering every non-gamemaster player.
    pub fn players() -> Self {
        Self {
            all_players: true,
            ..Self::default()
        }
    }

    /// A scope covering every gamemaster.
    pub fn gms() -> Self {
        Self {
            all_gms: true,
            ..Self::default()
        }
    }

    /// A scope covering exactly the named users.
    pub fn of(users: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            users: users.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Whether a user falls inside this scope.
    pub fn contains(&self, user: &str, is_gm: bool) -> bool {
        (self.all_gms && is_gm)
            || (self.all_players && !is_gm)
            || self.users.iter().any(|u| u == user)
    }
}

/// How a triggered policy adjusts the die.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum KarmaKind {
    /// Trigger when every one of the last `history` natural rolls satisfies
    /// the badness predicate; pull the next roll to the floor.
    Simple {
        /// How many consecutive past rolls must all be bad.
        history: usize,
        /// The face the next roll is pulled to. A minimum when the predicate
        /// admits low rolls (`<=`, `<`), a maximum when it admits high ones.
        floor: i32,
    },
    /// Trigger when the average of the last `history` natural rolls
    /// satisfies the badness predicate; nudge the roll toward the good side.
    Average {
        /// How many past rolls the average is taken over.
        history: usize,
        /// How far one trigger pushes the roll.
        nudge: i32,
        /// Consecutive triggers stack the nudge: 1x, 2x, 3x, ... until the
        /// average recovers.
        cumulative: bool,
    },
}

/// A history-based die adjustment rule for one die size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KarmaPolicy {
    /// Unique identifier.
    pub id: PolicyId,
    /// Display name, echoed in oversight messages.
    pub name: String,
    /// Disabled policies are kept in the store but never trigger.
    pub enabled: bool,
    /// Which die size the policy watches.
    pub die_sides: u32,
    /// The badness predicate applied to past rolls (or their average).
    pub operator: FudgeOperator,
    /// Threshold for the badness predicate.
    pub threshold: i32,
    /// How a triggered policy adjusts the die.
    pub kind: KarmaKind,
    /// Which users the policy applies to.
    pub scope: UserScope,
}

impl KarmaPolicy {
    /// Create an enabled d20 policy of the simple kind.
    pub fn simple(
        name: impl Into<String>,
        operator: FudgeOperator,
        threshold: i32,
        history: usize,
        floor: i32,
    ) -> Self {
        Self {
            id: PolicyId::new(),
            name: name.into(),
            enabled: true,
            die_sides: 20,
            operator,
            threshold,
            kind: KarmaKind::Simple { history, floor },
            scope: UserScope::default(),
        }
    }

    /// Create an enabled d20 policy of the average kind.
    pub fn average(
        name: impl Into<String>,
        operator: FudgeOperator,
        threshold: i32,
        history: usize,
        nudge: i32,
        cumulative: bool,
    ) -> Self {
        Self {
            id: PolicyId::new(),
            name: name.into(),
            enabled: true,
            die_sides: 20,
            operator,
            threshold,
            kind: KarmaKind::Average {
                history,
                nudge,
                cumulative,
            },
            scope: UserScope::default(),
        }
    }

    /// Restrict the policy to a user scope.
    pub fn with_scope(mut self, scope: UserScope) -> Self {
        self.scope = scope;
        self
    }

    /// Watch a different die size.
    pub fn with_die_sides(mut self, sides: u32) -> Self {
        self.die_sides = sides;
        self
    }

    /// Whether this policy watches rolls made by the given user.
    pub fn applies_to(&self, user: &str, is_gm: bool) -> bool {
        self.enabled && self.scope.contains(user, is_gm)
    }

    /// Number of past rolls the policy needs before it can trigger.
    pub fn history_len(&self) -> usize {
        match self.kind {
            KarmaKind::Simple { history, .. } | KarmaKind::Average { history, .. } => history,
        }
    }

    /// Check structural soundness: an ordering operator, a usable history
    /// window, and an adjustment that stays on the die.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.operator.is_ordering() {
            return Err(CoreError::InvalidPolicy(format!(
                "operator {} has no adjustment direction",
                self.operator
            )));
        }
        if self.die_sides < 2 {
            return Err(CoreError::InvalidPolicy(format!(
                "die must have at least 2 sides, got {}",
                self.die_sides
            )));
        }
        if self.history_len() == 0 {
            return Err(CoreError::InvalidPolicy(
                "history window must cover at least 1 roll".to_string(),
            ));
        }
        match self.kind {
            KarmaKind::Simple { floor, .. } => {
                if floor < 1 || floor > self.die_sides as i32 {
                    return Err(CoreError::InvalidPolicy(format!(
                        "floor {} is outside d{}",
                        floor, self.die_sides
                    )));
                }
            }
            KarmaKind::Average { nudge, .. } => {
                if nudge < 1 {
                    return Err(CoreError::InvalidPolicy(format!(
                        "nudge must be positive, got {nudge}"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_matching() {
        let scope = UserScope::players();
        assert!(scope.contains("alice", false));
        assert!(!scope.contains("gm", true));

        let scope = UserScope::gms();
        assert!(scope.contains("gm", true));
        assert!(!scope.contains("alice", false));

        let scope = UserScope::of(["alice", "bob"]);
        assert!(scope.contains("alice", false));
        assert!(scope.contains("bob", true));
        assert!(!scope.contains("carol", false));
    }

    #[test]
    fn disabled_policy_applies_to_nobody() {
        let mut policy = KarmaPolicy::simple("pity", FudgeOperator::AtMost, 5, 2, 10)
            .with_scope(UserScope::players());
        assert!(policy.applies_to("alice", false));
        policy.enabled = false;
        assert!(!policy.applies_to("alice", false));
    }

    #[test]
    fn validate_accepts_sound_policies() {
        let simple = KarmaPolicy::simple("pity", FudgeOperator::AtMost, 5, 2, 10);
        assert!(simple.validate().is_ok());
        let average = KarmaPolicy::average("drag", FudgeOperator::AtLeast, 15, 3, 2, true);
        assert!(average.validate().is_ok());
    }

    #[test]
    fn validate_rejects_equality_operators() {
        let policy = KarmaPolicy::simple("odd", FudgeOperator::Equal, 5, 2, 10);
        assert!(matches!(
            policy.validate(),
            Err(CoreError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn validate_rejects_floor_off_the_die() {
        let policy = KarmaPolicy::simple("pity", FudgeOperator::AtMost, 5, 2, 25);
        assert!(policy.validate().is_err());
        let policy = KarmaPolicy::simple("pity", FudgeOperator::AtMost, 5, 2, 0);
        assert!(policy.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_history_and_zero_nudge() {
        let policy = KarmaPolicy::simple("pity", FudgeOperator::AtMost, 5, 0, 10);
        assert!(policy.validate().is_err());
        let policy = KarmaPolicy::average("drag", FudgeOperator::AtLeast, 15, 3, 0, false);
        assert!(policy.validate().is_err());
    }

    #[test]
    fn history_len_reads_either_kind() {
        let simple = KarmaPolicy::simple("pity", FudgeOperator::AtMost, 5, 2, 10);
        assert_eq!(simple.history_len(), 2);
        let average = KarmaPolicy::average("drag", FudgeOperator::AtLeast, 15, 7, 2, false);
        assert_eq!(average.history_len(), 7);
    }
}
