//! Fudge directives: configured intentions to alter a future roll.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::operator::FudgeOperator;

/// Unique identifier for a fudge directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectiveId(pub Uuid);

impl DirectiveId {
    /// Generate a new random directive ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DirectiveId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DirectiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The kind of roll a directive targets. Extensible via `Custom(String)`
/// for host-defined roll types outside the built-in catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RollKind {
    /// A straight ability check.
    AbilityTest,
    /// An ability saving throw.
    AbilitySave,
    /// A skill check.
    Skill,
    /// A death saving throw.
    DeathSave,
    /// A weapon, spell, or feature attack roll.
    Attack,
    /// An unadorned d20 roll outside the host's named categories.
    Raw,
    /// A host-defined roll type not covered by the built-in kinds.
    Custom(String),
}

impl RollKind {
    /// Parse a kind from a string, mapping unknown names to `Custom`.
    pub fn parse(s: &str) -> Self {
        match s {
            "ability-test" => Self::AbilityTest,
            "ability-save" => Self::AbilitySave,
            "skill" => Self::Skill,
            "death-save" => Self::DeathSave,
            "attack" => Self::Attack,
            "raw" => Self::Raw,
            other => Self::Custom(other.to_string()),
        }
    }

    /// The built-in kinds, in display order.
    pub const BUILT_IN: [RollKind; 6] = [
        Self::AbilityTest,
        Self::AbilitySave,
        Self::Skill,
        Self::DeathSave,
        Self::Attack,
        Self::Raw,
    ];
}

impl fmt::Display for RollKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AbilityTest => write!(f, "ability-test"),
            Self::AbilitySave => write!(f, "ability-save"),
            Self::Skill => write!(f, "skill"),
            Self::DeathSave => write!(f, "death-save"),
            Self::Attack => write!(f, "attack"),
            Self::Raw => write!(f, "raw"),
            Self::Custom(s) => write!(f, "{s}"),
        }
    }
}

/// A configured intention to alter the next matching roll.
///
/// Directives live in per-owner lists inside the policy store. Only the
/// first *active* directive matching a roll's kind is consumed; the rest
/// wait their turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FudgeDirective {
    /// Unique identifier, used to address the directive from management
    /// surfaces.
    pub id: DirectiveId,
    /// Which roll kind this directive targets.
    pub roll_kind: RollKind,
    /// The operator the rolled total must satisfy.
    pub operator: FudgeOperator,
    /// The threshold the rolled total is compared against.
    pub threshold: i32,
    /// Human-readable reason, echoed in oversight messages.
    pub how: String,
    /// Whether this directive applies to the next matching roll.
    pub active: bool,
    /// Endless directives stay active after being consumed instead of
    /// being deactivated or removed.
    pub endless: bool,
}

impl FudgeDirective {
    /// Create an active, non-endless directive with an empty reason.
    pub fn new(roll_kind: RollKind, operator: FudgeOperator, threshold: i32) -> Self {
        Self {
            id: DirectiveId::new(),
            roll_kind,
            operator,
            threshold,
            how: String::new(),
            active: true,
            endless: false,
        }
    }

    /// Attach a human-readable reason.
    pub fn with_how(mut self, how: impl Into<String>) -> Self {
        self.how = how.into();
        self
    }

    /// Set whether the directive survives consumption.
    pub fn with_endless(mut self, endless: bool) -> Self {
        self.endless = endless;
        self
    }

    /// Render the acceptance predicate, e.g. `>= 15`.
    pub fn predicate(&self) -> String {
        format!("{} {}", self.operator, self.threshold)
    }
}

impl fmt::Display for FudgeDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: total {}", self.roll_kind, self.predicate())
    }
}

/// The stamp copied onto a roll request when a directive is consumed.
///
/// Carries exactly what the post-evaluation loop needs: the predicate and
/// the reason for the audit trail. The directive itself never travels with
/// the roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FudgeParams {
    /// Operator the rolled total must satisfy.
    pub operator: FudgeOperator,
    /// Threshold the rolled total is compared against.
    pub threshold: i32,
    /// Reason carried into oversight messages.
    pub how: String,
}

impl FudgeParams {
    /// Whether a rolled total satisfies this stamp.
    pub fn accepts(&self, total: i32) -> bool {
        self.operator.evaluate(total, self.threshold)
    }

    /// Whether `candidate` is strictly closer to acceptance than `best`.
    pub fn improves(&self, best: i32, candidate: i32) -> bool {
        self.operator.is_improvement(best, candidate, self.threshold)
    }

    /// Render the acceptance predicate, e.g. `>= 15`.
    pub fn predicate(&self) -> String {
        format!("{} {}", self.operator, self.threshold)
    }
}

impl From<&FudgeDirective> for FudgeParams {
    fn from(directive: &FudgeDirective) -> Self {
        Self {
            operator: directive.operator,
            threshold: directive.threshold,
            how: directive.how.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_id_display_shows_short_form() {
        let id = DirectiveId(Uuid::parse_str("a3f2b1c8-1234-5678-9abc-def012345678").unwrap());
        assert_eq!(id.to_string(), "a3f2b1c8");
    }

    #[test]
    fn roll_kind_parse_built_in() {
        assert_eq!(RollKind::parse("ability-save"), RollKind::AbilitySave);
        assert_eq!(RollKind::parse("attack"), RollKind::Attack);
    }

    #[test]
    fn roll_kind_parse_custom() {
        assert_eq!(
            RollKind::parse("initiative"),
            RollKind::Custom("initiative".to_string())
        );
    }

    #[test]
    fn roll_kind_display_round_trips() {
        for kind in RollKind::BUILT_IN {
            assert_eq!(RollKind::parse(&kind.to_string()), kind);
        }
    }

    #[test]
    fn new_directive_is_active_and_single_use() {
        let directive = FudgeDirective::new(RollKind::Attack, FudgeOperator::AtLeast, 15);
        assert!(directive.active);
        assert!(!directive.endless);
        assert_eq!(directive.predicate(), ">= 15");
    }

    #[test]
    fn params_adopt_directive_fields() {
        let directive = FudgeDirective::new(RollKind::Skill, FudgeOperator::AtMost, 5)
            .with_how("dramatic failure");
        let params = FudgeParams::from(&directive);
        assert!(params.accepts(3));
        assert!(!params.accepts(6));
        assert_eq!(params.how, "dramatic failure");
    }

    #[test]
    fn params_improvement_delegates_to_operator() {
        let params = FudgeParams {
            operator: FudgeOperator::AtLeast,
            threshold: 15,
            how: String::new(),
        };
        assert!(params.improves(8, 12));
        assert!(!params.improves(12, 8));
    }
}
