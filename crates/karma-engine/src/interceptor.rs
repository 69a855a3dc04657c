//! The roll interceptor capability and roll sources.

use karma_core::{OwnerId, RollKind};
use karma_dice::{EvaluateOptions, RollOutcome, RollRequest};

use crate::context::EngineContext;
use crate::error::EngineResult;

/// Where a roll comes from: the acting user, the actor it is rolled for
/// (when one is on the table), and the roll kind.
#[derive(Debug, Clone, PartialEq)]
pub struct RollSource {
    /// The acting user's id.
    pub user: String,
    /// Whether that user is a gamemaster.
    pub is_gm: bool,
    /// The actor the roll is made for, if any.
    pub actor: Option<String>,
    /// Which category of roll this is.
    pub kind: RollKind,
}

impl RollSource {
    /// A roll by a player with no actor attached.
    pub fn new(user: impl Into<String>, kind: RollKind) -> Self {
        Self {
            user: user.into(),
            is_gm: false,
            actor: None,
            kind,
        }
    }

    /// Attach the actor the roll is made for.
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Mark the acting user as a gamemaster.
    pub fn as_gm(mut self) -> Self {
        self.is_gm = true;
        self
    }

    /// The acting user as a directive owner.
    pub fn user_owner(&self) -> OwnerId {
        OwnerId::user(&self.user)
    }

    /// The actor as a directive owner, when one is attached.
    pub fn actor_owner(&self) -> Option<OwnerId> {
        self.actor.as_deref().map(OwnerId::actor)
    }
}

/// A hook pair the interception layer runs around every bound roll.
///
/// Interceptors run in registration order on each kind they are bound to.
/// `before_roll` may stamp the request; `after_evaluate` may adjust or
/// replace the outcome in place.
pub trait RollInterceptor: std::fmt::Debug {
    /// Human-readable name for audit surfaces.
    fn name(&self) -> &str;

    /// Runs before the roll is evaluated.
    fn before_roll(
        &mut self,
        _ctx: &mut EngineContext<'_>,
        _source: &RollSource,
        _request: &mut RollRequest,
    ) -> EngineResult<()> {
        Ok(())
    }

    /// Runs after the root evaluation completes.
    fn after_evaluate(
        &mut self,
        _ctx: &mut EngineContext<'_>,
        _source: &RollSource,
        _outcome: &mut RollOutcome,
        _options: EvaluateOptions,
    ) -> EngineResult<()> {
        Ok(())
    }

    /// Support downcasting to concrete types for host access.
    fn as_any(&self) -> &dyn std::any::Any;

    /// Support downcasting to concrete types for host access.
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_owners() {
        let source = RollSource::new("alice", RollKind::Attack).with_actor("goblin-3");
        assert_eq!(source.user_owner(), OwnerId::user("alice"));
        assert_eq!(source.actor_owner(), Some(OwnerId::actor("goblin-3")));
        assert!(!source.is_gm);

        let bare = RollSource::new("gm", RollKind::Skill).as_gm();
        assert!(bare.is_gm);
        assert_eq!(bare.actor_owner(), None);
    }
}
