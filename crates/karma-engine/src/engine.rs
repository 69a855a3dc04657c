//! The fudge engine: roll interception and the post-evaluation loop.

use std::fmt;

use serde::{Deserialize, Serialize};

use karma_core::FudgeParams;
use karma_dice::{EvaluateOptions, RollOutcome, RollRequest};

use crate::context::EngineContext;
use crate::dispatch::evaluate_roll;
use crate::error::{EngineError, EngineResult};
use crate::interceptor::{RollInterceptor, RollSource};
use crate::session::FudgeSession;

/// How one post-evaluation run ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "result")]
pub enum FudgeResolution {
    /// The original total already satisfied the predicate.
    NotNeeded,
    /// A regenerated attempt satisfied the predicate and was merged in.
    Accepted {
        /// Totals of every regenerated attempt, in order.
        attempts: Vec<i32>,
    },
    /// The retry budget ran out; the best failing attempt was kept.
    Exhausted {
        /// Totals of every regenerated attempt, in order.
        attempts: Vec<i32>,
    },
}

impl FudgeResolution {
    /// How many regenerated attempts the run made.
    pub fn attempt_count(&self) -> usize {
        match self {
            Self::NotNeeded => 0,
            Self::Accepted { attempts } | Self::Exhausted { attempts } => attempts.len(),
        }
    }

    /// Whether the final outcome satisfies the directive.
    pub fn is_satisfied(&self) -> bool {
        !matches!(self, Self::Exhausted { .. })
    }
}

impl fmt::Display for FudgeResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotNeeded => write!(f, "fudge not needed"),
            Self::Accepted { attempts } => {
                write!(f, "fudge accepted after {} attempts", attempts.len())
            }
            Self::Exhausted { attempts } => {
                write!(f, "fudge exhausted after {} attempts", attempts.len())
            }
        }
    }
}

/// The fudge decision-and-retry engine.
///
/// Holds no state of its own: directives live in the policy store, retry
/// state in a per-roll [`FudgeSession`]. Constructed once per session and
/// handed to the interception layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FudgeEngine;

impl FudgeEngine {
    /// Create the engine.
    pub fn new() -> Self {
        Self
    }

    /// Consult the policy store before a roll and stamp the request when a
    /// directive matches.
    ///
    /// The actor's list is checked first, then the acting user's; when both
    /// hold an active directive for the kind, the user's stamp wins. An
    /// actor directive is removed on consumption; a user directive is
    /// deactivated in place unless endless, in which case it stays active
    /// and untouched. Each consumption fires the indicator refresh.
    pub fn wrapped_roll(
        &mut self,
        ctx: &mut EngineContext<'_>,
        source: &RollSource,
        request: &mut RollRequest,
    ) {
        if let Some(actor) = source.actor_owner() {
            let mut list = ctx.store.fudge_directives(&actor);
            if let Some(index) = list.iter().position(|d| d.active && d.roll_kind == source.kind)
            {
                request.fudge = Some(FudgeParams::from(&list[index]));
                list.remove(index);
                ctx.store.set_fudge_directives(&actor, list);
                ctx.indicator.refresh();
            }
        }

        let user = source.user_owner();
        let mut list = ctx.store.fudge_directives(&user);
        if let Some(index) = list.iter().position(|d| d.active && d.roll_kind == source.kind) {
            request.fudge = Some(FudgeParams::from(&list[index]));
            if !list[index].endless {
                list[index].active = false;
                ctx.store.set_fudge_directives(&user, list);
                ctx.indicator.refresh();
            }
        }
    }

    /// Judge a completed outcome against its fudge stamp and retry until
    /// satisfied or the budget runs out.
    ///
    /// Merges in place: the caller's outcome ends up holding the accepted
    /// attempt, or the closest failing one. Exactly one oversight notice is
    /// emitted per terminal branch. A kernel failure propagates unchanged,
    /// leaving the outcome at its last merged state.
    pub fn fudge_d20_roll(
        &mut self,
        ctx: &mut EngineContext<'_>,
        outcome: &mut RollOutcome,
        options: EvaluateOptions,
    ) -> EngineResult<FudgeResolution> {
        let params = outcome.request.fudge.clone().ok_or(EngineError::NotFlagged)?;

        if params.accepts(outcome.total) {
            ctx.oversight.notify(&format!(
                "{}: not needed, total {} already satisfies {}",
                Self::label(&params),
                outcome.total,
                params.predicate()
            ));
            return Ok(FudgeResolution::NotNeeded);
        }

        let mut session = FudgeSession::new(ctx.store.max_fudge_attempts(), outcome.total);
        let retry_request = outcome.request.retry();
        while session.remaining() > 0 {
            session.spend();
            let attempt = evaluate_roll(ctx, &retry_request, options)?;
            session.record(attempt.total);

            if params.accepts(attempt.total) {
                outcome.merge_from(&attempt);
                ctx.oversight.notify(&format!(
                    "{}: accepted total {} ({}) after values {}",
                    Self::label(&params),
                    outcome.total,
                    params.predicate(),
                    session.values_label()
                ));
                return Ok(FudgeResolution::Accepted {
                    attempts: session.attempts().to_vec(),
                });
            }

            // Not satisfied: keep it anyway if it is closer than what the
            // caller currently holds.
            if params.improves(outcome.total, attempt.total) {
                outcome.merge_from(&attempt);
            }
        }

        ctx.oversight.notify(&format!(
            "{}: gave up after {} attempts, keeping best total {} ({} not met), values {}",
            Self::label(&params),
            session.attempts().len(),
            outcome.total,
            params.predicate(),
            session.values_label()
        ));
        Ok(FudgeResolution::Exhausted {
            attempts: session.attempts().to_vec(),
        })
    }

    fn label(params: &FudgeParams) -> String {
        if params.how.is_empty() {
            "Fudge".to_string()
        } else {
            format!("Fudge ({})", params.how)
        }
    }
}

impl RollInterceptor for FudgeEngine {
    fn name(&self) -> &str {
        "fudge"
    }

    fn before_roll(
        &mut self,
        ctx: &mut EngineContext<'_>,
        source: &RollSource,
        request: &mut RollRequest,
    ) -> EngineResult<()> {
        self.wrapped_roll(ctx, source, request);
        Ok(())
    }

    fn after_evaluate(
        &mut self,
        ctx: &mut EngineContext<'_>,
        _source: &RollSource,
        outcome: &mut RollOutcome,
        options: EvaluateOptions,
    ) -> EngineResult<()> {
        // Only flagged root rolls enter the loop; a retry attempt never
        // re-fudges, whatever path it arrives by.
        if outcome.request.is_fudged() && !outcome.request.is_retry_attempt {
            self.fudge_d20_roll(ctx, outcome, options)?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
