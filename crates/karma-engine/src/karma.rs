//! History-based karma: leaning on the die when the recent past looks bad.

use std::collections::HashMap;

use karma_core::{KarmaKind, PolicyId};
use karma_dice::{D20_SIDES, EvaluateOptions, RollOutcome};

use crate::context::EngineContext;
use crate::error::EngineResult;
use crate::interceptor::{RollInterceptor, RollSource};

/// A roll interceptor that adjusts the kept natural die according to the
/// store's karma policies.
///
/// Trigger checks read the user's history as it stood before the current
/// roll; the final kept value (after every policy has had its say) is then
/// appended. Cumulative-average streak counters live here, not in the store,
/// so they reset with the session.
#[derive(Debug, Default)]
pub struct KarmaAdjuster {
    streaks: HashMap<PolicyId, i32>,
}

impl KarmaAdjuster {
    /// Create an adjuster with no accumulated streaks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current consecutive-trigger count for a policy, zero if cold.
    pub fn streak(&self, policy: PolicyId) -> i32 {
        self.streaks.get(&policy).copied().unwrap_or(0)
    }
}

impl RollInterceptor for KarmaAdjuster {
    fn name(&self) -> &str {
        "karma"
    }

    fn after_evaluate(
        &mut self,
        ctx: &mut EngineContext<'_>,
        source: &RollSource,
        outcome: &mut RollOutcome,
        _options: EvaluateOptions,
    ) -> EngineResult<()> {
        // Regenerated fudge attempts are judged against the directive only;
        // they neither earn karma nor enter the history.
        if outcome.request.is_retry_attempt {
            return Ok(());
        }

        for policy in ctx.store.karma_policies() {
            if policy.die_sides != D20_SIDES
                || !policy.operator.is_ordering()
                || !policy.applies_to(&source.user, source.is_gm)
            {
                continue;
            }

            let history = ctx.store.roll_history(&source.user, policy.die_sides);
            let triggered = match &policy.kind {
                KarmaKind::Simple { history: n, .. } => history.window(*n).is_some_and(|w| {
                    w.iter()
                        .all(|&v| policy.operator.evaluate(v, policy.threshold))
                }),
                KarmaKind::Average { history: n, .. } => history
                    .average(*n)
                    .is_some_and(|avg| policy.operator.evaluate(avg, f64::from(policy.threshold))),
            };
            if !triggered {
                self.streaks.remove(&policy.id);
                continue;
            }

            let before = outcome.kept;
            let adjusted = match &policy.kind {
                KarmaKind::Simple { floor, .. } => {
                    // A low-biased predicate pulls the die up to the floor; a
                    // high-biased one caps it there.
                    if policy.operator.favors_low() {
                        before.max(*floor)
                    } else {
                        before.min(*floor)
                    }
                }
                KarmaKind::Average {
                    nudge, cumulative, ..
                } => {
                    let multiplier = if *cumulative {
                        let streak = self.streaks.entry(policy.id).or_insert(0);
                        *streak += 1;
                        *streak
                    } else {
                        1
                    };
                    if policy.operator.favors_low() {
                        before + nudge * multiplier
                    } else {
                        before - nudge * multiplier
                    }
                }
            };
            let adjusted = adjusted.clamp(1, policy.die_sides as i32);

            if adjusted != before {
                outcome.override_kept(adjusted);
                ctx.oversight.notify(&format!(
                    "Karma '{}' adjusted the d20 from {} to {}",
                    policy.name, before, adjusted
                ));
            }
        }

        ctx.store
            .push_roll_history(&source.user, D20_SIDES, outcome.kept);
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
