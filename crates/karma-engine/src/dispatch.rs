//! Evaluation dispatch: the choke point every request flows through.

use karma_dice::{EvaluateOptions, RollOutcome, RollRequest};

use crate::context::EngineContext;
use crate::error::EngineResult;

/// Route one request through the context's kernel.
///
/// All three request shapes take the same immediate path, and that is the
/// point. An unflagged roll evaluates at the host's default mode. A
/// flagged root roll evaluates its draw here and nothing more — the
/// caller runs the post-evaluation loop as a continuation once the total
/// is final. A regenerated attempt carries the retry flag, which marks it
/// as already inside a loop: it evaluates and returns, so the fudge loop
/// can call back in without ever growing a second loop underneath itself.
/// The port is synchronous, so "the total is final when this returns"
/// holds by construction for every shape.
pub fn evaluate_roll(
    ctx: &mut EngineContext<'_>,
    request: &RollRequest,
    options: EvaluateOptions,
) -> EngineResult<RollOutcome> {
    let outcome = ctx.evaluator.evaluate(request, options, ctx.rng)?;
    Ok(outcome)
}
