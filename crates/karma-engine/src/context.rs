//! The mutable context threaded through interception.

use rand::rngs::StdRng;

use karma_core::PolicyStore;
use karma_dice::RollEvaluator;

use crate::indicator::IndicatorSignal;
use crate::oversight::OversightChannel;

/// Every collaborator the engine touches, borrowed from the host for the
/// duration of one roll.
///
/// The host owns the store, kernel, sinks, and RNG; interceptors receive
/// them through this context instead of reaching into a global registry.
pub struct EngineContext<'a> {
    /// Policy storage: directives, karma policies, history, settings.
    pub store: &'a mut dyn PolicyStore,
    /// The dice kernel rolls and regenerated attempts go through.
    pub evaluator: &'a mut dyn RollEvaluator,
    /// The oversight notification sink.
    pub oversight: &'a mut dyn OversightChannel,
    /// The active-fudge indicator refresh signal.
    pub indicator: &'a mut dyn IndicatorSignal,
    /// Randomness for the kernel.
    pub rng: &'a mut StdRng,
}
