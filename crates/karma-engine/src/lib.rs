//! The fudge decision-and-retry engine and its roll interception layer.
//!
//! The engine sits between a host's roll-producing call sites and its dice
//! kernel. Before a roll, [`FudgeEngine::wrapped_roll`] consults the policy
//! store and stamps the request when a directive matches. After the root
//! evaluation, [`KarmaAdjuster`] leans on the die per history policy, then
//! [`FudgeEngine::fudge_d20_roll`] judges the total and regenerates the
//! roll — bounded by the safety limit, keeping the best attempt so far —
//! until the directive is satisfied or the budget runs out. Every terminal
//! branch reports exactly once to the [`OversightChannel`].
//!
//! [`InterceptionLayer`] binds interceptors to roll kinds in a static
//! registration table and drives the whole sequence for one roll.

/// The mutable context threaded through interception.
pub mod context;
/// Evaluation dispatch: the choke point every request flows through.
pub mod dispatch;
/// The fudge engine: roll interception and the post-evaluation loop.
pub mod engine;
/// Error types used throughout the crate.
pub mod error;
/// The active-fudge indicator signal.
pub mod indicator;
/// The roll interceptor capability and roll sources.
pub mod interceptor;
/// The karma adjuster: history-based die adjustment.
pub mod karma;
/// The interception layer binding interceptors to roll kinds.
pub mod layer;
/// The oversight channel: how fudge activity reaches a supervising party.
pub mod oversight;
/// Ephemeral per-roll retry state.
pub mod session;

/// Re-export the engine context.
pub use context::EngineContext;
/// Re-export the evaluation dispatch.
pub use dispatch::evaluate_roll;
/// Re-export the fudge engine.
pub use engine::{FudgeEngine, FudgeResolution};
/// Re-export error types.
pub use error::{EngineError, EngineResult};
/// Re-export indicator types.
pub use indicator::{CountingIndicator, IndicatorSignal, NullIndicator};
/// Re-export interceptor types.
pub use interceptor::{RollInterceptor, RollSource};
/// Re-export the karma adjuster.
pub use karma::KarmaAdjuster;
/// Re-export the interception layer.
pub use layer::InterceptionLayer;
/// Re-export oversight types.
pub use oversight::{NullOversight, OversightChannel, OversightEvent, RecordingOversight};
/// Re-export the fudge session.
pub use session::FudgeSession;
