//! The d20 evaluation kernel the karma engine drives.
//!
//! This crate is deliberately not a dice language: it models exactly one
//! primitive — a d20 roll with the ruleset's evaluation parameters
//! (advantage, crit/fumble bounds, target value, special ability flags) —
//! plus the [`RollEvaluator`] port the engine regenerates attempts
//! through. Hosts with their own dice engine implement the port; the
//! shipped [`D20Evaluator`] is the reference kernel and
//! [`ScriptedEvaluator`] replays fixed faces for rehearsal.

/// Advantage and disadvantage modes.
pub mod advantage;
/// Evaluation parameters preserved across regenerated attempts.
pub mod context;
/// Error types used throughout the crate.
pub mod error;
/// The evaluator port and its shipped implementations.
pub mod evaluate;
/// Roll outcomes and in-place merging.
pub mod outcome;
/// Roll requests and the fudge stamp they carry.
pub mod request;

/// Re-export the advantage mode.
pub use advantage::AdvantageMode;
/// Re-export the roll context.
pub use context::RollContext;
/// Re-export error types.
pub use error::{DiceError, DiceResult};
/// Re-export evaluator types.
pub use evaluate::{D20_SIDES, D20Evaluator, EvaluateOptions, RollEvaluator, ScriptedEvaluator};
/// Re-export the roll outcome.
pub use outcome::RollOutcome;
/// Re-export the roll request.
pub use request::RollRequest;
