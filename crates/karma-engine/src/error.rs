//! Error types for the engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur during roll interception and fudging.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The post-evaluation loop was handed an outcome that was never
    /// stamped for fudging. Caller contract violation.
    #[error("roll outcome carries no fudge stamp")]
    NotFlagged,

    /// The dice kernel failed. Propagated unchanged; the outcome is left
    /// at its last merged state.
    #[error("{0}")]
    Dice(#[from] karma_dice::DiceError),

    /// Policy data failed to parse or validate.
    #[error("{0}")]
    Core(#[from] karma_core::CoreError),
}
