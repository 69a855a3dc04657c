//! Error types for the d20 kernel.

/// Errors that can occur while evaluating a roll.
#[derive(Debug, thiserror::Error)]
pub enum DiceError {
    /// Minimize and maximize cannot both be forced on one evaluation.
    #[error("cannot minimize and maximize the same roll")]
    ConflictingClamp,

    /// A scripted evaluator ran out of faces.
    #[error("scripted roll sequence exhausted")]
    ScriptExhausted,
}

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;
