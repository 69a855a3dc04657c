//! Error types for the policy model.

/// Errors that can occur while parsing or validating policy data.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An operator string did not name a known comparison operator.
    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    /// An owner string was not of the form `user:<id>` or `actor:<id>`.
    #[error("invalid owner: {0}")]
    InvalidOwner(String),

    /// A karma policy failed validation.
    #[error("invalid karma policy: {0}")]
    InvalidPolicy(String),
}

/// Convenience result type for policy operations.
pub type CoreResult<T> = Result<T, CoreError>;
