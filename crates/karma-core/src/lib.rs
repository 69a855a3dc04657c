//! Policy model for the karma roll engine.
//!
//! This crate defines what can be configured: fudge directives that pin an
//! acceptance predicate onto a future roll, karma policies that watch roll
//! history and lean on the dice, and the [`PolicyStore`] trait a host
//! implements to persist all of it. It is independent of any dice kernel —
//! the engine crate wires these policies to actual rolls.

/// Fudge directives and the roll-kind catalogue they target.
pub mod directive;
/// Error types used throughout the crate.
pub mod error;
/// Bounded natural-roll history per user and die size.
pub mod history;
/// Karma policies: history-based die adjustment rules.
pub mod karma;
/// Comparison operators shared by directives and policies.
pub mod operator;
/// Directive owners: users and actors.
pub mod owner;
/// The policy store trait and its in-memory reference implementation.
pub mod store;

/// Re-export directive types.
pub use directive::{DirectiveId, FudgeDirective, FudgeParams, RollKind};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the roll history window.
pub use history::RollHistory;
/// Re-export karma policy types.
pub use karma::{KarmaKind, KarmaPolicy, PolicyId, UserScope};
/// Re-export the comparison operator.
pub use operator::FudgeOperator;
/// Re-export owner types.
pub use owner::{OwnerId, OwnerKind};
/// Re-export store types.
pub use store::{MemoryStore, PolicyStore};
