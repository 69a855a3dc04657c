//! The evaluator port and its shipped implementations.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::advantage::AdvantageMode;
use crate::error::{DiceError, DiceResult};
use crate::outcome::RollOutcome;
use crate::request::RollRequest;

/// Faces on the kernel's die.
pub const D20_SIDES: u32 = 20;

/// Clamps forced onto one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluateOptions {
    /// Force every die to its minimum face.
    pub minimize: bool,
    /// Force every die to its maximum face.
    pub maximize: bool,
}

impl EvaluateOptions {
    /// Options forcing every die to 1.
    pub fn minimized() -> Self {
        Self {
            minimize: true,
            maximize: false,
        }
    }

    /// Options forcing every die to 20.
    pub fn maximized() -> Self {
        Self {
            minimize: false,
            maximize: true,
        }
    }
}

/// The dice-evaluation primitive the engine drives.
///
/// Implementations are synchronous: the outcome is final when the call
/// returns. That is what lets the retry loop regenerate attempts
/// back-to-back, each one resolved before the next is drawn.
pub trait RollEvaluator {
    /// Evaluate one request into an outcome.
    fn evaluate(
        &mut self,
        request: &RollRequest,
        options: EvaluateOptions,
        rng: &mut StdRng,
    ) -> DiceResult<RollOutcome>;
}

/// The reference d20 kernel, honoring the full roll context.
#[derive(Debug, Clone, Copy, Default)]
pub struct D20Evaluator;

impl D20Evaluator {
    fn draw(options: EvaluateOptions, rng: &mut StdRng) -> i32 {
        if options.minimize {
            1
        } else if options.maximize {
            D20_SIDES as i32
        } else {
            rng.random_range(1..=D20_SIDES as i32)
        }
    }
}

impl RollEvaluator for D20Evaluator {
    fn evaluate(
        &mut self,
        request: &RollRequest,
        options: EvaluateOptions,
        rng: &mut StdRng,
    ) -> DiceResult<RollOutcome> {
        if options.minimize && options.maximize {
            return Err(DiceError::ConflictingClamp);
        }

        let context = &request.context;
        let count = context.advantage.dice_count(context.elven_accuracy);

        let mut rolls = Vec::with_capacity(count);
        let mut candidates = Vec::with_capacity(count);
        for _ in 0..count {
            let mut face = Self::draw(options, rng);
            rolls.push(face);
            // Halfling lucky rerolls a natural 1 once, keeping the reroll.
            if context.halfling_lucky && face == 1 {
                face = Self::draw(options, rng);
                rolls.push(face);
            }
            candidates.push(face);
        }

        let mut kept = match context.advantage {
            AdvantageMode::Normal => candidates.first().copied().unwrap_or(1),
            AdvantageMode::Advantage => candidates.iter().copied().max().unwrap_or(1),
            AdvantageMode::Disadvantage => candidates.iter().copied().min().unwrap_or(1),
        };
        if context.reliable_talent && kept < 10 {
            kept = 10;
        }

        Ok(RollOutcome::from_kept(request.clone(), rolls, kept))
    }
}

/// Replays a fixed sequence of kept faces.
///
/// Deterministic stand-in for rehearsing engine behavior: each evaluation
/// consumes exactly one scripted face regardless of the request's context,
/// and an exhausted script is an evaluation failure.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvaluator {
    faces: VecDeque<i32>,
}

impl ScriptedEvaluator {
    /// Script the given kept faces, consumed in order.
    pub fn new(faces: impl IntoIterator<Item = i32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
        }
    }

    /// How many scripted faces remain.
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl RollEvaluator for ScriptedEvaluator {
    fn evaluate(
        &mut self,
        request: &RollRequest,
        _options: EvaluateOptions,
        _rng: &mut StdRng,
    ) -> DiceResult<RollOutcome> {
        let face = self.faces.pop_front().ok_or(DiceError::ScriptExhausted)?;
        Ok(RollOutcome::from_kept(request.clone(), vec![face], face))
    }
}
