//! Bounded natural-roll history per user and die size.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// A bounded window of natural rolls, oldest first.
///
/// Karma policies read the most recent rolls through [`RollHistory::window`]
/// and [`RollHistory::average`]; both refuse to answer until enough rolls
/// have accumulated, so a fresh user is never judged on thin evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollHistory {
    capacity: usize,
    rolls: VecDeque<i32>,
}

impl RollHistory {
    /// How many rolls are retained per user and die size by default.
    pub const DEFAULT_CAPACITY: usize = 20;

    /// Create an empty history retaining up to `capacity` rolls.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            rolls: VecDeque::new(),
        }
    }

    /// Record a natural roll, evicting the oldest when full.
    pub fn push(&mut self, value: i32) {
        if self.rolls.len() == self.capacity {
            self.rolls.pop_front();
        }
        self.rolls.push_back(value);
    }

    /// Number of rolls currently retained.
    pub fn len(&self) -> usize {
        self.rolls.len()
    }

    /// True if no rolls have been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.rolls.is_empty()
    }

    /// The most recent `n` rolls, oldest first, or `None` if fewer than `n`
    /// have been recorded.
    pub fn window(&self, n: usize) -> Option<Vec<i32>> {
        if n == 0 || self.rolls.len() < n {
            return None;
        }
        Some(self.rolls.iter().skip(self.rolls.len() - n).copied().collect())
    }

    /// Mean of the most recent `n` rolls, or `None` if fewer than `n` have
    /// been recorded.
    pub fn average(&self, n: usize) -> Option<f64> {
        let window = self.window(n)?;
        Some(f64::from(window.iter().sum::<i32>()) / window.len() as f64)
    }

    /// Iterate over all retained rolls, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.rolls.iter().copied()
    }
}

impl Default for RollHistory {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
