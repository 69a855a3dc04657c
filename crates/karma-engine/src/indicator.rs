//! The active-fudge indicator signal.

/// Fire-and-forget refresh signal for whatever "active fudge" indicator
/// the host displays. Consuming a directive fires it so the indicator
/// reflects the new state; the engine never waits on it.
pub trait IndicatorSignal {
    /// Request a refresh.
    fn refresh(&mut self);
}

/// Ignores every refresh.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullIndicator;

impl IndicatorSignal for NullIndicator {
    fn refresh(&mut self) {}
}

/// Counts refreshes. Used by tests to prove consumption fired the signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountingIndicator {
    count: u64,
}

impl CountingIndicator {
    /// How many refreshes have fired.
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl IndicatorSignal for CountingIndicator {
    fn refresh(&mut self) {
        self.count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting_indicator_counts() {
        let mut indicator = CountingIndicator::default();
        indicator.refresh();
        indicator.refresh();
        assert_eq!(indicator.count(), 2);
    }
}
