//! The oversight channel: how fudge activity reaches a supervising party.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notification sink for a supervising party (the "GM").
///
/// Every terminal branch of the fudge loop and every karma adjustment
/// reports here exactly once. Implementations decide where notices land:
/// a chat whisper, a log file, a test buffer.
pub trait OversightChannel {
    /// Deliver one human-readable notice.
    fn notify(&mut self, message: &str);
}

/// A timestamped notice retained by [`RecordingOversight`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OversightEvent {
    /// When the notice was recorded.
    pub at: DateTime<Utc>,
    /// The notice text.
    pub message: String,
}

/// Records every notice with a timestamp, oldest first.
#[derive(Debug, Clone, Default)]
pub struct RecordingOversight {
    events: Vec<OversightEvent>,
}

impl RecordingOversight {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, oldest first.
    pub fn events(&self) -> &[OversightEvent] {
        &self.events
    }

    /// The notice texts alone, oldest first.
    pub fn messages(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.message.as_str()).collect()
    }

    /// Number of notices recorded.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl OversightChannel for RecordingOversight {
    fn notify(&mut self, message: &str) {
        self.events.push(OversightEvent {
            at: Utc::now(),
            message: message.to_string(),
        });
    }
}

/// Discards every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOversight;

impl OversightChannel for NullOversight {
    fn notify(&mut self, _message: &str) {}
}
