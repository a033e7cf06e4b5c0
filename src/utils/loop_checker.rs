//! Watchdog counter for loops that may fail to terminate.

use tracing::warn;

/// Default number of iterations between warnings
pub const DEFAULT_THRESHOLD: u64 = 1_000_000;

/// Counts loop iterations and warns every `threshold` ticks
#[derive(Clone, Debug)]
pub struct LoopChecker {
    location: Option<String>,
    threshold: u64,
    counter: u64,
}

impl LoopChecker {
    pub fn new(location: impl Into<String>, threshold: u64) -> Self {
        Self {
            location: Some(location.into()),
            threshold: threshold.max(1),
            counter: 0,
        }
    }

    /// Record one iteration; returns `true` when the threshold was reached
    pub fn tick(&mut self) -> bool {
        self.counter = (self.counter + 1) % self.threshold;
        let reached = self.counter == 0;
        if reached {
            warn!(
                location = self.location.as_deref().unwrap_or("unknown"),
                threshold = self.threshold,
                "loop checker reached threshold"
            );
        }
        reached
    }
}

impl Default for LoopChecker {
    fn default() -> Self {
        Self {
            location: None,
            threshold: DEFAULT_THRESHOLD,
            counter: 0,
        }
    }
}
