//! Unnamed single-interval timer.

use std::time::{Duration, Instant};

use crate::error::{Result, ToolboxError};

/// Simple start/stop timer without a name or accumulation
#[derive(Clone, Copy, Debug, Default)]
pub struct Stopwatch {
    start: Option<Instant>,
    end: Option<Instant>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stopwatch that is already running
    pub fn started() -> Self {
        let mut watch = Self::new();
        watch.start();
        watch
    }

    /// Start (or restart) the stopwatch, forgetting any previous reading
    pub fn start(&mut self) {
        self.start = Some(Instant::now());
        self.end = None;
    }

    /// Stop the stopwatch and return the measured interval
    pub fn stop(&mut self) -> Result<Duration> {
        let start = self.start.ok_or(ToolboxError::StopwatchNotStarted)?;
        let end = Instant::now();
        self.end = Some(end);
        Ok(end.saturating_duration_since(start))
    }

    /// Interval between the last start and stop
    pub fn elapsed(&self) -> Result<Duration> {
        match (self.start, self.end) {
            (None, _) => Err(ToolboxError::StopwatchNotStarted),
            (Some(_), None) => Err(ToolboxError::StopwatchRunning),
            (Some(start), Some(end)) => Ok(end.saturating_duration_since(start)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.start.is_some() && self.end.is_none()
    }
}
