//! # Timer Records
//!
//! One bucket per named section: accumulated duration, completed-call count,
//! the last completed interval and the running state.

use std::time::{Duration, Instant};

/// Accumulated timing for one named section
#[derive(Clone, Debug)]
pub struct TimerRecord {
    name: String,
    total: Duration,
    count: u64,
    last: Option<Duration>,
    info: Option<String>,
    /// Start of the current running segment
    started: Option<Instant>,
    /// Time of the current interval collected before a suspension
    pending: Duration,
}

impl TimerRecord {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            total: Duration::ZERO,
            count: 0,
            last: None,
            info: None,
            started: None,
            pending: Duration::ZERO,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sum of all completed intervals
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Number of completed start/stop intervals
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Length of the most recently completed interval
    pub fn last(&self) -> Option<Duration> {
        self.last
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub(crate) fn set_info(&mut self, info: String) {
        self.info = Some(info);
    }

    /// Begin an interval. Returns `true` when a running interval was discarded.
    pub(crate) fn start(&mut self, now: Instant) -> bool {
        let restarted = self.started.is_some();
        if restarted {
            self.pending = Duration::ZERO;
        }
        self.started = Some(now);
        restarted
    }

    /// Finish the running interval and fold it into the bucket.
    ///
    /// Returns `None` (and changes nothing) when the timer is not running.
    pub(crate) fn stop(&mut self, now: Instant) -> Option<Duration> {
        let started = self.started.take()?;
        let interval = self.pending + now.saturating_duration_since(started);
        self.pending = Duration::ZERO;
        self.total += interval;
        self.count += 1;
        self.last = Some(interval);
        Some(interval)
    }

    /// Pause a running interval without completing it
    pub(crate) fn suspend(&mut self, now: Instant) {
        if let Some(started) = self.started.take() {
            self.pending += now.saturating_duration_since(started);
        }
    }

    /// Continue a suspended interval
    pub(crate) fn resume(&mut self, now: Instant) {
        if self.started.is_none() {
            self.started = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_accumulates() {
        let t0 = Instant::now();
        let mut rec = TimerRecord::new("a".into());
        rec.start(t0);
        assert_eq!(rec.stop(t0 + Duration::from_millis(5)), Some(Duration::from_millis(5)));
        rec.start(t0 + Duration::from_millis(10));
        rec.stop(t0 + Duration::from_millis(13));

        assert_eq!(rec.total(), Duration::from_millis(8));
        assert_eq!(rec.count(), 2);
        assert_eq!(rec.last(), Some(Duration::from_millis(3)));
        assert!(!rec.is_running());
    }

    #[test]
    fn test_stop_without_start() {
        let mut rec = TimerRecord::new("a".into());
        assert_eq!(rec.stop(Instant::now()), None);
        assert_eq!(rec.count(), 0);
        assert_eq!(rec.total(), Duration::ZERO);
    }

    #[test]
    fn test_restart_discards_running_interval() {
        let t0 = Instant::now();
        let mut rec = TimerRecord::new("a".into());
        assert!(!rec.start(t0));
        assert!(rec.start(t0 + Duration::from_millis(100)));
        rec.stop(t0 + Duration::from_millis(101));

        assert_eq!(rec.total(), Duration::from_millis(1));
        assert_eq!(rec.count(), 1);
    }

    #[test]
    fn test_suspend_excludes_paused_time() {
        let t0 = Instant::now();
        let mut rec = TimerRecord::new("outer".into());
        rec.start(t0);
        rec.suspend(t0 + Duration::from_millis(2));
        assert!(!rec.is_running());
        rec.resume(t0 + Duration::from_millis(10));
        rec.stop(t0 + Duration::from_millis(11));

        assert_eq!(rec.total(), Duration::from_millis(3));
        assert_eq!(rec.count(), 1);
    }
}
