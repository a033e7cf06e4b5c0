//! # Named-Section Profiler
//!
//! ## Role
//! Wall-clock timing for arbitrarily many named sections of a run, with a
//! summary on demand. Single-threaded: a `Profiler` is an ordinary value that
//! callers own and pass by `&mut` to whatever needs timing.
//!
//! ## Semantics
//! - `start` creates the bucket on first use. Starting a running timer
//!   *restarts* it: the in-flight interval is dropped and not counted.
//! - `stop` folds the interval into the bucket and bumps the call count by
//!   one. Stopping an unknown or idle timer is an error and leaves every
//!   bucket untouched.
//! - `scope` returns a guard that stops the section on drop. Disjoint scopes
//!   pause the enclosing disjoint scope while they run, so nested time is
//!   attributed to exactly one section.
//!
//! ## Example
//! ```rust
//! use toolbelt::profiler::Profiler;
//!
//! let mut profiler = Profiler::new();
//! {
//!     let mut outer = profiler.scope("epoch");
//!     let _inner = outer.scope("forward");
//! }
//! profiler.start("eval");
//! profiler.stop("eval")?;
//!
//! let names: Vec<_> = profiler.report().iter().map(|e| e.name).collect();
//! assert_eq!(names, ["epoch", "forward", "eval"]);
//! # Ok::<(), toolbelt::ToolboxError>(())
//! ```

mod record;
mod report;
mod stopwatch;

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use crate::error::{Result, ToolboxError};
use crate::utils::format_duration;

pub use record::TimerRecord;
pub use report::{Report, ReportEntry, Selection};
pub use stopwatch::Stopwatch;

/// Collection of named timer buckets kept in first-use order
#[derive(Clone, Debug, Default)]
pub struct Profiler {
    records: Vec<TimerRecord>,
    /// Map from name to position in `records`
    index: HashMap<String, usize>,
    /// Names of the currently open disjoint scopes, innermost last
    sections: Vec<String>,
}

impl Profiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin timing `name`, restarting it if it is already running
    pub fn start(&mut self, name: &str) {
        let now = Instant::now();
        let record = self.record_or_insert(name);
        if record.start(now) {
            debug!(timer = name, "restarted running timer");
        } else {
            trace!(timer = name, "timer started");
        }
    }

    /// End timing `name` and return the completed interval
    pub fn stop(&mut self, name: &str) -> Result<Duration> {
        let now = Instant::now();
        let idx = *self
            .index
            .get(name)
            .ok_or_else(|| ToolboxError::TimerNotStarted {
                name: name.to_string(),
            })?;
        let interval = self.records[idx]
            .stop(now)
            .ok_or_else(|| ToolboxError::TimerNotRunning {
                name: name.to_string(),
            })?;
        trace!(
            timer = name,
            elapsed_ms = interval.as_secs_f64() * 1e3,
            "timer stopped"
        );
        Ok(interval)
    }

    pub fn get(&self, name: &str) -> Option<&TimerRecord> {
        self.index.get(name).map(|&idx| &self.records[idx])
    }

    /// Duration of the most recently completed interval of `name`
    pub fn last(&self, name: &str) -> Option<Duration> {
        self.get(name).and_then(TimerRecord::last)
    }

    /// Accumulated duration of `name`
    pub fn total(&self, name: &str) -> Option<Duration> {
        self.get(name).map(TimerRecord::total)
    }

    /// Completed call count of `name`
    pub fn count(&self, name: &str) -> Option<u64> {
        self.get(name).map(TimerRecord::count)
    }

    pub fn is_running(&self, name: &str) -> bool {
        self.get(name).is_some_and(TimerRecord::is_running)
    }

    /// Attach free-form information shown next to the bucket in reports
    pub fn set_info(&mut self, name: &str, info: impl Into<String>) -> Result<()> {
        let idx = *self
            .index
            .get(name)
            .ok_or_else(|| ToolboxError::TimerNotStarted {
                name: name.to_string(),
            })?;
        self.records[idx].set_info(info.into());
        Ok(())
    }

    /// Take over the buckets of `other`.
    ///
    /// Names already present are replaced in place; new names are appended in
    /// `other`'s order.
    pub fn merge(&mut self, other: Profiler) {
        for record in other.records {
            match self.index.get(record.name()) {
                Some(&idx) => self.records[idx] = record,
                None => {
                    self.index.insert(record.name().to_string(), self.records.len());
                    self.records.push(record);
                }
            }
        }
    }

    /// Delete all buckets
    pub fn reset(&mut self) {
        self.records.clear();
        self.index.clear();
        self.sections.clear();
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(TimerRecord::name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Summary of all buckets in first-use order
    pub fn report(&self) -> Report<'_> {
        Report::new(&self.records)
    }

    /// Emit the summary through `tracing` at info level
    pub fn log_report(&self) {
        let report = self.report();
        for entry in report.iter() {
            info!(
                timer = entry.name,
                total = %format_duration(entry.total),
                total_s = entry.total.as_secs_f64(),
                calls = entry.count,
                info = entry.info.unwrap_or(""),
                "profiling"
            );
        }
        info!(
            total = %format_duration(report.total()),
            total_s = report.total().as_secs_f64(),
            "profiling total"
        );
    }

    /// Time `name` until the returned guard is dropped.
    ///
    /// The enclosing disjoint scope is paused for the guard's lifetime.
    pub fn scope(&mut self, name: impl Into<String>) -> Scope<'_> {
        self.enter(name.into(), true)
    }

    /// Like [`Profiler::scope`], but nested scopes opened through the guard
    /// pause the enclosing disjoint scope instead of this one.
    pub fn scope_overlapping(&mut self, name: impl Into<String>) -> Scope<'_> {
        self.enter(name.into(), false)
    }

    /// Run `f` inside a disjoint scope named `name`
    pub fn time<T>(&mut self, name: impl Into<String>, f: impl FnOnce(&mut Profiler) -> T) -> T {
        let mut scope = self.scope(name);
        f(&mut scope)
    }

    fn enter(&mut self, name: String, disjoint: bool) -> Scope<'_> {
        let now = Instant::now();
        if let Some(parent) = self.sections.last() {
            if let Some(&idx) = self.index.get(parent) {
                self.records[idx].suspend(now);
            }
        }
        if disjoint {
            self.sections.push(name.clone());
        }
        self.start(&name);
        Scope {
            profiler: self,
            name,
            disjoint,
        }
    }

    fn leave(&mut self, name: &str, disjoint: bool) {
        if let Err(err) = self.stop(name) {
            warn!(timer = name, error = %err, "scope closed on idle timer");
        }
        if disjoint {
            self.sections.pop();
        }
        let now = Instant::now();
        if let Some(parent) = self.sections.last() {
            if let Some(&idx) = self.index.get(parent) {
                self.records[idx].resume(now);
            }
        }
    }

    fn record_or_insert(&mut self, name: &str) -> &mut TimerRecord {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                let idx = self.records.len();
                self.records.push(TimerRecord::new(name.to_string()));
                self.index.insert(name.to_string(), idx);
                idx
            }
        };
        &mut self.records[idx]
    }
}

/// Guard returned by [`Profiler::scope`]; stops its section on drop.
///
/// Dereferences to the profiler so nested scopes are opened through it.
#[derive(Debug)]
pub struct Scope<'p> {
    profiler: &'p mut Profiler,
    name: String,
    disjoint: bool,
}

impl Scope<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Deref for Scope<'_> {
    type Target = Profiler;

    fn deref(&self) -> &Profiler {
        self.profiler
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut Profiler {
        self.profiler
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.profiler.leave(&self.name, self.disjoint);
    }
}
