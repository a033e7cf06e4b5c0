//! # Profiling Report
//!
//! Read-only view over a profiler's buckets in first-use order.

use std::fmt;
use std::time::Duration;

use super::record::TimerRecord;

/// One line of the report
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportEntry<'a> {
    pub name: &'a str,
    pub total: Duration,
    pub count: u64,
    pub info: Option<&'a str>,
}

impl<'a> From<&'a TimerRecord> for ReportEntry<'a> {
    fn from(record: &'a TimerRecord) -> Self {
        Self {
            name: record.name(),
            total: record.total(),
            count: record.count(),
            info: record.info(),
        }
    }
}

fn entry(record: &TimerRecord) -> ReportEntry<'_> {
    ReportEntry::from(record)
}

/// Lazy summary of all timer buckets
///
/// Iterating yields entries in the order the names were first started.
/// `Display` renders the summary table:
///
/// ```text
/// Profiling
///   load:    1.25s (3 calls)
///   compute: 12.40s (10 calls) (batch=32)
///   Total:   13.65s
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Report<'a> {
    records: &'a [TimerRecord],
}

impl<'a> Report<'a> {
    pub(crate) fn new(records: &'a [TimerRecord]) -> Self {
        Self { records }
    }

    pub fn iter(&self) -> impl Iterator<Item = ReportEntry<'a>> + 'a {
        self.records.iter().map(entry)
    }

    /// Sum over all buckets
    pub fn total(&self) -> Duration {
        self.records.iter().map(TimerRecord::total).sum()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Report over `names` only, in that order; unknown names print as `-`
    pub fn select<'s>(&self, names: &'s [&'s str]) -> Selection<'s>
    where
        'a: 's,
    {
        Selection {
            records: self.records,
            names,
        }
    }
}

/// Subset of a [`Report`], see [`Report::select`]
#[derive(Clone, Copy, Debug)]
pub struct Selection<'a> {
    records: &'a [TimerRecord],
    names: &'a [&'a str],
}

impl<'a> Selection<'a> {
    /// Requested names with their entry, `None` for names never started
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, Option<ReportEntry<'a>>)> + 'a {
        let records = self.records;
        let names = self.names;
        names
            .iter()
            .map(move |&name| (name, records.iter().find(|r| r.name() == name).map(entry)))
    }

    /// Sum over the known names
    pub fn total(&self) -> Duration {
        self.iter().filter_map(|(_, e)| e).map(|e| e.total).sum()
    }
}

impl<'a> IntoIterator for Report<'a> {
    type Item = ReportEntry<'a>;
    type IntoIter =
        std::iter::Map<std::slice::Iter<'a, TimerRecord>, fn(&'a TimerRecord) -> ReportEntry<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter().map(entry as fn(&'a TimerRecord) -> ReportEntry<'a>)
    }
}

/// Name column fits the longest name plus its colon, and "Total:"
fn name_width<'n>(names: impl Iterator<Item = &'n str>) -> usize {
    names
        .map(|name| name.len() + 1)
        .max()
        .unwrap_or(0)
        .max("Total:".len())
}

fn write_entry(f: &mut fmt::Formatter<'_>, width: usize, entry: &ReportEntry<'_>) -> fmt::Result {
    let label = format!("{}:", entry.name);
    let calls = if entry.count == 1 { "call" } else { "calls" };
    write!(
        f,
        "  {:<width$} {:4.2}s ({} {})",
        label,
        entry.total.as_secs_f64(),
        entry.count,
        calls,
    )?;
    if let Some(info) = entry.info {
        write!(f, " ({})", info)?;
    }
    writeln!(f)
}

fn write_total(f: &mut fmt::Formatter<'_>, width: usize, total: Duration) -> fmt::Result {
    write!(f, "  {:<width$} {:4.2}s", "Total:", total.as_secs_f64())
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = name_width(self.records.iter().map(TimerRecord::name));
        writeln!(f, "Profiling")?;
        for entry in self.iter() {
            write_entry(f, width, &entry)?;
        }
        write_total(f, width, self.total())
    }
}

impl fmt::Display for Selection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = name_width(self.names.iter().copied());
        writeln!(f, "Profiling")?;
        for (name, entry) in self.iter() {
            match entry {
                Some(entry) => write_entry(f, width, &entry)?,
                None => writeln!(f, "  {:<width$} -", format!("{}:", name))?,
            }
        }
        write_total(f, width, self.total())
    }
}
