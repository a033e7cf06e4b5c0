//! # Human-Readable Formatting
//!
//! Byte sizes and durations for log lines and reports.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ToolboxError;

/// Unit for [`format_size`]; decimal (powers of 1000) prefixes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SizeUnit {
    /// Smallest unit keeping the value below 10 000
    #[default]
    Auto,
    B,
    KB,
    MB,
    GB,
    TB,
    PB,
}

/// Fixed units in increasing order; labels are two characters wide
const UNITS: [(SizeUnit, &str); 6] = [
    (SizeUnit::B, "B "),
    (SizeUnit::KB, "KB"),
    (SizeUnit::MB, "MB"),
    (SizeUnit::GB, "GB"),
    (SizeUnit::TB, "TB"),
    (SizeUnit::PB, "PB"),
];

impl FromStr for SizeUnit {
    type Err = ToolboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "auto" => Ok(SizeUnit::Auto),
            "B" => Ok(SizeUnit::B),
            "KB" => Ok(SizeUnit::KB),
            "MB" => Ok(SizeUnit::MB),
            "GB" => Ok(SizeUnit::GB),
            "TB" => Ok(SizeUnit::TB),
            "PB" => Ok(SizeUnit::PB),
            other => Err(ToolboxError::invalid_input(format!(
                "unit \"{}\" is not supported, use one of auto, B, KB, MB, GB, TB, PB",
                other
            ))),
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = UNITS
            .iter()
            .find(|(unit, _)| unit == self)
            .map_or("auto", |(_, label)| label.trim_end());
        f.write_str(label)
    }
}

/// Format a byte count, e.g. `format_size(123_456, SizeUnit::Auto, 1) == "123.5KB"`
pub fn format_size(bytes: u64, unit: SizeUnit, decimals: usize) -> String {
    let mut size = bytes as f64;
    let mut current = UNITS[0];
    for next in &UNITS[1..] {
        let done = match unit {
            SizeUnit::Auto => size < 10_000.0,
            fixed => fixed == current.0,
        };
        if done {
            break;
        }
        current = *next;
        size /= 1000.0;
    }
    format!("{:.*}{}", decimals, size, current.1)
}

/// Format seconds compactly: `1:02h`, `2:05min`, `12.3s`, `1.50s`, `0.012s`
pub fn format_secs(secs: f64) -> String {
    let hours = (secs / 3600.0).floor();
    let rest = secs - hours * 3600.0;
    let mins = (rest / 60.0).floor();
    let s = rest - mins * 60.0;

    if hours > 0.0 {
        format!("{:.0}:{:02.0}h", hours, mins)
    } else if mins > 0.0 {
        format!("{:.0}:{:02.0}min", mins, s)
    } else if s >= 10.0 {
        format!("{:.1}s", s)
    } else if s >= 1.0 {
        format!("{:.2}s", s)
    } else {
        format!("{:.3}s", s)
    }
}

pub fn format_duration(duration: Duration) -> String {
    format_secs(duration.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_auto() {
        assert_eq!(format_size(1234, SizeUnit::Auto, 0), "1234B ");
        assert_eq!(format_size(123_456, SizeUnit::Auto, 1), "123.5KB");
        assert_eq!(format_size(42_000_000_000, SizeUnit::Auto, 0), "42GB");
    }

    #[test]
    fn test_format_size_fixed() {
        assert_eq!(format_size(5_000_000, SizeUnit::MB, 2), "5.00MB");
        assert_eq!(format_size(2_000, SizeUnit::B, 0), "2000B ");
    }

    #[test]
    fn test_size_unit_parse() {
        assert_eq!("KB".parse::<SizeUnit>().unwrap(), SizeUnit::KB);
        assert!("KiB".parse::<SizeUnit>().is_err());
        assert_eq!(SizeUnit::B.to_string(), "B");
    }

    #[test]
    fn test_format_secs() {
        assert_eq!(format_secs(3725.0), "1:02h");
        assert_eq!(format_secs(125.0), "2:05min");
        assert_eq!(format_secs(12.34), "12.3s");
        assert_eq!(format_secs(1.5), "1.50s");
        assert_eq!(format_secs(0.0123), "0.012s");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.50s");
    }
}
