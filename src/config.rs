//! # Configuration
//!
//! ## Role
//! Plain serde-deserializable settings for the plotting wrapper and the
//! logging setup. Values are passed explicitly to whatever uses them; there
//! is no process-wide configuration.
//!
//! ## Validation
//! - `basewidth` and `dpi` must be positive
//! - font sizes must be positive and finite
//! - the log level must parse as a `tracing` filter directive
//!
//! ## Example
//! ```json
//! { "basewidth": 5.5, "save_dir": "figures", "save_format": "svg", "fonts": { "title": 12 } }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::{Result, ToolboxError};
use crate::plot::SaveFormat;

/// Font sizes in points
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub base: f64,
    pub title: f64,
    pub label: f64,
    pub tick: f64,
    pub legend: f64,
}

impl FontSizes {
    /// Same size for every text element
    pub fn uniform(size: f64) -> Self {
        Self {
            base: size,
            title: size,
            label: size,
            tick: size,
            legend: size,
        }
    }

    fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("base", self.base),
            ("title", self.title),
            ("label", self.label),
            ("tick", self.tick),
            ("legend", self.legend),
        ]
        .into_iter()
    }
}

impl Default for FontSizes {
    fn default() -> Self {
        Self::uniform(10.0)
    }
}

/// Defaults for creating, sizing and saving plots
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Width of the target area (e.g. LaTeX `\textwidth`) in inches
    pub basewidth: f64,
    /// Pixels per inch for raster output
    pub dpi: u32,
    /// Root directory for saved plots; files go to `<save_dir>/<format>/`
    pub save_dir: PathBuf,
    pub save_format: SaveFormat,
    /// Save every finished plot, even when saving was not requested
    pub save_always: bool,
    pub fonts: FontSizes,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            basewidth: 6.0,
            dpi: 150,
            save_dir: PathBuf::from("."),
            save_format: SaveFormat::Png,
            save_always: false,
            fonts: FontSizes::default(),
        }
    }
}

impl PlotConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let config: PlotConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.basewidth.is_finite() && self.basewidth > 0.0) {
            return Err(ToolboxError::config(format!(
                "basewidth must be positive, got {}",
                self.basewidth
            )));
        }
        if self.dpi == 0 {
            return Err(ToolboxError::config("dpi must be positive"));
        }
        if let Some((name, size)) = self.fonts.iter().find(|(_, s)| !(s.is_finite() && *s > 0.0)) {
            return Err(ToolboxError::config(format!(
                "font size \"{}\" must be positive, got {}",
                name, size
            )));
        }
        Ok(())
    }
}

/// Settings for [`crate::logging::init_logging`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive, e.g. `"info"` or `"toolbelt=debug,warn"`
    pub level: String,
    /// Log span close events with their busy/idle time
    pub span_events: bool,
    /// Timestamp lines with time since start instead of wall-clock time
    pub uptime_timer: bool,
    /// Include the event target (module path)
    pub target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            span_events: false,
            uptime_timer: false,
            target: true,
        }
    }
}

impl LogConfig {
    pub fn validate(&self) -> Result<()> {
        self.filter().map(|_| ())
    }

    pub(crate) fn filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.level)
            .map_err(|e| ToolboxError::config(format!("invalid log level \"{}\": {}", self.level, e)))
    }
}
