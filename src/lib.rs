//! # Toolbelt Library
//!
//! Vendorable helpers for numerical experiments: math utilities, a
//! named-section profiler and a plotting wrapper with document-sized output.
//!
//! ## Modules
//! - `config`: plot and logging settings (serde)
//! - `error`: Error types and result aliases
//! - `logging`: `tracing` subscriber setup
//! - `math`: set operations, safe division, function analysis, mixtures
//! - `metrics`: calibration curves
//! - `plot`: figures, saving, dynamic plots, GIFs
//! - `profiler`: named timers, scopes and reports
//! - `utils`: formatting, loop watchdog, JSON flattening, caching, lazy maps and templates
//! - `vision`: bounding boxes and mask overlap

pub mod config;
pub mod error;
pub mod logging;
pub mod math;
pub mod metrics;
pub mod plot;
pub mod profiler;
pub mod utils;
pub mod vision;

// Re-export commonly used types
pub use config::{FontSizes, LogConfig, PlotConfig};
pub use error::{Result, ToolboxError};
pub use logging::{init_logging, with_logging_disabled};
pub use math::{cartesian_product, safe_div, setdiff2d, MixtureDistribution};
pub use metrics::{calibration_curve, CalibrationCurve};
pub use plot::{Axes, DynamicPlot, Figure, GifSaver, MultipleTicks, Plotter, SaveFormat};
pub use profiler::{Profiler, Stopwatch};
pub use utils::{
    format_duration, format_secs, format_size, Cache, LazyMap, LoopChecker, TemplateFormatter,
};
pub use vision::{pixel_overlap, BBox};
