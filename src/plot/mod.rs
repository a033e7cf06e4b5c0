//! # Plotting Module
//!
//! ## Role
//! A thin wrapper over `plotters` for consistently styled, document-sized
//! figures. Figures are plain values: build them through [`Axes`], then
//! render or save them.
//!
//! ## Sub-modules
//! - `figure`: `Figure` and `Axes`, view limits, lifecycle
//! - `series`: drawable series and their style handles
//! - `style`: `AxesStyle` for one-call styling
//! - `ticks`: automatic ticks and multiples of π
//! - `render`: drawing onto `plotters` backends
//! - `saver`: `Plotter`, sizing and saving under the configured directory
//! - `dynamic`: keyed artists updated in place
//! - `gif`: animated GIFs from figure snapshots
//!
//! ## Example
//! ```no_run
//! use toolbelt::config::PlotConfig;
//! use toolbelt::plot::{FinishOptions, Plotter};
//!
//! # fn main() -> toolbelt::Result<()> {
//! let plotter = Plotter::new(PlotConfig::default())?;
//! let mut figure = plotter.create();
//! figure.gca()?.plot(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0])?.with_label("x²");
//!
//! let options = FinishOptions { relsize: Some(0.5), save: true, ..FinishOptions::default() };
//! for saved in plotter.finish([(&mut figure, "square")], &options)? {
//!     println!("{}", saved.include_snippet);
//! }
//! # Ok(())
//! # }
//! ```

pub mod dynamic;
pub mod figure;
pub mod gif;
mod render;
pub mod saver;
pub mod series;
pub mod style;
pub mod ticks;

pub use dynamic::DynamicPlot;
pub use figure::{transfer_limits, Axes, Figure, Limits};
pub use gif::GifSaver;
pub use saver::{FinishOptions, Plotter, SaveFormat, SavedPlot, GOLDEN_RATIO};
pub use series::{RGBColor, Series, SeriesKind, COLOR_CYCLE};
pub use style::{AxesStyle, LegendPosition};
pub use ticks::{MultipleTicks, TickMarkup, Ticks};
