//! # Figures and Axes
//!
//! A [`Figure`] owns a fixed `rows x cols` grid of [`Axes`]. Each axes keeps
//! its series and display settings; nothing is drawn until the figure is
//! rendered or saved.
//!
//! ## Lifecycle
//! A figure is open until [`Figure::close`]. Any access to the axes of a
//! closed figure, and rendering it, fails with `FigureClosed`.

use std::path::Path;

use crate::config::FontSizes;
use crate::error::{Result, ToolboxError};

use super::render;
use super::saver::SaveFormat;
use super::series::{extent, Series, COLOR_CYCLE};
use super::style::{AxesStyle, LegendPosition};
use super::ticks::Ticks;

/// Relative margin added around the data range when no limits are set
pub const DEFAULT_MARGIN: f64 = 0.05;

/// Default figure size in pixels
pub const DEFAULT_SIZE: (u32, u32) = (640, 480);

/// Default resolution used to convert font points to pixels
pub const DEFAULT_DPI: u32 = 100;

/// Resolved view limits of an axes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Limits {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

/// One plotting area with its series and settings
#[derive(Clone, Debug)]
pub struct Axes {
    series: Vec<Series>,
    title: Option<String>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    xlim: Option<(f64, f64)>,
    ylim: Option<(f64, f64)>,
    xmargin: f64,
    ymargin: f64,
    xticks: Ticks,
    yticks: Ticks,
    legend: Option<LegendPosition>,
    grid: bool,
    tick_labels: bool,
    center_axes: bool,
    axis_off: bool,
}

impl Default for Axes {
    fn default() -> Self {
        Self {
            series: Vec::new(),
            title: None,
            xlabel: None,
            ylabel: None,
            xlim: None,
            ylim: None,
            xmargin: DEFAULT_MARGIN,
            ymargin: DEFAULT_MARGIN,
            xticks: Ticks::Auto,
            yticks: Ticks::Auto,
            legend: None,
            grid: false,
            tick_labels: true,
            center_axes: false,
            axis_off: false,
        }
    }
}

impl Axes {
    // ---- drawing ----

    /// Add a line through `(xs[i], ys[i])`
    pub fn plot(&mut self, xs: &[f64], ys: &[f64]) -> Result<&mut Series> {
        let series = Series::line(xs, ys)?;
        Ok(self.add_series(series))
    }

    /// Add markers at `(xs[i], ys[i])`
    pub fn scatter(&mut self, xs: &[f64], ys: &[f64]) -> Result<&mut Series> {
        let series = Series::scatter(xs, ys)?;
        Ok(self.add_series(series))
    }

    /// Horizontal reference line
    pub fn axhline(&mut self, y: f64) -> &mut Series {
        self.add_series(Series::hline(y))
    }

    /// Vertical reference line
    pub fn axvline(&mut self, x: f64) -> &mut Series {
        self.add_series(Series::vline(x))
    }

    /// Add a prepared series; it gets the next cycle colour when it has none
    pub fn add_series(&mut self, mut series: Series) -> &mut Series {
        if series.color().is_none() {
            let color = COLOR_CYCLE[self.series.len() % COLOR_CYCLE.len()];
            series.with_color(color);
        }
        self.series.push(series);
        let last = self.series.len() - 1;
        &mut self.series[last]
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn series_mut(&mut self) -> &mut [Series] {
        &mut self.series
    }

    /// Remove all series, keeping the settings
    pub fn clear(&mut self) {
        self.series.clear();
    }

    // ---- settings ----

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.xlabel = Some(label.into());
        self
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.ylabel = Some(label.into());
        self
    }

    /// Fixed x range; must be finite and increasing
    pub fn set_xlim(&mut self, lim: (f64, f64)) -> Result<&mut Self> {
        check_lim(lim)?;
        self.xlim = Some(lim);
        Ok(self)
    }

    /// Fixed y range; must be finite and increasing
    pub fn set_ylim(&mut self, lim: (f64, f64)) -> Result<&mut Self> {
        check_lim(lim)?;
        self.ylim = Some(lim);
        Ok(self)
    }

    /// Relative padding around the x data range; ignored while `xlim` is set
    pub fn set_xmargin(&mut self, margin: f64) -> Result<&mut Self> {
        self.xmargin = check_margin(margin)?;
        Ok(self)
    }

    /// Relative padding around the y data range; ignored while `ylim` is set
    pub fn set_ymargin(&mut self, margin: f64) -> Result<&mut Self> {
        self.ymargin = check_margin(margin)?;
        Ok(self)
    }

    pub fn set_xticks(&mut self, ticks: Ticks) -> &mut Self {
        self.xticks = ticks;
        self
    }

    pub fn set_yticks(&mut self, ticks: Ticks) -> &mut Self {
        self.yticks = ticks;
        self
    }

    /// Show a legend of the labelled series
    pub fn legend(&mut self, position: LegendPosition) -> &mut Self {
        self.legend = Some(position);
        self
    }

    pub fn grid(&mut self, on: bool) -> &mut Self {
        self.grid = on;
        self
    }

    /// Show or hide the tick labels; tick positions still drive the grid
    pub fn set_tick_labels(&mut self, on: bool) -> &mut Self {
        self.tick_labels = on;
        self
    }

    /// Draw the axes through the origin instead of along the frame
    pub fn center_axes(&mut self) -> &mut Self {
        self.center_axes = true;
        self
    }

    /// Hide frame, ticks and labels
    pub fn axis_off(&mut self) -> &mut Self {
        self.axis_off = true;
        self
    }

    /// Apply every setting present in `style`.
    ///
    /// All values are checked before any is applied.
    pub fn apply_style(&mut self, style: &AxesStyle) -> Result<&mut Self> {
        if let Some(lim) = style.xlim {
            check_lim(lim)?;
        }
        if let Some(lim) = style.ylim {
            check_lim(lim)?;
        }
        let xmargin = style.xmargin.map(check_margin).transpose()?;
        let ymargin = style.ymargin.map(check_margin).transpose()?;

        if let Some(title) = &style.title {
            self.title = Some(title.clone());
        }
        if let Some(label) = &style.xlabel {
            self.xlabel = Some(label.clone());
        }
        if let Some(label) = &style.ylabel {
            self.ylabel = Some(label.clone());
        }
        if let Some(ticks) = &style.xticks {
            self.xticks = ticks.clone();
        }
        if let Some(ticks) = &style.yticks {
            self.yticks = ticks.clone();
        }
        if style.xlim.is_some() {
            self.xlim = style.xlim;
        }
        if style.ylim.is_some() {
            self.ylim = style.ylim;
        }
        if let Some(margin) = xmargin {
            self.xmargin = margin;
        }
        if let Some(margin) = ymargin {
            self.ymargin = margin;
        }
        if style.legend.is_some() {
            self.legend = style.legend;
        }
        if let Some(grid) = style.grid {
            self.grid = grid;
        }
        if let Some(on) = style.tick_labels {
            self.tick_labels = on;
        }
        if let Some(center) = style.center_axes {
            self.center_axes = center;
        }
        if let Some(off) = style.axis_off {
            self.axis_off = off;
        }
        Ok(self)
    }

    // ---- queries ----

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn xlabel(&self) -> Option<&str> {
        self.xlabel.as_deref()
    }

    pub fn ylabel(&self) -> Option<&str> {
        self.ylabel.as_deref()
    }

    pub fn xticks(&self) -> &Ticks {
        &self.xticks
    }

    pub fn yticks(&self) -> &Ticks {
        &self.yticks
    }

    pub fn legend_position(&self) -> Option<LegendPosition> {
        self.legend
    }

    pub fn has_grid(&self) -> bool {
        self.grid
    }

    pub fn has_tick_labels(&self) -> bool {
        self.tick_labels
    }

    pub fn has_centered_axes(&self) -> bool {
        self.center_axes
    }

    pub fn is_axis_off(&self) -> bool {
        self.axis_off
    }

    /// Current view limits.
    ///
    /// Explicit limits win; otherwise the extent of the visible series plus
    /// the margin. Without data the range is `(0, 1)`.
    pub fn limits(&self) -> Limits {
        let visible = || self.series.iter().filter(|s| s.is_visible()).map(Series::bounds);
        let x = self
            .xlim
            .unwrap_or_else(|| padded(extent_of(visible().filter_map(|b| b.0)), self.xmargin));
        let y = self
            .ylim
            .unwrap_or_else(|| padded(extent_of(visible().filter_map(|b| b.1)), self.ymargin));
        Limits { x, y }
    }

    /// Fix both ranges, e.g. to the limits of another axes
    pub fn set_limits(&mut self, limits: Limits) -> Result<&mut Self> {
        check_lim(limits.x)?;
        check_lim(limits.y)?;
        self.xlim = Some(limits.x);
        self.ylim = Some(limits.y);
        Ok(self)
    }
}

fn check_lim((lo, hi): (f64, f64)) -> Result<()> {
    if !(lo.is_finite() && hi.is_finite() && lo < hi) {
        return Err(ToolboxError::invalid_input(format!(
            "limits must be finite and increasing, got ({}, {})",
            lo, hi
        )));
    }
    Ok(())
}

fn check_margin(margin: f64) -> Result<f64> {
    if !(margin.is_finite() && margin >= 0.0) {
        return Err(ToolboxError::invalid_input(format!(
            "margin must be non-negative, got {}",
            margin
        )));
    }
    Ok(margin)
}

fn extent_of(ranges: impl Iterator<Item = (f64, f64)>) -> Option<(f64, f64)> {
    extent(ranges.flat_map(|(lo, hi)| [lo, hi]))
}

fn padded(range: Option<(f64, f64)>, margin: f64) -> (f64, f64) {
    match range {
        None => (0.0, 1.0),
        Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
        Some((lo, hi)) => {
            let pad = (hi - lo) * margin;
            (lo - pad, hi + pad)
        }
    }
}

/// A grid of axes rendered together
#[derive(Clone, Debug)]
pub struct Figure {
    axes: Vec<Axes>,
    rows: usize,
    cols: usize,
    current: usize,
    size: (u32, u32),
    dpi: u32,
    fonts: FontSizes,
    closed: bool,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure {
    /// Figure with a single axes
    pub fn new() -> Self {
        Self {
            axes: vec![Axes::default()],
            rows: 1,
            cols: 1,
            current: 0,
            size: DEFAULT_SIZE,
            dpi: DEFAULT_DPI,
            fonts: FontSizes::default(),
            closed: false,
        }
    }

    /// Figure with a `rows x cols` grid of axes, indexed row-major
    pub fn subplots(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(ToolboxError::invalid_input(format!(
                "subplot grid must be non-empty, got {}x{}",
                rows, cols
            )));
        }
        Ok(Self {
            axes: vec![Axes::default(); rows * cols],
            rows,
            cols,
            ..Self::new()
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    pub fn axes(&self, index: usize) -> Result<&Axes> {
        self.check_open()?;
        let len = self.axes.len();
        self.axes
            .get(index)
            .ok_or(ToolboxError::AxesOutOfRange { index, len })
    }

    /// Mutable axes; also makes it the current axes
    pub fn axes_mut(&mut self, index: usize) -> Result<&mut Axes> {
        self.check_open()?;
        let len = self.axes.len();
        if index >= len {
            return Err(ToolboxError::AxesOutOfRange { index, len });
        }
        self.current = index;
        Ok(&mut self.axes[index])
    }

    /// Current axes (the first one until another is selected)
    pub fn gca(&mut self) -> Result<&mut Axes> {
        let current = self.current;
        self.axes_mut(current)
    }

    pub fn current_axes(&self) -> Result<&Axes> {
        self.axes(self.current)
    }

    /// Open axes in row-major order
    pub fn all_axes(&self) -> Result<&[Axes]> {
        self.check_open()?;
        Ok(&self.axes)
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Output size in pixels
    pub fn set_size(&mut self, size: (u32, u32)) -> Result<()> {
        check_size(size)?;
        self.size = size;
        Ok(())
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn set_dpi(&mut self, dpi: u32) {
        self.dpi = dpi.max(1);
    }

    pub fn fonts(&self) -> &FontSizes {
        &self.fonts
    }

    pub fn set_fonts(&mut self, fonts: FontSizes) {
        self.fonts = fonts;
    }

    /// Render at the current size to an SVG document
    pub fn render_svg(&self) -> Result<String> {
        self.check_open()?;
        render::to_svg_string(self, self.size)
    }

    /// Render to `path` at `size` pixels, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>, format: SaveFormat, size: (u32, u32)) -> Result<()> {
        self.check_open()?;
        check_size(size)?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        match format {
            SaveFormat::Png => render::to_png_file(self, path, size),
            SaveFormat::Svg => render::to_svg_file(self, path, size),
        }
    }

    fn check_open(&self) -> Result<()> {
        if self.closed {
            return Err(ToolboxError::FigureClosed);
        }
        Ok(())
    }
}

fn check_size((width, height): (u32, u32)) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(ToolboxError::invalid_input(format!(
            "figure size must be positive, got {}x{}",
            width, height
        )));
    }
    Ok(())
}

/// Copy the view limits of `from`'s current axes onto `to`'s current axes
pub fn transfer_limits(from: &Figure, to: &mut Figure) -> Result<()> {
    let limits = from.current_axes()?.limits();
    to.gca()?.set_limits(limits)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_limits_from_data_and_margin() {
        let mut figure = Figure::new();
        let axes = figure.gca().unwrap();
        axes.plot(&[0.0, 10.0], &[-1.0, 1.0]).unwrap();
        let limits = axes.limits();
        assert_eq!(limits.x, (-0.5, 10.5));
        assert_abs_diff_eq!(limits.y.0, -1.1, epsilon = 1e-12);
        assert_abs_diff_eq!(limits.y.1, 1.1, epsilon = 1e-12);

        axes.set_xmargin(0.0).unwrap();
        axes.set_ylim((-2.0, 2.0)).unwrap();
        let limits = axes.limits();
        assert_eq!(limits.x, (0.0, 10.0));
        assert_eq!(limits.y, (-2.0, 2.0));
    }

    #[test]
    fn test_reference_lines_and_empty_axes() {
        let mut axes = Axes::default();
        assert_eq!(axes.limits(), Limits { x: (0.0, 1.0), y: (0.0, 1.0) });
        axes.axhline(3.0);
        assert_eq!(axes.limits().y, (2.5, 3.5));
        assert_eq!(axes.limits().x, (0.0, 1.0));
    }

    #[test]
    fn test_hidden_series_ignored_for_limits() {
        let mut axes = Axes::default();
        axes.set_xmargin(0.0).unwrap().set_ymargin(0.0).unwrap();
        axes.plot(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        axes.plot(&[0.0, 100.0], &[0.0, 100.0]).unwrap().set_visible(false);
        assert_eq!(axes.limits().x, (0.0, 1.0));
    }

    #[test]
    fn test_color_cycle() {
        let mut axes = Axes::default();
        let first = axes.plot(&[0.0], &[0.0]).unwrap().color().unwrap();
        let second = axes.plot(&[0.0], &[0.0]).unwrap().color().unwrap();
        assert_ne!((first.0, first.1, first.2), (second.0, second.1, second.2));
    }

    #[test]
    fn test_invalid_limits_rejected() {
        let mut axes = Axes::default();
        assert!(axes.set_xlim((1.0, 1.0)).is_err());
        assert!(axes.set_ylim((0.0, f64::NAN)).is_err());
        assert!(axes.set_xmargin(-0.1).is_err());

        let style = AxesStyle {
            title: Some("t".into()),
            ylim: Some((2.0, 1.0)),
            ..AxesStyle::default()
        };
        assert!(axes.apply_style(&style).is_err());
        assert_eq!(axes.title(), None);
    }

    #[test]
    fn test_apply_style() {
        let mut axes = Axes::default();
        let style = AxesStyle {
            title: Some("loss".into()),
            xlabel: Some("epoch".into()),
            xlim: Some((0.0, 5.0)),
            xmargin: Some(0.3),
            legend: Some(LegendPosition::LowerLeft),
            center_axes: Some(true),
            ..AxesStyle::default()
        };
        axes.apply_style(&style).unwrap();
        assert_eq!(axes.title(), Some("loss"));
        assert_eq!(axes.xlabel(), Some("epoch"));
        assert_eq!(axes.limits().x, (0.0, 5.0));
        assert_eq!(axes.legend_position(), Some(LegendPosition::LowerLeft));
        assert!(axes.has_centered_axes());
        assert!(!axes.is_axis_off());
    }

    #[test]
    fn test_subplots_indexing() {
        let mut figure = Figure::subplots(2, 3).unwrap();
        assert_eq!(figure.shape(), (2, 3));
        assert_eq!(figure.len(), 6);
        figure.axes_mut(4).unwrap().set_title("fifth");
        assert_eq!(figure.gca().unwrap().title(), Some("fifth"));
        assert!(matches!(
            figure.axes(6),
            Err(ToolboxError::AxesOutOfRange { index: 6, len: 6 })
        ));
        assert!(Figure::subplots(0, 2).is_err());
    }

    #[test]
    fn test_closed_figure() {
        let mut figure = Figure::new();
        figure.close();
        assert!(figure.is_closed());
        assert!(matches!(figure.gca(), Err(ToolboxError::FigureClosed)));
        assert!(matches!(figure.render_svg(), Err(ToolboxError::FigureClosed)));
    }

    #[test]
    fn test_transfer_limits() {
        let mut source = Figure::new();
        source.gca().unwrap().set_xlim((1.0, 2.0)).unwrap().set_ylim((3.0, 4.0)).unwrap();
        let mut target = Figure::new();
        target.gca().unwrap().plot(&[0.0, 100.0], &[0.0, 100.0]).unwrap();

        transfer_limits(&source, &mut target).unwrap();
        let limits = target.current_axes().unwrap().limits();
        assert_eq!(limits, Limits { x: (1.0, 2.0), y: (3.0, 4.0) });
    }
}
