//! # Rendering
//!
//! Draws a [`Figure`] onto any `plotters` drawing area. Both coordinates of
//! a chart are a [`TickedAxis`]: a linear range whose key points and labels
//! are the ticks resolved from the axes settings, so every tick setting
//! renders through the same chart type.

use std::ops::Range;
use std::path::Path;

use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::config::FontSizes;
use crate::error::{Result, ToolboxError};

use super::figure::{Axes, Figure};
use super::series::{Series, SeriesKind};
use super::style::LegendPosition;
use super::ticks::format_tick;

const FONT: &str = "sans-serif";

/// Length of the line sample in the legend, in pixels
const LEGEND_SAMPLE: i32 = 20;

pub(crate) fn render_error(err: impl std::fmt::Display) -> ToolboxError {
    ToolboxError::render(err.to_string())
}

pub(crate) fn to_svg_string(figure: &Figure, size: (u32, u32)) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw_figure(figure, &root)?;
        root.present().map_err(render_error)?;
    }
    Ok(svg)
}

pub(crate) fn to_svg_file(figure: &Figure, path: &Path, size: (u32, u32)) -> Result<()> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    draw_figure(figure, &root)?;
    root.present().map_err(render_error)
}

pub(crate) fn to_png_file(figure: &Figure, path: &Path, size: (u32, u32)) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw_figure(figure, &root)?;
    root.present().map_err(render_error)
}

/// Draw all axes of `figure` onto `root`, split into the figure's grid.
///
/// Does not call `present`; the caller owns the backend lifecycle.
pub(crate) fn draw_figure<DB: DrawingBackend>(figure: &Figure, root: &DrawingArea<DB, Shift>) -> Result<()> {
    let axes = figure.all_axes()?;
    root.fill(&WHITE).map_err(render_error)?;

    let text = TextSizes::new(figure.fonts(), f64::from(figure.dpi()) / 72.0);
    let areas = root.split_evenly(figure.shape());
    for (axes, area) in axes.iter().zip(areas.iter()) {
        draw_axes(axes, area, &text)?;
    }
    Ok(())
}

/// Font sizes converted to pixels
struct TextSizes {
    base: f64,
    title: f64,
    label: f64,
    tick: f64,
    legend: f64,
}

impl TextSizes {
    fn new(fonts: &FontSizes, px_per_pt: f64) -> Self {
        Self {
            base: fonts.base * px_per_pt,
            title: fonts.title * px_per_pt,
            label: fonts.label * px_per_pt,
            tick: fonts.tick * px_per_pt,
            legend: fonts.legend * px_per_pt,
        }
    }

    fn margin(&self) -> u32 {
        (self.base * 0.8).ceil() as u32
    }

    fn x_label_area(&self, with_ticks: bool, with_desc: bool) -> u32 {
        let ticks = if with_ticks { self.tick * 2.0 } else { 0.0 };
        let desc = if with_desc { self.label * 1.5 } else { 0.0 };
        (ticks + desc).ceil() as u32
    }

    fn y_label_area(&self, with_ticks: bool, with_desc: bool) -> u32 {
        let ticks = if with_ticks { self.tick * 4.0 } else { 0.0 };
        let desc = if with_desc { self.label * 1.5 } else { 0.0 };
        (ticks + desc).ceil() as u32
    }
}

/// Linear `f64` coordinate whose key points are the resolved ticks
pub(crate) struct TickedAxis {
    coord: RangedCoordf64,
    ticks: Vec<(f64, String)>,
}

impl TickedAxis {
    pub(crate) fn new((lo, hi): (f64, f64), ticks: Vec<(f64, String)>) -> Self {
        Self {
            coord: (lo..hi).into(),
            ticks,
        }
    }

    fn len(&self) -> usize {
        self.ticks.len()
    }
}

impl Ranged for TickedAxis {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.coord.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        // ticks are major only
        if hint.weight().allow_light_points() {
            return Vec::new();
        }
        self.ticks
            .iter()
            .map(|(position, _)| *position)
            .take(hint.max_num_points())
            .collect()
    }

    fn range(&self) -> Range<f64> {
        self.coord.range()
    }
}

impl ValueFormatter<f64> for TickedAxis {
    fn format(value: &f64) -> String {
        format_tick(*value)
    }

    fn format_ext(&self, value: &f64) -> String {
        tick_label(&self.ticks, *value)
    }
}

fn draw_axes<DB: DrawingBackend>(axes: &Axes, area: &DrawingArea<DB, Shift>, text: &TextSizes) -> Result<()> {
    let limits = axes.limits();
    let (x0, x1) = limits.x;
    let (y0, y1) = limits.y;
    let xaxis = TickedAxis::new(limits.x, axes.xticks().resolve(x0, x1));
    let yaxis = TickedAxis::new(limits.y, axes.yticks().resolve(y0, y1));
    let (x_count, y_count) = (xaxis.len(), yaxis.len());

    let mut builder = ChartBuilder::on(area);
    builder.margin(text.margin());
    if let Some(title) = axes.title() {
        builder.caption(title, (FONT, text.title));
    }
    if !axes.is_axis_off() {
        // a label area of size 0 is not created, so no text is drawn there
        let tick_labels = axes.has_tick_labels();
        let x_area = text.x_label_area(tick_labels, axes.xlabel().is_some());
        let y_area = text.y_label_area(tick_labels, axes.ylabel().is_some());
        if x_area > 0 {
            builder.x_label_area_size(x_area);
        }
        if y_area > 0 {
            builder.y_label_area_size(y_area);
        }
    }
    let mut chart = builder
        .build_cartesian_2d(xaxis, yaxis)
        .map_err(render_error)?;

    if !axes.is_axis_off() {
        let mut mesh = chart.configure_mesh();
        mesh.x_labels(x_count.max(1))
            .y_labels(y_count.max(1))
            .label_style((FONT, text.tick))
            .axis_desc_style((FONT, text.label));
        if let Some(label) = axes.xlabel() {
            mesh.x_desc(label);
        }
        if let Some(label) = axes.ylabel() {
            mesh.y_desc(label);
        }
        if !axes.has_grid() {
            mesh.disable_mesh();
        }
        mesh.draw().map_err(render_error)?;
    }

    if axes.has_centered_axes() {
        let style = BLACK.stroke_width(1);
        if (y0..=y1).contains(&0.0) {
            chart
                .draw_series(LineSeries::new([(x0, 0.0), (x1, 0.0)], style))
                .map_err(render_error)?;
        }
        if (x0..=x1).contains(&0.0) {
            chart
                .draw_series(LineSeries::new([(0.0, y0), (0.0, y1)], style))
                .map_err(render_error)?;
        }
    }

    for series in axes.series().iter().filter(|s| s.is_visible()) {
        let style = series_style(series);
        let radius = series.width() + 1;
        let anno = match series.kind() {
            SeriesKind::Line => chart.draw_series(LineSeries::new(series.points(), style)),
            SeriesKind::Scatter => {
                chart.draw_series(series.points().map(|p| Circle::new(p, radius, style.filled())))
            }
            SeriesKind::HLine(y) => chart.draw_series(LineSeries::new([(x0, y), (x1, y)], style)),
            SeriesKind::VLine(x) => chart.draw_series(LineSeries::new([(x, y0), (x, y1)], style)),
        }
        .map_err(render_error)?;

        if let Some(label) = series.label() {
            if series.kind() == SeriesKind::Scatter {
                anno.label(label)
                    .legend(move |(x, y)| Circle::new((x + LEGEND_SAMPLE / 2, y), radius, style.filled()));
            } else {
                anno.label(label)
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + LEGEND_SAMPLE, y)], style));
            }
        }
    }

    if let Some(position) = axes.legend_position() {
        let labelled = axes
            .series()
            .iter()
            .any(|s| s.is_visible() && s.label().is_some());
        if labelled {
            chart
                .configure_series_labels()
                .position(label_position(position))
                .label_font((FONT, text.legend))
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(render_error)?;
        }
    }
    Ok(())
}

fn series_style(series: &Series) -> ShapeStyle {
    series.color().unwrap_or(BLACK).stroke_width(series.width())
}

fn label_position(position: LegendPosition) -> SeriesLabelPosition {
    match position {
        LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
        LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
    }
}

/// Resolved label of the tick at `value`, numeric for any other value
fn tick_label(ticks: &[(f64, String)], value: f64) -> String {
    let tolerance = 1e-9 * (1.0 + value.abs());
    ticks
        .iter()
        .find(|(position, _)| (position - value).abs() <= tolerance)
        .map(|(_, label)| label.clone())
        .unwrap_or_else(|| format_tick(value))
}
