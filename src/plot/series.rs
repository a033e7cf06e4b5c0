//! Data series drawn on an [`Axes`](super::Axes).

pub use plotters::style::RGBColor;

use crate::error::{Result, ToolboxError};

/// Default colour cycle (the `tab10` palette)
pub const COLOR_CYCLE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

const DEFAULT_WIDTH: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SeriesKind {
    /// Connected polyline
    Line,
    /// Unconnected markers
    Scatter,
    /// Horizontal line across the whole view at this y
    HLine(f64),
    /// Vertical line across the whole view at this x
    VLine(f64),
}

/// One drawable series with its style.
///
/// Style setters return `&mut Self` so they chain off [`Axes::plot`](super::Axes::plot):
/// `axes.plot(&xs, &ys)?.with_label("fit").with_width(1);`
#[derive(Clone, Debug)]
pub struct Series {
    kind: SeriesKind,
    xs: Vec<f64>,
    ys: Vec<f64>,
    label: Option<String>,
    color: Option<RGBColor>,
    width: u32,
    visible: bool,
}

impl Series {
    fn with_kind(kind: SeriesKind, xs: Vec<f64>, ys: Vec<f64>) -> Self {
        Self {
            kind,
            xs,
            ys,
            label: None,
            color: None,
            width: DEFAULT_WIDTH,
            visible: true,
        }
    }

    /// Polyline through `(xs[i], ys[i])`
    pub fn line(xs: &[f64], ys: &[f64]) -> Result<Self> {
        check_lengths(xs, ys)?;
        Ok(Self::with_kind(SeriesKind::Line, xs.to_vec(), ys.to_vec()))
    }

    /// Markers at `(xs[i], ys[i])`
    pub fn scatter(xs: &[f64], ys: &[f64]) -> Result<Self> {
        check_lengths(xs, ys)?;
        Ok(Self::with_kind(SeriesKind::Scatter, xs.to_vec(), ys.to_vec()))
    }

    pub fn hline(y: f64) -> Self {
        Self::with_kind(SeriesKind::HLine(y), Vec::new(), Vec::new())
    }

    pub fn vline(x: f64) -> Self {
        Self::with_kind(SeriesKind::VLine(x), Vec::new(), Vec::new())
    }

    pub fn with_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(&mut self, color: RGBColor) -> &mut Self {
        self.color = Some(color);
        self
    }

    /// Stroke width in pixels (marker radius for scatter)
    pub fn with_width(&mut self, width: u32) -> &mut Self {
        self.width = width.max(1);
        self
    }

    pub fn set_visible(&mut self, visible: bool) -> &mut Self {
        self.visible = visible;
        self
    }

    /// Replace the data of a line or scatter series
    pub fn set_data(&mut self, xs: &[f64], ys: &[f64]) -> Result<()> {
        match self.kind {
            SeriesKind::Line | SeriesKind::Scatter => {
                check_lengths(xs, ys)?;
                self.xs = xs.to_vec();
                self.ys = ys.to_vec();
                Ok(())
            }
            SeriesKind::HLine(_) | SeriesKind::VLine(_) => Err(ToolboxError::invalid_input(
                "reference lines have no data to replace",
            )),
        }
    }

    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn color(&self) -> Option<RGBColor> {
        self.color
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Finite points of a line or scatter series
    pub(crate) fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs
            .iter()
            .zip(&self.ys)
            .map(|(&x, &y)| (x, y))
            .filter(|(x, y)| x.is_finite() && y.is_finite())
    }

    /// Data extent along x and y; reference lines only constrain one axis
    pub(crate) fn bounds(&self) -> (Option<(f64, f64)>, Option<(f64, f64)>) {
        match self.kind {
            SeriesKind::Line | SeriesKind::Scatter => (
                extent(self.points().map(|p| p.0)),
                extent(self.points().map(|p| p.1)),
            ),
            SeriesKind::HLine(y) => (None, extent(std::iter::once(y))),
            SeriesKind::VLine(x) => (extent(std::iter::once(x)), None),
        }
    }
}

fn check_lengths(xs: &[f64], ys: &[f64]) -> Result<()> {
    if xs.len() != ys.len() {
        return Err(ToolboxError::shape(xs.len(), ys.len()));
    }
    Ok(())
}

/// Min and max of the finite values, if any
pub(crate) fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch() {
        let err = Series::line(&[1.0, 2.0, 3.0], &[1.0]).unwrap_err();
        assert!(matches!(err, ToolboxError::ShapeMismatch { expected: 3, got: 1 }));
    }

    #[test]
    fn test_builder_chain() {
        let mut series = Series::scatter(&[0.0], &[1.0]).unwrap();
        series.with_label("pts").with_color(COLOR_CYCLE[3]).with_width(0);
        assert_eq!(series.label(), Some("pts"));
        assert_eq!(series.width(), 1);
        let c = series.color().unwrap();
        assert_eq!((c.0, c.1, c.2), (214, 39, 40));
    }

    #[test]
    fn test_bounds_skip_non_finite() {
        let series = Series::line(&[0.0, 1.0, f64::NAN, 4.0], &[2.0, -1.0, 7.0, f64::INFINITY]).unwrap();
        assert_eq!(series.bounds(), (Some((0.0, 1.0)), Some((-1.0, 2.0))));
        assert_eq!(Series::hline(3.0).bounds(), (None, Some((3.0, 3.0))));
    }

    #[test]
    fn test_set_data() {
        let mut series = Series::line(&[0.0], &[0.0]).unwrap();
        series.set_data(&[1.0, 2.0], &[3.0, 4.0]).unwrap();
        assert_eq!(series.ys(), &[3.0, 4.0]);
        assert!(Series::vline(1.0).set_data(&[], &[]).is_err());
    }
}
