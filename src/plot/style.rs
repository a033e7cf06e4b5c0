//! Axes styling applied in one call.

use super::ticks::Ticks;

/// Corner of the plotting area that holds the legend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LegendPosition {
    UpperLeft,
    #[default]
    UpperRight,
    LowerLeft,
    LowerRight,
}

/// Optional style settings for [`Axes::apply_style`](super::Axes::apply_style).
///
/// `None` leaves the current setting untouched. Explicit limits win over
/// margins, as with the individual setters.
///
/// ```
/// use toolbelt::plot::{AxesStyle, Figure};
///
/// let mut figure = Figure::new();
/// let style = AxesStyle {
///     title: Some("loss".into()),
///     xlim: Some((0.0, 10.0)),
///     ..AxesStyle::default()
/// };
/// figure.gca().unwrap().apply_style(&style).unwrap();
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxesStyle {
    pub title: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    pub xmargin: Option<f64>,
    pub ymargin: Option<f64>,
    pub xticks: Option<Ticks>,
    pub yticks: Option<Ticks>,
    pub legend: Option<LegendPosition>,
    pub grid: Option<bool>,
    pub tick_labels: Option<bool>,
    pub center_axes: Option<bool>,
    pub axis_off: Option<bool>,
}
