//! # Dynamic Plots
//!
//! Keyed artists that are created on the first call and updated on later
//! calls, for plots that are redrawn while a computation progresses.
//! Artists render on top of the base figure in creation order.

use std::collections::HashMap;

use tracing::trace;

use crate::error::{Result, ToolboxError};

use super::figure::{Axes, Figure};
use super::series::Series;

/// Series created under one key
#[derive(Clone, Debug)]
struct Artist {
    series: Vec<Series>,
    visible: bool,
}

/// A figure plus keyed, updatable artists on its first axes
#[derive(Clone, Debug, Default)]
pub struct DynamicPlot {
    figure: Figure,
    artists: Vec<Artist>,
    keys: Vec<String>,
    index: HashMap<String, usize>,
}

impl DynamicPlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a prepared figure (style, static content)
    pub fn with_figure(figure: Figure) -> Self {
        Self {
            figure,
            ..Self::default()
        }
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    /// Axes that artists are drawn on
    pub fn axes_mut(&mut self) -> Result<&mut Axes> {
        self.figure.axes_mut(0)
    }

    /// Drop all artists; the base figure is kept
    pub fn reset(&mut self) {
        self.artists.clear();
        self.keys.clear();
        self.index.clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in creation order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }

    /// Series of an artist
    pub fn series(&self, key: &str) -> Option<&[Series]> {
        self.index.get(key).map(|&i| self.artists[i].series.as_slice())
    }

    pub fn is_visible(&self, key: &str) -> Option<bool> {
        self.index.get(key).map(|&i| self.artists[i].visible)
    }

    /// Create the artist with `create` on first use only; later calls just
    /// update its visibility.
    pub fn static_series<F>(&mut self, key: &str, create: F, visible: bool) -> Result<()>
    where
        F: FnOnce() -> Result<Vec<Series>>,
    {
        let slot = match self.index.get(key) {
            Some(&i) => i,
            None => self.insert(key, create()?),
        };
        self.artists[slot].visible = visible;
        Ok(())
    }

    /// Create the artist with `create` on first use, update it with `update`
    /// on later calls. A failed update leaves the visibility unchanged.
    pub fn dynamic_series<C, U>(&mut self, key: &str, create: C, update: U, visible: bool) -> Result<()>
    where
        C: FnOnce() -> Result<Vec<Series>>,
        U: FnOnce(&mut [Series]) -> Result<()>,
    {
        let slot = match self.index.get(key) {
            Some(&i) => {
                update(&mut self.artists[i].series)?;
                trace!(key, "artist updated");
                i
            }
            None => self.insert(key, create()?),
        };
        self.artists[slot].visible = visible;
        Ok(())
    }

    /// One line per `(xs, ys)` pair; later calls replace the line data and
    /// must pass the same number of pairs.
    pub fn dynamic_line(&mut self, key: &str, lines: &[(&[f64], &[f64])], visible: bool) -> Result<()> {
        self.dynamic_series(
            key,
            || lines.iter().map(|(xs, ys)| Series::line(xs, ys)).collect(),
            |series| {
                if series.len() != lines.len() {
                    return Err(ToolboxError::shape(series.len(), lines.len()));
                }
                // validate all pairs before touching any line
                for (xs, ys) in lines {
                    if xs.len() != ys.len() {
                        return Err(ToolboxError::shape(xs.len(), ys.len()));
                    }
                }
                for (line, (xs, ys)) in series.iter_mut().zip(lines) {
                    line.set_data(xs, ys)?;
                }
                Ok(())
            },
            visible,
        )
    }

    pub fn set_visible(&mut self, key: &str, visible: bool) -> Result<()> {
        let &slot = self
            .index
            .get(key)
            .ok_or_else(|| ToolboxError::invalid_input(format!("no artist with key \"{}\"", key)))?;
        self.artists[slot].visible = visible;
        Ok(())
    }

    /// Base figure with all artists added in creation order
    pub fn snapshot(&self) -> Result<Figure> {
        let mut figure = self.figure.clone();
        let axes = figure.axes_mut(0)?;
        for artist in &self.artists {
            for series in &artist.series {
                let mut series = series.clone();
                if !artist.visible {
                    series.set_visible(false);
                }
                axes.add_series(series);
            }
        }
        Ok(figure)
    }

    pub fn render_svg(&self) -> Result<String> {
        self.snapshot()?.render_svg()
    }

    fn insert(&mut self, key: &str, series: Vec<Series>) -> usize {
        let slot = self.artists.len();
        self.artists.push(Artist { series, visible: true });
        self.keys.push(key.to_string());
        self.index.insert(key.to_string(), slot);
        trace!(key, slot, "artist created");
        slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_static_created_once() {
        let mut plot = DynamicPlot::new();
        let calls = Cell::new(0);
        for visible in [true, false] {
            plot.static_series(
                "grid",
                || {
                    calls.set(calls.get() + 1);
                    Ok(vec![Series::hline(0.0)])
                },
                visible,
            )
            .unwrap();
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(plot.is_visible("grid"), Some(false));
    }

    #[test]
    fn test_dynamic_line_updates() {
        let mut plot = DynamicPlot::new();
        plot.dynamic_line("trace", &[(&[0.0, 1.0][..], &[0.0, 1.0][..])], true)
            .unwrap();
        plot.dynamic_line("trace", &[(&[0.0, 1.0, 2.0][..], &[5.0, 6.0, 7.0][..])], true)
            .unwrap();
        assert_eq!(plot.len(), 1);
        assert_eq!(plot.series("trace").unwrap()[0].ys(), &[5.0, 6.0, 7.0]);

        let err = plot.dynamic_line("trace", &[(&[0.0][..], &[0.0][..]), (&[1.0][..], &[1.0][..])], true);
        assert!(matches!(err, Err(ToolboxError::ShapeMismatch { expected: 1, got: 2 })));
        assert_eq!(plot.series("trace").unwrap()[0].ys(), &[5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_insertion_order_and_reset() {
        let mut plot = DynamicPlot::new();
        plot.dynamic_line("b", &[(&[0.0][..], &[0.0][..])], true).unwrap();
        plot.dynamic_line("a", &[(&[0.0][..], &[0.0][..])], false).unwrap();
        assert_eq!(plot.keys().collect::<Vec<_>>(), ["b", "a"]);

        let snapshot = plot.snapshot().unwrap();
        let series = snapshot.axes(0).unwrap().series();
        assert_eq!(series.len(), 2);
        assert!(series[0].is_visible());
        assert!(!series[1].is_visible());

        plot.reset();
        assert!(plot.is_empty());
        assert!(!plot.contains("a"));
        assert!(plot.set_visible("a", true).is_err());
    }

    #[test]
    fn test_render_hidden_artist() {
        let mut plot = DynamicPlot::new();
        plot.axes_mut().unwrap().axis_off();
        plot.dynamic_series(
            "pts",
            || Ok(vec![Series::scatter(&[0.2], &[0.3])?]),
            |_| Ok(()),
            false,
        )
        .unwrap();
        assert!(!plot.render_svg().unwrap().contains("circle"));
        plot.set_visible("pts", true).unwrap();
        assert!(plot.render_svg().unwrap().contains("circle"));
    }
}
