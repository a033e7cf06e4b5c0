//! # Plot Saving
//!
//! ## Role
//! [`Plotter`] creates figures with the configured defaults and finishes
//! them: final styling, sizing relative to the document text width and
//! saving under `<save_dir>/<format>/<name>.<ext>`.
//!
//! ## Sizing
//! Width is `figsize.0`, else `relsize * basewidth`, else `basewidth`.
//! Height is `width * ratio` with the golden ratio as default ratio. An
//! explicit `figsize` wins over both.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::config::PlotConfig;
use crate::error::{Result, ToolboxError};
use crate::utils::{format_size, SizeUnit};

use super::figure::Figure;
use super::style::AxesStyle;

/// Height/width ratio used when none is given
pub const GOLDEN_RATIO: f64 = 0.618_033_988_749_894_9;

/// Output file format of saved plots
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveFormat {
    #[default]
    Png,
    Svg,
}

impl SaveFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            SaveFormat::Png => "png",
            SaveFormat::Svg => "svg",
        }
    }

    pub fn extension(self) -> &'static str {
        self.as_str()
    }

    /// LaTeX line that includes the saved file
    pub fn include_snippet(self, width: &str, name: &str) -> String {
        match self {
            SaveFormat::Png => format!(r"\includegraphics[width={}]{{{}}}", width, name),
            SaveFormat::Svg => format!(r"\includesvg[width={}]{{{}}}", width, name),
        }
    }
}

impl fmt::Display for SaveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaveFormat {
    type Err = ToolboxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(SaveFormat::Png),
            "svg" => Ok(SaveFormat::Svg),
            _ => Err(ToolboxError::unsupported_format(s)),
        }
    }
}

/// Options for [`Plotter::finish`]
#[derive(Clone, Debug, Default)]
pub struct FinishOptions {
    /// Exact size in inches
    pub figsize: Option<(f64, f64)>,
    /// Width as a fraction of the configured base width
    pub relsize: Option<f64>,
    /// Height/width ratio; golden ratio by default
    pub ratio: Option<f64>,
    pub save: bool,
    /// Overrides the configured format unless `save_always` is set
    pub save_format: Option<SaveFormat>,
    /// Applied to the current axes of every figure
    pub style: AxesStyle,
}

/// A plot written by [`Plotter::finish`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedPlot {
    pub path: PathBuf,
    pub include_snippet: String,
}

/// Figure factory and saver driven by an explicit [`PlotConfig`]
#[derive(Clone, Debug)]
pub struct Plotter {
    config: PlotConfig,
}

impl Plotter {
    pub fn new(config: PlotConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// New single-axes figure with the configured fonts and resolution
    pub fn create(&self) -> Figure {
        let mut figure = Figure::new();
        figure.set_fonts(self.config.fonts.clone());
        figure.set_dpi(self.config.dpi);
        figure
    }

    /// Like [`Plotter::create`] with `style` applied to the axes
    pub fn create_with(&self, style: &AxesStyle) -> Result<Figure> {
        let mut figure = self.create();
        figure.gca()?.apply_style(style)?;
        Ok(figure)
    }

    /// Final figure size in inches
    pub fn figure_size(&self, options: &FinishOptions) -> Result<(f64, f64)> {
        if let Some((width, height)) = options.figsize {
            check_positive("figsize", width)?;
            check_positive("figsize", height)?;
            return Ok((width, height));
        }
        let ratio = options.ratio.unwrap_or(GOLDEN_RATIO);
        check_positive("ratio", ratio)?;
        let width = match options.relsize {
            Some(relsize) => {
                check_positive("relsize", relsize)?;
                relsize * self.config.basewidth
            }
            None => self.config.basewidth,
        };
        Ok((width, width * ratio))
    }

    /// Size in pixels at the configured resolution
    pub fn pixel_size(&self, inches: (f64, f64)) -> (u32, u32) {
        let dpi = f64::from(self.config.dpi);
        let px = |v: f64| ((v * dpi).round() as u32).max(1);
        (px(inches.0), px(inches.1))
    }

    /// Style, resize and (when requested or `save_always`) save every open
    /// figure. Closed figures are skipped. Returns the saved files.
    pub fn finish<'a, I>(&self, plots: I, options: &FinishOptions) -> Result<Vec<SavedPlot>>
    where
        I: IntoIterator<Item = (&'a mut Figure, &'a str)>,
    {
        let _span = info_span!("finish_plots").entered();
        let inches = self.figure_size(options)?;
        let pixels = self.pixel_size(inches);

        let mut open = Vec::new();
        for (figure, name) in plots {
            if figure.is_closed() {
                debug!(name, "skipping closed figure");
                continue;
            }
            figure.gca()?.apply_style(&options.style)?;
            figure.set_size(pixels)?;
            open.push((figure, name));
        }

        if !(options.save || self.config.save_always) {
            return Ok(Vec::new());
        }
        let format = match options.save_format {
            Some(format) if !self.config.save_always => format,
            _ => self.config.save_format,
        };
        let width = match options.relsize {
            Some(relsize) => format!(r"{}\textwidth", relsize),
            None => format!("{:.2}in", inches.0),
        };

        let mut saved = Vec::with_capacity(open.len());
        for (figure, name) in open {
            let path = self
                .config
                .save_dir
                .join(format.as_str())
                .join(format!("{}.{}", name, format.extension()));
            figure.save(&path, format, pixels)?;
            let include_snippet = format.include_snippet(&width, name);
            let bytes = std::fs::metadata(&path)?.len();
            info!(
                path = %path.display(),
                size = %format_size(bytes, SizeUnit::Auto, 1),
                include = %include_snippet,
                "plot saved"
            );
            saved.push(SavedPlot { path, include_snippet });
        }
        Ok(saved)
    }
}

fn check_positive(what: &str, value: f64) -> Result<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ToolboxError::invalid_input(format!(
            "{} must be positive, got {}",
            what, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plotter(dir: &std::path::Path) -> Plotter {
        Plotter::new(PlotConfig {
            basewidth: 4.0,
            dpi: 50,
            save_dir: dir.to_path_buf(),
            ..PlotConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("PNG".parse::<SaveFormat>().unwrap(), SaveFormat::Png);
        assert_eq!("svg".parse::<SaveFormat>().unwrap(), SaveFormat::Svg);
        for unsupported in ["pdf", "pgf", "tikz", ""] {
            assert!(matches!(
                unsupported.parse::<SaveFormat>(),
                Err(ToolboxError::UnsupportedFormat { .. })
            ));
        }
    }

    #[test]
    fn test_figure_size() {
        let dir = tempfile::tempdir().unwrap();
        let plotter = plotter(dir.path());

        let (w, h) = plotter.figure_size(&FinishOptions::default()).unwrap();
        assert_relative_eq!(w, 4.0);
        assert_relative_eq!(h, 4.0 * GOLDEN_RATIO);

        let options = FinishOptions {
            relsize: Some(0.5),
            ratio: Some(1.0),
            ..FinishOptions::default()
        };
        assert_eq!(plotter.figure_size(&options).unwrap(), (2.0, 2.0));

        let options = FinishOptions {
            figsize: Some((3.0, 1.0)),
            relsize: Some(0.5),
            ..FinishOptions::default()
        };
        assert_eq!(plotter.figure_size(&options).unwrap(), (3.0, 1.0));

        let options = FinishOptions {
            relsize: Some(-1.0),
            ..FinishOptions::default()
        };
        assert!(plotter.figure_size(&options).is_err());
        assert_eq!(plotter.pixel_size((2.0, 0.001)), (100, 1));
    }

    #[test]
    fn test_finish_without_save_only_resizes() {
        let dir = tempfile::tempdir().unwrap();
        let plotter = plotter(dir.path());
        let mut figure = plotter.create();
        let saved = plotter
            .finish([(&mut figure, "unsaved")], &FinishOptions::default())
            .unwrap();
        assert!(saved.is_empty());
        assert_eq!(figure.size(), (200, 124));
        assert!(!dir.path().join("png").exists());
    }

    #[test]
    fn test_finish_saves_svg_and_skips_closed() {
        let dir = tempfile::tempdir().unwrap();
        let plotter = plotter(dir.path());

        let mut kept = plotter.create();
        kept.gca().unwrap().axis_off().plot(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        let mut closed = plotter.create();
        closed.close();

        let options = FinishOptions {
            relsize: Some(0.5),
            save: true,
            save_format: Some(SaveFormat::Svg),
            ..FinishOptions::default()
        };
        let saved = plotter
            .finish([(&mut kept, "curve"), (&mut closed, "gone")], &options)
            .unwrap();

        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].path, dir.path().join("svg").join("curve.svg"));
        assert_eq!(saved[0].include_snippet, r"\includesvg[width=0.5\textwidth]{curve}");
        assert!(saved[0].path.is_file());
        assert!(!dir.path().join("svg").join("gone.svg").exists());
    }

    #[test]
    fn test_save_always_uses_configured_format() {
        let dir = tempfile::tempdir().unwrap();
        let plotter = Plotter::new(PlotConfig {
            dpi: 20,
            save_dir: dir.path().to_path_buf(),
            save_always: true,
            ..PlotConfig::default()
        })
        .unwrap();
        let mut figure = plotter.create();
        figure.gca().unwrap().axis_off();

        let options = FinishOptions {
            save_format: Some(SaveFormat::Svg),
            ..FinishOptions::default()
        };
        let saved = plotter.finish([(&mut figure, "always")], &options).unwrap();
        assert_eq!(saved[0].path, dir.path().join("png").join("always.png"));
        assert_eq!(saved[0].include_snippet, r"\includegraphics[width=6.00in]{always}");
        assert!(saved[0].path.is_file());
    }
}
