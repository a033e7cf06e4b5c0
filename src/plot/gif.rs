//! Animated GIFs assembled from figure snapshots.

use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::info;

use crate::error::{Result, ToolboxError};
use crate::utils::{format_size, SizeUnit};

use super::figure::Figure;
use super::render::{draw_figure, render_error};

/// Default delay between frames in milliseconds
pub const DEFAULT_FRAME_DELAY_MS: u32 = 100;

/// Collects frames and writes them to `<output>/gif/<name>.gif`.
///
/// Every frame is drawn at the size of the first one.
#[derive(Debug)]
pub struct GifSaver {
    path: PathBuf,
    frames: Vec<Figure>,
    frame_delay_ms: u32,
}

impl GifSaver {
    pub fn new(output: impl AsRef<Path>, name: &str) -> Self {
        Self {
            path: output.as_ref().join("gif").join(format!("{}.gif", name)),
            frames: Vec::new(),
            frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
        }
    }

    pub fn with_frame_delay(mut self, delay_ms: u32) -> Self {
        self.frame_delay_ms = delay_ms;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Snapshot the current state of `figure`
    pub fn add_frame(&mut self, figure: &Figure) -> Result<()> {
        if figure.is_closed() {
            return Err(ToolboxError::FigureClosed);
        }
        self.frames.push(figure.clone());
        Ok(())
    }

    /// Encode all frames; returns the written path
    pub fn finish(self) -> Result<PathBuf> {
        let first = self
            .frames
            .first()
            .ok_or_else(|| ToolboxError::invalid_input("GIF has no frames"))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        {
            let root = BitMapBackend::gif(&self.path, first.size(), self.frame_delay_ms)
                .map_err(render_error)?
                .into_drawing_area();
            for frame in &self.frames {
                draw_figure(frame, &root)?;
                root.present().map_err(render_error)?;
            }
        }
        let bytes = fs::metadata(&self.path)?.len();
        info!(
            path = %self.path.display(),
            frames = self.frames.len(),
            size = %format_size(bytes, SizeUnit::Auto, 1),
            "GIF saved"
        );
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gif_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut saver = GifSaver::new(dir.path(), "orbit").with_frame_delay(50);

        let mut figure = Figure::new();
        figure.set_size((80, 60)).unwrap();
        let axes = figure.gca().unwrap();
        axes.axis_off().set_xlim((-1.0, 1.0)).unwrap().set_ylim((-1.0, 1.0)).unwrap();
        for step in 0..3 {
            let angle = f64::from(step) * 0.5;
            figure.gca().unwrap().clear();
            figure.gca().unwrap().scatter(&[angle.cos()], &[angle.sin()]).unwrap();
            saver.add_frame(&figure).unwrap();
        }
        assert_eq!(saver.frame_count(), 3);

        let path = saver.finish().unwrap();
        assert_eq!(path, dir.path().join("gif").join("orbit.gif"));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"GIF89a"));
    }

    #[test]
    fn test_empty_and_closed() {
        let dir = tempfile::tempdir().unwrap();
        let mut saver = GifSaver::new(dir.path(), "none");
        let mut figure = Figure::new();
        figure.close();
        assert!(matches!(saver.add_frame(&figure), Err(ToolboxError::FigureClosed)));
        assert!(saver.finish().is_err());
    }
}
