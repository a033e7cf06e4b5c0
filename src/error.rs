//! # Centralized Error Handling
//!
//! Unified error type for every helper module, built with `thiserror`.
//! Misuse (stopping a timer that never ran, drawing on a closed figure,
//! mismatched input shapes) is reported here instead of panicking.

use thiserror::Error;

/// Main error type for toolbelt operations
#[derive(Error, Debug)]
pub enum ToolboxError {
    /// I/O errors (cache files, saved plots)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors (cache entries, config files)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A named timer was stopped or annotated before it was ever started
    #[error("profiler has not been started for \"{name}\" yet")]
    TimerNotStarted { name: String },

    /// A named timer exists but is not currently running
    #[error("timer \"{name}\" is not running")]
    TimerNotRunning { name: String },

    /// The stopwatch was stopped before it was started
    #[error("stopwatch has not been started yet")]
    StopwatchNotStarted,

    /// The stopwatch was read while still running
    #[error("stopwatch is still running")]
    StopwatchRunning,

    /// Two inputs that must line up have different lengths
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    /// Invalid argument value
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Drawing or rendering was requested on a closed figure
    #[error("figure has been closed")]
    FigureClosed,

    /// Axes index outside the figure's fixed grid
    #[error("axes index {index} out of range for figure with {len} axes")]
    AxesOutOfRange { index: usize, len: usize },

    /// Requested file format is not supported
    #[error("unsupported format: {format}")]
    UnsupportedFormat { format: String },

    /// Errors raised by the plotting backend
    #[error("Render error: {message}")]
    Render { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Type alias for Results using ToolboxError
pub type Result<T> = std::result::Result<T, ToolboxError>;

impl ToolboxError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a render error
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    pub(crate) fn shape(expected: usize, got: usize) -> Self {
        Self::ShapeMismatch { expected, got }
    }
}
