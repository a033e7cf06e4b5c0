//! # Logging Setup
//!
//! ## Role
//! Installs the `tracing` subscriber used by the profiler report, the cache
//! and the plot saver. Library code only emits events; installing a
//! subscriber is the caller's decision.
//!
//! ## Layers
//! - `EnvFilter` built from [`LogConfig::level`]
//! - `fmt` layer, optionally with span-close timings and an uptime clock

use tracing::subscriber::NoSubscriber;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogConfig;
use crate::error::{Result, ToolboxError};

/// Install the global subscriber.
///
/// Fails with a `Config` error on an invalid level or when a global
/// subscriber is already set.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = config.filter()?;
    let span_events = if config.span_events {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    // Only one of the two fmt layers is present; they differ in timer type
    let uptime_layer = config.uptime_timer.then(|| {
        fmt::layer()
            .with_span_events(span_events.clone())
            .with_target(config.target)
            .with_timer(fmt::time::uptime())
    });
    let clock_layer = (!config.uptime_timer).then(|| {
        fmt::layer()
            .with_span_events(span_events.clone())
            .with_target(config.target)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(uptime_layer)
        .with(clock_layer)
        .try_init()
        .map_err(|e| ToolboxError::config(format!("failed to install subscriber: {}", e)))
}

/// Run `f` with all logging suppressed on the current thread
pub fn with_logging_disabled<T>(f: impl FnOnce() -> T) -> T {
    tracing::subscriber::with_default(NoSubscriber::default(), f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let config = LogConfig {
            level: "warn".to_string(),
            ..LogConfig::default()
        };
        let _ = init_logging(&config);
        assert!(matches!(init_logging(&config), Err(ToolboxError::Config { .. })));
    }

    #[test]
    fn test_invalid_level() {
        let config = LogConfig {
            level: "toolbelt=loud".to_string(),
            ..LogConfig::default()
        };
        assert!(matches!(init_logging(&config), Err(ToolboxError::Config { .. })));
    }

    #[test]
    fn test_disabled_scope_returns_value() {
        let value = with_logging_disabled(|| {
            tracing::info!("not shown");
            42
        });
        assert_eq!(value, 42);
    }
}
