//! Diagnostic logging setup.
//!
//! Diagnostics are written to stderr so the console transcript on stdout
//! stays readable. `RUST_LOG` controls filtering (default [`DEFAULT_FILTER`]);
//! `GRASSFLOW_LOG_FORMAT=json` switches to JSON lines.

use std::env;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "warn";

/// Environment variable selecting the log format.
pub const LOG_FORMAT_ENV: &str = "GRASSFLOW_LOG_FORMAT";

/// Log output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Compact,
    /// JSON lines for log aggregation.
    Json,
}

impl LogFormat {
    /// Parses a format name, falling back to compact.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Compact,
        }
    }

    /// Reads the format from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        env::var(LOG_FORMAT_ENV).map_or_else(|_| Self::default(), |s| Self::parse(&s))
    }
}

/// Installs the global tracing subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
