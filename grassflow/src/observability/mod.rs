//! Observability utilities.

mod logging;

pub use logging::{init_logging, LogFormat, DEFAULT_FILTER, LOG_FORMAT_ENV};
