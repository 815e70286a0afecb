//! Error types for the grassflow runner.
//!
//! Stage failures never surface as errors from the runner; they are turned
//! into [`RunOutcome`](crate::core::RunOutcome) values at the stage boundary.
//! The types here cover the seams where a fault can originate.

use thiserror::Error;

/// Errors raised while launching or awaiting a stage process.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The child process could not be started.
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        /// The program that was executed.
        program: String,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The child process started but waiting on it failed.
    #[error("failed to wait for '{program}': {source}")]
    Wait {
        /// The program that was executed.
        program: String,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },
}

impl LaunchError {
    /// Creates a spawn error.
    #[must_use]
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Creates a wait error.
    #[must_use]
    pub fn wait(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Wait {
            program: program.into(),
            source,
        }
    }

    /// Returns the kind of the underlying OS error.
    #[must_use]
    pub fn io_kind(&self) -> std::io::ErrorKind {
        match self {
            Self::Spawn { source, .. } | Self::Wait { source, .. } => source.kind(),
        }
    }
}

/// Errors raised while building a [`RunnerConfig`](crate::config::RunnerConfig).
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The interpreter command is empty or whitespace-only.
    #[error("interpreter cannot be empty")]
    EmptyInterpreter,

    /// An environment variable held a value that is not valid unicode.
    #[error("environment variable {name} is not valid unicode")]
    NotUnicode {
        /// The variable name.
        name: String,
    },
}
