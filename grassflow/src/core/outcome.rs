//! Stage exit and run outcome types.

use crate::errors::LaunchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// How a stage process terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StageExit {
    /// The exit code, if the process exited normally.
    pub code: Option<i32>,
    /// The signal that terminated the process, if any (unix only).
    pub signal: Option<i32>,
}

impl StageExit {
    /// Creates an exit with the given code.
    #[must_use]
    pub const fn with_code(code: i32) -> Self {
        Self {
            code: Some(code),
            signal: None,
        }
    }

    /// Creates an exit caused by a signal.
    #[must_use]
    pub const fn signalled(signal: i32) -> Self {
        Self {
            code: None,
            signal: Some(signal),
        }
    }

    /// Returns true if the process exited with status zero.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

impl From<std::process::ExitStatus> for StageExit {
    fn from(status: std::process::ExitStatus) -> Self {
        #[cfg(unix)]
        let signal = std::os::unix::process::ExitStatusExt::signal(&status);
        #[cfg(not(unix))]
        let signal = None;

        Self {
            code: status.code(),
            signal,
        }
    }
}

impl fmt::Display for StageExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, self.signal) {
            (Some(code), _) => write!(f, "exit status {code}"),
            (None, Some(signal)) => write!(f, "terminated by signal {signal}"),
            (None, None) => write!(f, "terminated without exit status"),
        }
    }
}

/// Why a stage did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageFailure {
    /// The stage ran but terminated abnormally.
    #[error("{exit}")]
    ExitStatus {
        /// The observed termination.
        exit: StageExit,
    },

    /// The stage could not be launched or awaited at all.
    #[error("{message}")]
    Unexpected {
        /// Description of the fault.
        message: String,
    },
}

impl StageFailure {
    /// Returns a short name for the failure kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ExitStatus { .. } => "exit_status",
            Self::Unexpected { .. } => "unexpected_error",
        }
    }
}

/// The classified result of a single stage invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// The stage exited with status zero.
    Success,
    /// The stage failed.
    Failed(StageFailure),
}

impl RunOutcome {
    /// Classifies a stage exit.
    #[must_use]
    pub const fn from_exit(exit: StageExit) -> Self {
        if exit.success() {
            Self::Success
        } else {
            Self::Failed(StageFailure::ExitStatus { exit })
        }
    }

    /// Classifies a launch fault.
    #[must_use]
    pub fn from_launch_error(err: &LaunchError) -> Self {
        Self::Failed(StageFailure::Unexpected {
            message: err.to_string(),
        })
    }

    /// Returns true if the stage succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns the failure, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&StageFailure> {
        match self {
            Self::Success => None,
            Self::Failed(failure) => Some(failure),
        }
    }
}

impl From<Result<StageExit, LaunchError>> for RunOutcome {
    fn from(result: Result<StageExit, LaunchError>) -> Self {
        match result {
            Ok(exit) => Self::from_exit(exit),
            Err(err) => Self::from_launch_error(&err),
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failed(failure) => write!(f, "failed ({}): {failure}", failure.kind()),
        }
    }
}
