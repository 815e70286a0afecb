//! Runner configuration.
//!
//! The stage list itself is fixed at build time; only how stages are
//! launched can be configured, through these environment variables:
//!
//! - `GRASSFLOW_INTERPRETER`: program each stage script is passed to (default `python`)
//! - `GRASSFLOW_WORKDIR`: directory stage scripts are resolved against (default `.`)

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the interpreter.
pub const INTERPRETER_ENV: &str = "GRASSFLOW_INTERPRETER";

/// Environment variable overriding the working directory.
pub const WORKDIR_ENV: &str = "GRASSFLOW_WORKDIR";

/// How stage processes are launched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Program each stage script is passed to.
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    /// Working directory for stage processes.
    #[serde(default = "default_working_dir")]
    pub working_dir: PathBuf,
}

fn default_interpreter() -> String {
    "python".to_string()
}

fn default_working_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            working_dir: default_working_dir(),
        }
    }
}

impl RunnerConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is not unicode or the result is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| match env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode {
                name: name.to_string(),
            }),
        })
    }

    /// Loads the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Propagates lookup errors and validation failures.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<Option<String>, ConfigError>,
    {
        let mut config = Self::default();

        if let Some(interpreter) = lookup(INTERPRETER_ENV)? {
            config.interpreter = interpreter;
        }
        if let Some(dir) = lookup(WORKDIR_ENV)? {
            config.working_dir = PathBuf::from(dir);
        }

        config.validate()?;
        Ok(config)
    }

    /// Sets the interpreter.
    #[must_use]
    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    /// Sets the working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    /// Returns the working directory.
    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the interpreter is blank. This is the only
    /// configuration fault that stops `run-all` before the first stage. A
    /// missing working directory is not checked here; every stage then fails
    /// to spawn and is reported like any other launch fault.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interpreter.trim().is_empty() {
            return Err(ConfigError::EmptyInterpreter);
        }
        Ok(())
    }
}
