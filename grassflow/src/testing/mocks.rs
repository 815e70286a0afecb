//! Mock launchers for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io;

use crate::core::StageExit;
use crate::errors::LaunchError;
use crate::pipeline::StageLauncher;
use crate::stages::Stage;

#[derive(Debug, Clone)]
enum Scripted {
    Exit(StageExit),
    Fault(io::ErrorKind, String),
}

/// A launcher that returns pre-arranged results and records every call.
///
/// Stages without an arranged result exit with status zero.
#[derive(Debug, Default)]
pub struct ScriptedLauncher {
    results: HashMap<String, Scripted>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedLauncher {
    /// Creates a launcher where every stage succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the named stage exit with the given code.
    #[must_use]
    pub fn exit_with(mut self, stage: impl Into<String>, code: i32) -> Self {
        self.results
            .insert(stage.into(), Scripted::Exit(StageExit::with_code(code)));
        self
    }

    /// Makes the named stage fail to launch.
    #[must_use]
    pub fn fault(
        mut self,
        stage: impl Into<String>,
        kind: io::ErrorKind,
        message: impl Into<String>,
    ) -> Self {
        self.results
            .insert(stage.into(), Scripted::Fault(kind, message.into()));
        self
    }

    /// Returns the stage names launched so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Returns how many times the named stage was launched.
    #[must_use]
    pub fn call_count(&self, stage: &str) -> usize {
        self.calls.lock().iter().filter(|s| *s == stage).count()
    }

    /// Resets call tracking.
    pub fn reset(&self) {
        self.calls.lock().clear();
    }
}

#[async_trait]
impl StageLauncher for ScriptedLauncher {
    async fn launch(&self, stage: &Stage) -> Result<StageExit, LaunchError> {
        self.calls.lock().push(stage.name().to_string());

        match self.results.get(stage.name()) {
            None => Ok(StageExit::with_code(0)),
            Some(Scripted::Exit(exit)) => Ok(*exit),
            Some(Scripted::Fault(kind, message)) => Err(LaunchError::spawn(
                "scripted",
                io::Error::new(*kind, message.clone()),
            )),
        }
    }
}
