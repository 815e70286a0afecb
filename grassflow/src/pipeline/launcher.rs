//! Launching stages as child processes.

use crate::config::RunnerConfig;
use crate::core::StageExit;
use crate::errors::LaunchError;
use crate::stages::Stage;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// Starts a stage and waits for it to terminate.
///
/// Implementations must not return before the stage has finished; the runner
/// relies on this to keep stages strictly sequential.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StageLauncher: Send + Sync {
    /// Launches the stage and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the process could not be spawned or awaited.
    /// A process that runs and exits non-zero is not an error.
    async fn launch(&self, stage: &Stage) -> Result<StageExit, LaunchError>;
}

/// Runs each stage as `<interpreter> <script>` in the configured directory.
///
/// Standard streams are inherited so stage output appears inline with the
/// runner's banners.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    config: RunnerConfig,
}

impl ProcessLauncher {
    /// Creates a launcher from a configuration.
    #[must_use]
    pub const fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &RunnerConfig {
        &self.config
    }

    fn command(&self, stage: &Stage) -> Command {
        let mut cmd = Command::new(&self.config.interpreter);
        cmd.arg(stage.script())
            .current_dir(self.config.working_dir())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }
}

impl Default for ProcessLauncher {
    fn default() -> Self {
        Self::new(RunnerConfig::default())
    }
}

#[async_trait]
impl StageLauncher for ProcessLauncher {
    async fn launch(&self, stage: &Stage) -> Result<StageExit, LaunchError> {
        let program = &self.config.interpreter;

        let mut child = self
            .command(stage)
            .spawn()
            .map_err(|e| LaunchError::spawn(program, e))?;

        tracing::debug!(stage = %stage.name(), pid = ?child.id(), "Stage process spawned");

        let status = child.wait().await.map_err(|e| LaunchError::wait(program, e))?;
        Ok(StageExit::from(status))
    }
}
