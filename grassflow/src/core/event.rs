//! Pipeline events emitted during a run.

use super::StageFailure;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

/// An event emitted by the runner.
///
/// Events are the only observable product of a run. Sinks render them to the
/// console, forward them to `tracing`, or collect them for inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// The run is starting.
    RunStarted {
        /// Workflow title.
        workflow: String,
        /// Unique id of this run.
        run_id: Uuid,
        /// When the run started.
        started_at: DateTime<Utc>,
    },
    /// A stage group is starting.
    GroupStarted {
        /// 1-based position of the group in the workflow.
        step: usize,
        /// Human-readable group label.
        label: String,
    },
    /// A stage is about to be launched.
    StageStarted {
        /// Stage identifier.
        stage: String,
        /// Script the stage executes.
        script: PathBuf,
    },
    /// A stage did not succeed.
    StageFailed {
        /// Stage identifier.
        stage: String,
        /// Why it failed.
        failure: StageFailure,
    },
    /// A step that has to be carried out by hand.
    ManualStep {
        /// The artefact to run.
        artefact: String,
        /// Where it has to be run.
        location: String,
    },
    /// Every group has been processed.
    RunCompleted {
        /// Workflow title.
        workflow: String,
        /// Unique id of this run.
        run_id: Uuid,
    },
}

impl PipelineEvent {
    /// Returns the dotted event type (e.g. `"stage.failed"`).
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::RunStarted { .. } => "run.started",
            Self::GroupStarted { .. } => "group.started",
            Self::StageStarted { .. } => "stage.started",
            Self::StageFailed { .. } => "stage.failed",
            Self::ManualStep { .. } => "manual.step",
            Self::RunCompleted { .. } => "run.completed",
        }
    }

    /// Returns the stage this event refers to, if any.
    #[must_use]
    pub fn stage(&self) -> Option<&str> {
        match self {
            Self::StageStarted { stage, .. } | Self::StageFailed { stage, .. } => Some(stage),
            _ => None,
        }
    }

    /// Converts the event to a JSON value.
    #[must_use]
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
