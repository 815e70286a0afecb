//! Sequential pipeline runner.

use super::StageLauncher;
use crate::core::{PipelineEvent, RunOutcome};
use crate::events::EventSink;
use crate::stages::{Stage, StageGroup, Workflow};
use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info_span, Instrument};
use uuid::Uuid;

/// Runs every stage of a workflow, one at a time, in declared order.
///
/// A stage that fails, for whatever reason, is reported through the event
/// sink and the run moves on to the next stage. Nothing a stage does can
/// abort the run.
#[derive(Clone)]
pub struct PipelineRunner {
    launcher: Arc<dyn StageLauncher>,
    sink: Arc<dyn EventSink>,
}

impl PipelineRunner {
    /// Creates a runner.
    #[must_use]
    pub fn new(launcher: Arc<dyn StageLauncher>, sink: Arc<dyn EventSink>) -> Self {
        Self { launcher, sink }
    }

    /// Runs a single stage and classifies its outcome.
    ///
    /// Emits `StageStarted` before launching and exactly one `StageFailed`
    /// if the stage does not succeed. The outcome is informational only.
    pub async fn run_stage(&self, stage: &Stage) -> RunOutcome {
        self.sink.emit(&PipelineEvent::StageStarted {
            stage: stage.name().to_string(),
            script: stage.script().to_path_buf(),
        });

        let start = Instant::now();
        let outcome = RunOutcome::from(
            self.launcher
                .launch(stage)
                .instrument(info_span!("stage", stage = %stage.name()))
                .await,
        );
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

        debug!(stage = %stage.name(), duration_ms, outcome = %outcome, "Stage finished");

        if let Some(failure) = outcome.failure() {
            self.sink.emit(&PipelineEvent::StageFailed {
                stage: stage.name().to_string(),
                failure: failure.clone(),
            });
        }

        outcome
    }

    /// Runs one group: its banner, its stages, then its manual step notice.
    pub async fn run_group(&self, step: usize, group: &StageGroup) {
        self.sink.emit(&PipelineEvent::GroupStarted {
            step,
            label: group.label().to_string(),
        });

        for stage in group.stages() {
            self.run_stage(stage).await;
        }

        if let Some(manual) = group.manual_step() {
            self.sink.emit(&PipelineEvent::ManualStep {
                artefact: manual.artefact.clone(),
                location: manual.location.clone(),
            });
        }
    }

    /// Runs the whole workflow and returns the run id.
    ///
    /// Always completes; per-stage failures are only visible as events.
    pub async fn run(&self, workflow: &Workflow) -> Uuid {
        let run_id = Uuid::new_v4();
        let span = info_span!("pipeline_run", run_id = %run_id, workflow = %workflow.title());

        async {
            self.sink.emit(&PipelineEvent::RunStarted {
                workflow: workflow.title().to_string(),
                run_id,
                started_at: Utc::now(),
            });

            for (index, group) in workflow.groups().iter().enumerate() {
                self.run_group(index + 1, group).await;
            }

            self.sink.emit(&PipelineEvent::RunCompleted {
                workflow: workflow.title().to_string(),
                run_id,
            });
        }
        .instrument(span)
        .await;

        run_id
    }
}

impl fmt::Debug for PipelineRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineRunner").finish_non_exhaustive()
    }
}
