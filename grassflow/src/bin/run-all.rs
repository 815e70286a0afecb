//! Runs every stage of the Global Mountain Grassland analysis workflow.
//!
//! Takes no arguments. Stage failures, including a missing working
//! directory, are reported on the console and never change the exit status.
//! A blank `GRASSFLOW_INTERPRETER` is the only error that exits non-zero.

use anyhow::Context;
use grassflow::observability::{init_logging, LogFormat};
use grassflow::prelude::*;
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging(LogFormat::from_env());

    let config = RunnerConfig::from_env().context("invalid runner configuration")?;
    tracing::debug!(?config, "Loaded runner configuration");

    let sink = FanoutEventSink::new()
        .with_sink(Arc::new(ConsoleEventSink::stdout()))
        .with_sink(Arc::new(LoggingEventSink));
    let runner = PipelineRunner::new(Arc::new(ProcessLauncher::new(config)), Arc::new(sink));

    let workflow = grassland_workflow();
    let run_id = runner.run(&workflow).await;
    tracing::info!(%run_id, stages = workflow.stage_count(), "Run finished");

    Ok(())
}
