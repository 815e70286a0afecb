//! # Grassflow
//!
//! Sequential runner for the Global Mountain Grassland analysis workflow.
//!
//! The workflow is a fixed, ordered list of stage groups. Each stage is an
//! external script launched as a child process. Grassflow provides:
//!
//! - **Strict ordering**: stages run one at a time, in declared order
//! - **Failure isolation**: a failing stage is reported and the run moves on
//! - **Event-driven output**: the console transcript and structured logs are
//!   both renderings of one event stream
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use grassflow::prelude::*;
//! use std::sync::Arc;
//!
//! let launcher = ProcessLauncher::new(RunnerConfig::from_env()?);
//! let runner = PipelineRunner::new(Arc::new(launcher), Arc::new(ConsoleEventSink::stdout()));
//! runner.run(&grassland_workflow()).await;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod core;
pub mod errors;
pub mod events;
pub mod observability;
pub mod pipeline;
pub mod stages;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::RunnerConfig;
    pub use crate::core::{PipelineEvent, RunOutcome, StageExit, StageFailure};
    pub use crate::errors::{ConfigError, LaunchError};
    pub use crate::events::{
        CollectingEventSink, ConsoleEventSink, EventSink, FanoutEventSink, LoggingEventSink,
        NoOpEventSink,
    };
    pub use crate::pipeline::{PipelineRunner, ProcessLauncher, StageLauncher};
    pub use crate::stages::{grassland_workflow, ManualStep, Stage, StageGroup, Workflow};
}
