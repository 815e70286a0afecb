//! Core types for grassflow runs.
//!
//! This module contains the fundamental value types:
//! - [`StageExit`]: how a stage process terminated
//! - [`RunOutcome`] / [`StageFailure`]: the classified result of one stage
//! - [`PipelineEvent`]: the event stream a run produces

mod event;
mod outcome;

pub use event::PipelineEvent;
pub use outcome::{RunOutcome, StageExit, StageFailure};
