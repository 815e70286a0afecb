//! Pipeline execution.
//!
//! This module provides:
//! - The [`StageLauncher`] seam and its process-backed implementation
//! - The sequential [`PipelineRunner`]

mod integration_tests;
mod launcher;
mod runner;

pub use launcher::{ProcessLauncher, StageLauncher};
pub use runner::PipelineRunner;

#[cfg(test)]
pub use launcher::MockStageLauncher;
