//! Testing utilities for grassflow runs.
//!
//! This module provides a scripted launcher so runs can be exercised
//! without spawning processes.

mod mocks;

pub use mocks::ScriptedLauncher;
