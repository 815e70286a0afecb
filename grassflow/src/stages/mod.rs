//! Stage, stage group and workflow definitions.
//!
//! Stages are external executable units. The runner only knows how to
//! launch them and observe how they terminate; what they compute is their
//! own business.

mod catalog;

pub use catalog::{grassland_workflow, EARTH_ENGINE_CONSOLE, WORKFLOW_TITLE};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A single external analysis unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stage {
    name: String,
    script: PathBuf,
}

impl Stage {
    /// Creates a new stage.
    #[must_use]
    pub fn new(name: impl Into<String>, script: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            script: script.into(),
        }
    }

    /// Returns the stage identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the script the stage executes, relative to the working directory.
    #[must_use]
    pub fn script(&self) -> &Path {
        &self.script
    }
}

/// A step that cannot be automated and must be run by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualStep {
    /// The artefact to run (e.g. a script file name).
    pub artefact: String,
    /// Where it has to be run.
    pub location: String,
}

impl ManualStep {
    /// Creates a new manual step.
    #[must_use]
    pub fn new(artefact: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            artefact: artefact.into(),
            location: location.into(),
        }
    }
}

/// An ordered, labelled collection of stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageGroup {
    label: String,
    stages: Vec<Stage>,
    manual_step: Option<ManualStep>,
}

impl StageGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            stages: Vec::new(),
            manual_step: None,
        }
    }

    /// Appends a stage.
    #[must_use]
    pub fn with_stage(mut self, name: impl Into<String>, script: impl Into<PathBuf>) -> Self {
        self.stages.push(Stage::new(name, script));
        self
    }

    /// Attaches the manual step announced after the group's stages.
    #[must_use]
    pub fn with_manual_step(mut self, step: ManualStep) -> Self {
        self.manual_step = Some(step);
        self
    }

    /// Returns the group label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the stages in execution order.
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Returns the manual step, if any.
    #[must_use]
    pub const fn manual_step(&self) -> Option<&ManualStep> {
        self.manual_step.as_ref()
    }
}

/// The full, ordered set of stage groups for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    title: String,
    groups: Vec<StageGroup>,
}

impl Workflow {
    /// Creates a workflow with no groups.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            groups: Vec::new(),
        }
    }

    /// Appends a group.
    #[must_use]
    pub fn with_group(mut self, group: StageGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Returns the workflow title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the groups in execution order.
    #[must_use]
    pub fn groups(&self) -> &[StageGroup] {
        &self.groups
    }

    /// Iterates over every stage in execution order.
    pub fn stages(&self) -> impl Iterator<Item = &Stage> {
        self.groups.iter().flat_map(|g| g.stages.iter())
    }

    /// Returns the total number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.groups.iter().map(|g| g.stages.len()).sum()
    }
}
