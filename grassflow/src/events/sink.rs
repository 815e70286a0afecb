//! Event sink trait and implementations.

use crate::core::{PipelineEvent, StageFailure};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::io::{self, Stdout, Write};
use std::sync::Arc;
use tracing::{info, warn};

/// Trait for sinks that receive pipeline events.
///
/// Emitting never fails from the runner's point of view. Sinks that can
/// fail internally log and swallow the error.
pub trait EventSink: Send + Sync {
    /// Emits an event.
    fn emit(&self, event: &PipelineEvent);
}

/// A no-op event sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

impl EventSink for NoOpEventSink {
    fn emit(&self, _event: &PipelineEvent) {}
}

/// Renders an event as the console lines the runner prints.
#[must_use]
pub fn render_event(event: &PipelineEvent) -> String {
    match event {
        PipelineEvent::RunStarted { workflow, .. } => format!("=== {workflow} ==="),
        PipelineEvent::GroupStarted { step, label } => format!("\n[Step {step}] {label}"),
        PipelineEvent::StageStarted { stage, script } => {
            format!("\n--- Running: {stage} ({}) ---", script.display())
        }
        PipelineEvent::StageFailed { stage, failure } => match failure {
            StageFailure::ExitStatus { .. } => format!("Failed to run {stage}: {failure}"),
            StageFailure::Unexpected { .. } => {
                format!("Unexpected error running {stage}: {failure}")
            }
        },
        PipelineEvent::ManualStep { artefact, location } => {
            format!(">> NOTE: {artefact} must be run on {location} manually.")
        }
        PipelineEvent::RunCompleted { .. } => {
            "\n=== All steps completed successfully ===".to_string()
        }
    }
}

/// Prints the human-readable console transcript of a run.
pub struct ConsoleEventSink<W = Stdout> {
    out: Mutex<W>,
}

impl ConsoleEventSink<Stdout> {
    /// Creates a sink writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Default for ConsoleEventSink<Stdout> {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write + Send> ConsoleEventSink<W> {
    /// Creates a sink writing to the given writer.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W> fmt::Debug for ConsoleEventSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleEventSink").finish_non_exhaustive()
    }
}

impl<W: Write + Send> EventSink for ConsoleEventSink<W> {
    fn emit(&self, event: &PipelineEvent) {
        let mut out = self.out.lock();
        // Flush per event so banners stay ordered against child process output.
        let result = writeln!(out, "{}", render_event(event)).and_then(|()| out.flush());
        if let Err(e) = result {
            warn!(event_type = event.event_type(), error = %e, "Failed to write console event");
        }
    }
}

/// An event sink that forwards events to the tracing framework.
///
/// Every event, stage failures included, is logged at `INFO`. With the
/// default `warn` filter nothing is printed until `RUST_LOG` opts in.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingEventSink;

impl EventSink for LoggingEventSink {
    fn emit(&self, event: &PipelineEvent) {
        let data = event.to_value();
        match event {
            PipelineEvent::StageFailed { stage, failure } => {
                info!(
                    event_type = event.event_type(),
                    stage = %stage,
                    failure_kind = failure.kind(),
                    event_data = %data,
                    "Stage {} failed: {}", stage, failure
                );
            }
            _ => {
                info!(
                    event_type = event.event_type(),
                    event_data = %data,
                    "Event: {}", event.event_type()
                );
            }
        }
    }
}

/// Forwards every event to each wrapped sink, in order.
#[derive(Clone, Default)]
pub struct FanoutEventSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl FanoutEventSink {
    /// Creates an empty fan-out.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Returns the number of wrapped sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Returns true if no sinks are wrapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl fmt::Debug for FanoutEventSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FanoutEventSink")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl EventSink for FanoutEventSink {
    fn emit(&self, event: &PipelineEvent) {
        for sink in &self.sinks {
            sink.emit(event);
        }
    }
}

/// A collecting event sink for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: RwLock<Vec<PipelineEvent>>,
}

impl CollectingEventSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.read().clone()
    }

    /// Returns the event types in emission order.
    #[must_use]
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.read().iter().map(PipelineEvent::event_type).collect()
    }

    /// Returns `event_type` / stage pairs, useful for sequence assertions.
    #[must_use]
    pub fn timeline(&self) -> Vec<(&'static str, Option<String>)> {
        self.events
            .read()
            .iter()
            .map(|e| (e.event_type(), e.stage().map(str::to_string)))
            .collect()
    }

    /// Returns the failure events.
    #[must_use]
    pub fn failures(&self) -> Vec<(String, StageFailure)> {
        self.events
            .read()
            .iter()
            .filter_map(|e| match e {
                PipelineEvent::StageFailed { stage, failure } => {
                    Some((stage.clone(), failure.clone()))
                }
                _ => None,
            })
            .collect()
    }

    /// Returns the number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns true if no events have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Clears all collected events.
    pub fn clear(&self) {
        self.events.write().clear();
    }
}

impl EventSink for CollectingEventSink {
    fn emit(&self, event: &PipelineEvent) {
        self.events.write().push(event.clone());
    }
}
