//! Event sinks for run observability.
//!
//! The console transcript is one sink among others; the runner itself only
//! ever talks to an [`EventSink`].

mod sink;

pub use sink::{
    render_event, CollectingEventSink, ConsoleEventSink, EventSink, FanoutEventSink,
    LoggingEventSink, NoOpEventSink,
};
