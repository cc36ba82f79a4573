//! Pluggable event sinks.

use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::events::{BatchEvent, EventKind};

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &BatchEvent);

    /// Called when the batch ends.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Collects events into a shared `Vec` for tests and inspection.
///
/// Clones share the same buffer, so a clone kept outside the bus sees
/// everything the registered copy received.
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<BatchEvent>>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far.
    pub fn events(&self) -> Vec<BatchEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &BatchEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Logs events through `tracing`: failures at `warn`, the rest at `info`.
///
/// Per-run successes are logged at `debug` to keep large batches readable.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &BatchEvent) {
        let run = event.run.map(|id| id.name()).unwrap_or_default();
        match &event.kind {
            EventKind::BatchStarted { runs, threads } => {
                info!(runs, threads, "batch started");
            }
            EventKind::RunClassified { response, critical_source } => {
                tracing::debug!(run = %run, response = %response, source = ?critical_source, "run classified");
            }
            EventKind::RunFailed { kind, message } => {
                warn!(run = %run, kind = kind.name(), "run failed: {message}");
            }
            EventKind::BatchFinished { classified, failed, wall_time, aborted } => {
                if *aborted {
                    warn!(classified, failed, wall_time, "batch aborted");
                } else {
                    info!(classified, failed, wall_time, "batch finished");
                }
            }
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
