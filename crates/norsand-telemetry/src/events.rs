//! Batch event types.
//!
//! Events are lightweight value types carrying just enough to follow a
//! batch: which run, what happened, and the outcome.

use serde::{Deserialize, Serialize};

use norsand_classify::{CriticalSource, ResponseType};
use norsand_types::{FailureKind, RunId};

/// An event emitted while processing a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEvent {
    /// Run the event refers to; `None` for batch-level events.
    pub run: Option<RunId>,
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Batch accepted and about to start.
    BatchStarted {
        /// Number of runs in the batch.
        runs: usize,
        /// Worker threads in the pool.
        threads: usize,
    },

    /// One run classified.
    RunClassified {
        response: ResponseType,
        critical_source: CriticalSource,
    },

    /// One run failed; the batch continues unless `kind` is fatal.
    RunFailed {
        kind: FailureKind,
        message: String,
    },

    /// Batch completed or aborted.
    BatchFinished {
        classified: usize,
        failed: usize,
        /// Wall-clock time (seconds).
        wall_time: f64,
        aborted: bool,
    },
}

impl BatchEvent {
    /// Event about a single run.
    pub fn run(id: RunId, kind: EventKind) -> Self {
        Self { run: Some(id), kind }
    }

    /// Batch-level event.
    pub fn batch(kind: EventKind) -> Self {
        Self { run: None, kind }
    }
}
