//! DiagnosticSink trait and HeadlessSink stub.
//!
//! A sink is called once per classified run with everything needed to draw
//! that run. Batch workers share one sink, so `record` takes `&self`.

use norsand_classify::{ClassificationResult, StressPath};
use norsand_material::MaterialParameters;
use norsand_types::{NorsandResult, RunId};

/// Trait for per-run diagnostic output.
///
/// # Implementations
/// - [`HeadlessSink`] — discards everything (batch default, tests)
/// - [`JsonFigureExporter`](crate::JsonFigureExporter) — one JSON figure per run
pub trait DiagnosticSink: Send + Sync {
    /// Records one classified run.
    fn record(
        &self,
        id: RunId,
        path: &StressPath,
        params: &MaterialParameters,
        result: &ClassificationResult,
    ) -> NorsandResult<()>;

    /// Returns the sink name.
    fn name(&self) -> &str;

    /// Returns the number of runs recorded so far.
    fn recorded(&self) -> usize;
}

/// Headless sink — counts runs and writes nothing.
#[derive(Debug, Default)]
pub struct HeadlessSink {
    count: std::sync::atomic::AtomicUsize,
}

impl HeadlessSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagnosticSink for HeadlessSink {
    fn record(
        &self,
        _id: RunId,
        _path: &StressPath,
        _params: &MaterialParameters,
        _result: &ClassificationResult,
    ) -> NorsandResult<()> {
        self.count.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        Ok(())
    }

    fn name(&self) -> &str {
        "headless"
    }

    fn recorded(&self) -> usize {
        self.count.load(std::sync::atomic::Ordering::Relaxed)
    }
}
