//! Batch runner — classifies runs in parallel and collects outcomes.

use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{error, info};

use norsand_classify::{ClassificationResult, Classify};
use norsand_io::RunStore;
use norsand_material::MaterialParameters;
use norsand_report::{DiagnosticSink, ReportAggregator, ReportLayout};
use norsand_telemetry::{BatchEvent, EventBus, EventEmitter, EventKind};
use norsand_types::{FailureKind, NorsandError, NorsandResult, RunId};

use crate::summary::BatchSummary;

/// How often [`BatchRunner::run_with_bus`] drains the bus while workers run.
const FLUSH_INTERVAL: Duration = Duration::from_millis(100);

/// What happened to one run.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Classified {
        params: MaterialParameters,
        result: ClassificationResult,
    },
    Failed {
        kind: FailureKind,
        message: String,
    },
}

/// Outcome of one run, tagged with its id.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub id: RunId,
    pub outcome: Outcome,
}

impl RunOutcome {
    pub fn result(&self) -> Option<&ClassificationResult> {
        match &self.outcome {
            Outcome::Classified { result, .. } => Some(result),
            Outcome::Failed { .. } => None,
        }
    }
}

/// Outcomes in input order plus the summary.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub outcomes: Vec<RunOutcome>,
    pub summary: BatchSummary,
}

impl BatchReport {
    /// Buckets every classified run into report tables.
    pub fn aggregate(&self, layout: ReportLayout) -> ReportAggregator {
        let mut agg = ReportAggregator::new(layout);
        for run in &self.outcomes {
            if let Outcome::Classified { params, result } = &run.outcome {
                agg.push(run.id, params, result);
            }
        }
        agg
    }
}

/// Runs batches on a dedicated rayon pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchRunner {
    threads: usize,
}

impl BatchRunner {
    /// `threads = 0` means one worker per core.
    pub fn new(threads: usize) -> Self {
        Self { threads }
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Classifies every run in `ids`.
    ///
    /// Input, data and extrapolation failures are recorded in the report.
    /// An unclassified response stops the batch and is returned as the error.
    pub fn run(
        &self,
        store: &dyn RunStore,
        ids: &[RunId],
        classifier: &dyn Classify,
        sink: &dyn DiagnosticSink,
        emitter: &EventEmitter,
    ) -> NorsandResult<BatchReport> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
            .map_err(|e| NorsandError::InvalidConfig(format!("worker pool: {e}")))?;
        let threads = pool.current_num_threads();

        info!(
            runs = ids.len(),
            threads,
            store = store.name(),
            classifier = classifier.name(),
            sink = sink.name(),
            "starting batch"
        );
        emitter.emit(BatchEvent::batch(EventKind::BatchStarted {
            runs: ids.len(),
            threads,
        }));

        let start = Instant::now();
        let collected: NorsandResult<Vec<RunOutcome>> = pool.install(|| {
            ids.par_iter()
                .map(|&id| process_one(id, store, classifier, sink, emitter))
                .collect()
        });
        let wall_time = start.elapsed().as_secs_f64();

        let outcomes = match collected {
            Ok(outcomes) => outcomes,
            Err(e) => {
                error!(error = %e, "batch aborted");
                emitter.emit(BatchEvent::batch(EventKind::BatchFinished {
                    classified: 0,
                    failed: 0,
                    wall_time,
                    aborted: true,
                }));
                return Err(e);
            }
        };

        let mut summary = BatchSummary::new(threads);
        for run in &outcomes {
            match &run.outcome {
                Outcome::Classified { result, .. } => summary.record_classified(result.response),
                Outcome::Failed { kind, .. } => summary.record_failed(*kind),
            }
        }
        summary.wall_time = wall_time;

        emitter.emit(BatchEvent::batch(EventKind::BatchFinished {
            classified: summary.classified,
            failed: summary.failed,
            wall_time,
            aborted: false,
        }));

        Ok(BatchReport { outcomes, summary })
    }

    /// Like [`run`](Self::run), but owns the telemetry side: the batch runs on
    /// a scoped thread while the calling thread flushes `bus` to its sinks
    /// every 100 ms. The bus is finished before returning, also
    /// when the batch aborts.
    pub fn run_with_bus(
        &self,
        store: &dyn RunStore,
        ids: &[RunId],
        classifier: &dyn Classify,
        sink: &dyn DiagnosticSink,
        bus: &mut EventBus,
    ) -> NorsandResult<BatchReport> {
        let emitter = bus.emitter();
        let joined = std::thread::scope(|s| {
            let handle = s.spawn(|| self.run(store, ids, classifier, sink, &emitter));
            while !handle.is_finished() {
                bus.flush();
                std::thread::sleep(FLUSH_INTERVAL);
            }
            handle.join()
        });
        bus.finish();
        match joined {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

/// Loads, classifies and records one run. Only a fatal error escapes.
fn process_one(
    id: RunId,
    store: &dyn RunStore,
    classifier: &dyn Classify,
    sink: &dyn DiagnosticSink,
    emitter: &EventEmitter,
) -> NorsandResult<RunOutcome> {
    let attempt = store.load(id).and_then(|record| {
        let result = classifier.classify(&record.params, &record.path)?;
        sink.record(id, &record.path, &record.params, &result)?;
        Ok((record.params, result))
    });

    match attempt {
        Ok((params, result)) => {
            emitter.emit(BatchEvent::run(
                id,
                EventKind::RunClassified {
                    response: result.response,
                    critical_source: result.critical_source,
                },
            ));
            Ok(RunOutcome {
                id,
                outcome: Outcome::Classified { params, result },
            })
        }
        Err(e) if e.is_fatal() => {
            emitter.emit(BatchEvent::run(
                id,
                EventKind::RunFailed {
                    kind: e.kind(),
                    message: e.to_string(),
                },
            ));
            Err(e)
        }
        Err(e) => {
            let kind = e.kind();
            let message = e.to_string();
            emitter.emit(BatchEvent::run(
                id,
                EventKind::RunFailed {
                    kind,
                    message: message.clone(),
                },
            ));
            Ok(RunOutcome {
                id,
                outcome: Outcome::Failed { kind, message },
            })
        }
    }
}
