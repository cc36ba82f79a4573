//! # norsand-batch
//!
//! Drives run store → classifier → report over a range of runs.
//!
//! Runs are classified on a rayon pool, results come back in run order,
//! per-run failures are recorded and the batch continues. Only an
//! unclassified response aborts the batch.

pub mod config;
pub mod runner;
pub mod summary;

pub use config::BatchConfig;
pub use runner::{BatchReport, BatchRunner, Outcome, RunOutcome};
pub use summary::BatchSummary;
