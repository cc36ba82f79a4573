//! # norsand-report
//!
//! Output side of a batch: the per-response CSV tables and the optional
//! per-run diagnostic figures.
//!
//! Provides a `DiagnosticSink` trait with a `HeadlessSink` no-op and a
//! `JsonFigureExporter` that writes both figure panels as JSON, plus the
//! `ReportAggregator` that buckets results into `save_<code>.csv`.

pub mod aggregator;
pub mod figure;
pub mod format;
pub mod sink;

pub use aggregator::{ReportAggregator, ReportLayout};
pub use figure::JsonFigureExporter;
pub use sink::{DiagnosticSink, HeadlessSink};
