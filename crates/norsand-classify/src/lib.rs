//! # norsand-classify
//!
//! Classifies one simulation's stress path as softening, quasi-steady
//! state, or hardening, and extracts normalized peak and critical-state
//! points.
//!
//! ## Key Types
//!
//! - [`StressPath`] — time-ordered `(p, q, eps, psi0)` samples of one run
//! - [`Classify`] — pluggable classifier trait used by the batch runner
//! - [`ResponseClassifier`] — the forward-scan classifier
//! - [`CriticalStateStrategy`] — how unresolved critical points are found
//!   ([`LayeredExtrapolation`] or [`SentinelStrategy`])
//! - [`ClassificationResult`] — label plus normalized points

pub mod classifier;
pub mod config;
pub mod extrapolate;
pub mod normalize;
pub mod path;
pub mod result;
pub mod scan;

pub use classifier::{Classify, ResponseClassifier};
pub use config::{ClassifierConfig, ExtrapolationMode, TailPolicy};
pub use extrapolate::{
    strategy_from_config, CriticalState, CriticalStateStrategy, LayeredExtrapolation, SentinelStrategy,
};
pub use normalize::Normalizer;
pub use path::{StressPath, StressPathSample};
pub use result::{ClassificationResult, CriticalSource, NormalizedPoint, ResponseType};
pub use scan::{scan, ScanOutcome, ScanState};
