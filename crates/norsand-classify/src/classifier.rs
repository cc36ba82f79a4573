//! Response classifier — the per-run entry point.
//!
//! Classification is two pure steps: [`scan`](crate::scan::scan) yields a
//! [`ScanOutcome`], and [`ResponseClassifier::finalize`] maps that outcome to
//! a [`ClassificationResult`], calling the critical-state strategy where the
//! scan left the critical point open.

use tracing::trace;

use norsand_material::MaterialParameters;
use norsand_types::NorsandResult;

use crate::config::ClassifierConfig;
use crate::extrapolate::{strategy_from_config, CriticalState, CriticalStateStrategy};
use crate::normalize::Normalizer;
use crate::path::StressPath;
use crate::result::{ClassificationResult, CriticalSource, ResponseType};
use crate::scan::{scan, ScanOutcome};

/// Trait for per-run classifiers.
///
/// Implementations must be deterministic and must not mutate their inputs;
/// the batch runner calls them concurrently from worker threads.
pub trait Classify: Send + Sync {
    fn classify(
        &self,
        params: &MaterialParameters,
        path: &StressPath,
    ) -> NorsandResult<ClassificationResult>;

    /// Returns the classifier's name.
    fn name(&self) -> &str;
}

/// Forward-scan classifier with a pluggable critical-state strategy.
pub struct ResponseClassifier {
    config: ClassifierConfig,
    strategy: Box<dyn CriticalStateStrategy>,
}

impl ResponseClassifier {
    /// Classifier with the default configuration (extrapolation enabled).
    pub fn new() -> Self {
        let config = ClassifierConfig::default();
        let strategy = strategy_from_config(&config);
        Self { config, strategy }
    }

    /// Validates `config` and builds the matching strategy.
    pub fn from_config(config: ClassifierConfig) -> NorsandResult<Self> {
        config.validate()?;
        let strategy = strategy_from_config(&config);
        Ok(Self { config, strategy })
    }

    /// Validates `config` and uses a caller-supplied strategy instead of the
    /// configured one.
    pub fn with_strategy(
        config: ClassifierConfig,
        strategy: Box<dyn CriticalStateStrategy>,
    ) -> NorsandResult<Self> {
        config.validate()?;
        Ok(Self { config, strategy })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Maps a scan outcome to the final result.
    pub fn finalize(
        &self,
        path: &StressPath,
        norm: &Normalizer,
        outcome: ScanOutcome,
    ) -> NorsandResult<ClassificationResult> {
        let samples = path.samples();

        let (response, peak_index, critical) = match outcome {
            ScanOutcome::QuasiSteady {
                peak_index,
                qss_index,
            } => {
                let critical = CriticalState {
                    point: norm.point(&samples[qss_index]),
                    source: CriticalSource::Scan(qss_index),
                };
                (ResponseType::QuasiSteadyState, peak_index, critical)
            }
            ScanOutcome::SoftenedWithoutReversal { peak_index } => {
                let critical = self.strategy.resolve_softening(path, norm, peak_index)?;
                (ResponseType::Softening, peak_index, critical)
            }
            ScanOutcome::Monotonic => {
                let min_index = path.argmin_p();
                let critical = self.strategy.resolve_hardening(path, norm, min_index)?;
                (ResponseType::Hardening, min_index, critical)
            }
        };

        Ok(ClassificationResult {
            response,
            psi0: path.psi0(),
            peak_index,
            peak: norm.point(&samples[peak_index]),
            critical: critical.point,
            critical_source: critical.source,
        })
    }
}

impl Default for ResponseClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classify for ResponseClassifier {
    fn classify(
        &self,
        params: &MaterialParameters,
        path: &StressPath,
    ) -> NorsandResult<ClassificationResult> {
        let norm = Normalizer::new(params, path)?;
        let outcome = scan(path, &norm, self.config.proximity_tolerance);
        trace!(?outcome, q_ss = norm.q_ss, "scan finished");
        self.finalize(path, &norm, outcome)
    }

    fn name(&self) -> &str {
        "response_classifier"
    }
}
