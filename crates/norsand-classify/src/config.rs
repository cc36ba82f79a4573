//! Classifier configuration.
//!
//! Thresholds default to the values historical results were produced with;
//! change them only for exploratory runs.

use serde::{Deserialize, Serialize};

use norsand_types::constants::{PROXIMITY_TOLERANCE, STATIONARITY_TOLERANCE};
use norsand_types::{NorsandError, NorsandResult, Scalar};

/// Whether unresolved critical points are searched for or left at the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtrapolationMode {
    /// Proximity, stationarity, then spline for softening; spline for hardening.
    #[default]
    Enabled,
    /// Leave unresolved softening and hardening critical points at `-1`.
    Disabled,
}

/// What to do when the tail abscissa used for the spline is not strictly
/// increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TailPolicy {
    /// Fail the run with an extrapolation error.
    #[default]
    Strict,
    /// Drop samples that do not advance the abscissa, then fit.
    Prune,
}

/// Configuration for [`ResponseClassifier`](crate::ResponseClassifier).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Relative steady-state band. Onset/reversal need `qCheck >` this,
    /// proximity acceptance needs `qCheck <` this.
    pub proximity_tolerance: Scalar,

    /// Absolute `|dq|` below which a step counts as a plateau.
    pub stationarity_tolerance: Scalar,

    pub extrapolation: ExtrapolationMode,

    pub tail_policy: TailPolicy,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            proximity_tolerance: PROXIMITY_TOLERANCE,
            stationarity_tolerance: STATIONARITY_TOLERANCE,
            extrapolation: ExtrapolationMode::Enabled,
            tail_policy: TailPolicy::Strict,
        }
    }
}

impl ClassifierConfig {
    /// The earlier processor: no fallback search, unresolved points stay at `-1`.
    pub fn without_extrapolation() -> Self {
        Self {
            extrapolation: ExtrapolationMode::Disabled,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> NorsandResult<()> {
        if !(self.proximity_tolerance.is_finite() && self.proximity_tolerance > 0.0) {
            return Err(NorsandError::InvalidConfig(format!(
                "proximity_tolerance must be positive, got {}",
                self.proximity_tolerance
            )));
        }
        if !(self.stationarity_tolerance.is_finite() && self.stationarity_tolerance > 0.0) {
            return Err(NorsandError::InvalidConfig(format!(
                "stationarity_tolerance must be positive, got {}",
                self.stationarity_tolerance
            )));
        }
        Ok(())
    }
}
