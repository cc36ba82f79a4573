//! Critical-state resolution for paths the forward scan leaves open.
//!
//! Two strategies are provided:
//!
//! - [`LayeredExtrapolation`] — softening: proximity scan, then stationarity
//!   scan, then a monotone cubic `q → eps` over the reversed post-peak tail;
//!   hardening: the same cubic over the tail from the minimum-`p` sample.
//! - [`SentinelStrategy`] — leaves every unresolved point at `-1`.

use tracing::debug;

use norsand_math::{prune_increasing, Pchip};
use norsand_types::{NorsandError, NorsandResult, Scalar};

use crate::config::{ClassifierConfig, ExtrapolationMode, TailPolicy};
use crate::normalize::Normalizer;
use crate::path::StressPath;
use crate::result::{CriticalSource, NormalizedPoint};

/// A resolved (or deliberately unresolved) critical point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalState {
    pub point: NormalizedPoint,
    pub source: CriticalSource,
}

impl CriticalState {
    pub fn unresolved() -> Self {
        Self {
            point: NormalizedPoint::UNSET,
            source: CriticalSource::Unresolved,
        }
    }
}

/// Trait for critical-state resolution strategies.
pub trait CriticalStateStrategy: Send + Sync {
    /// Softening without reversal; `peak_index` is where softening began.
    fn resolve_softening(
        &self,
        path: &StressPath,
        norm: &Normalizer,
        peak_index: usize,
    ) -> NorsandResult<CriticalState>;

    /// Hardening; `min_index` is the global minimum of `p`.
    fn resolve_hardening(
        &self,
        path: &StressPath,
        norm: &Normalizer,
        min_index: usize,
    ) -> NorsandResult<CriticalState>;

    /// Returns the strategy's name.
    fn name(&self) -> &str;
}

/// Builds the strategy selected by `config.extrapolation`.
pub fn strategy_from_config(config: &ClassifierConfig) -> Box<dyn CriticalStateStrategy> {
    match config.extrapolation {
        ExtrapolationMode::Enabled => Box::new(LayeredExtrapolation::from_config(config)),
        ExtrapolationMode::Disabled => Box::new(SentinelStrategy),
    }
}

/// Leaves unresolved critical points at the sentinel.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentinelStrategy;

impl CriticalStateStrategy for SentinelStrategy {
    fn resolve_softening(&self, _: &StressPath, _: &Normalizer, _: usize) -> NorsandResult<CriticalState> {
        Ok(CriticalState::unresolved())
    }

    fn resolve_hardening(&self, _: &StressPath, _: &Normalizer, _: usize) -> NorsandResult<CriticalState> {
        Ok(CriticalState::unresolved())
    }

    fn name(&self) -> &str {
        "sentinel"
    }
}

/// Proximity → stationarity → spline fallback.
#[derive(Debug, Clone, Copy)]
pub struct LayeredExtrapolation {
    pub proximity_tolerance: Scalar,
    pub stationarity_tolerance: Scalar,
    pub tail_policy: TailPolicy,
}

impl LayeredExtrapolation {
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self {
            proximity_tolerance: config.proximity_tolerance,
            stationarity_tolerance: config.stationarity_tolerance,
            tail_policy: config.tail_policy,
        }
    }

    /// Fits `eps(q)` over the tail and evaluates it at `q_ss`.
    fn extrapolate(&self, q: &[Scalar], eps: &[Scalar], norm: &Normalizer, tail: &str) -> NorsandResult<CriticalState> {
        let fitted = match self.tail_policy {
            TailPolicy::Strict => Pchip::fit(q, eps),
            TailPolicy::Prune => {
                let (q, eps) = prune_increasing(q, eps);
                Pchip::fit(&q, &eps)
            }
        };
        let spline = fitted.map_err(|e| match e {
            NorsandError::Extrapolation(msg) => NorsandError::Extrapolation(format!("{tail} tail: {msg}")),
            other => other,
        })?;

        let eps_ss = spline.eval(norm.q_ss);
        if !eps_ss.is_finite() {
            return Err(NorsandError::Extrapolation(format!(
                "{tail} tail: interpolant is not finite at q_ss = {}",
                norm.q_ss
            )));
        }

        Ok(CriticalState {
            point: norm.critical_point(eps_ss),
            source: CriticalSource::Extrapolated,
        })
    }
}

impl Default for LayeredExtrapolation {
    fn default() -> Self {
        Self::from_config(&ClassifierConfig::default())
    }
}

impl CriticalStateStrategy for LayeredExtrapolation {
    fn resolve_softening(
        &self,
        path: &StressPath,
        norm: &Normalizer,
        peak_index: usize,
    ) -> NorsandResult<CriticalState> {
        let samples = path.samples();
        let start = peak_index.max(1);

        if let Some(i) = (start..samples.len()).find(|&i| norm.q_check(samples[i].q) < self.proximity_tolerance) {
            debug!(index = i, "critical point from steady-state proximity");
            return Ok(CriticalState {
                point: norm.point(&samples[i]),
                source: CriticalSource::Proximity(i),
            });
        }

        if let Some(i) = (start..samples.len())
            .find(|&i| (samples[i].q - samples[i - 1].q).abs() < self.stationarity_tolerance)
        {
            debug!(index = i, "critical point from stress plateau");
            return Ok(CriticalState {
                point: norm.point(&samples[i]),
                source: CriticalSource::Stationary(i),
            });
        }

        // Post-peak q decreases; reversing makes it the increasing abscissa.
        let tail = &samples[peak_index..];
        let q: Vec<Scalar> = tail.iter().rev().map(|s| s.q).collect();
        let eps: Vec<Scalar> = tail.iter().rev().map(|s| s.eps).collect();
        debug!(points = q.len(), "extrapolating softening tail");
        self.extrapolate(&q, &eps, norm, "post-peak")
    }

    fn resolve_hardening(
        &self,
        path: &StressPath,
        norm: &Normalizer,
        min_index: usize,
    ) -> NorsandResult<CriticalState> {
        let tail = &path.samples()[min_index..];
        let q: Vec<Scalar> = tail.iter().map(|s| s.q).collect();
        let eps: Vec<Scalar> = tail.iter().map(|s| s.eps).collect();
        debug!(points = q.len(), "extrapolating hardening tail");
        self.extrapolate(&q, &eps, norm, "post-minimum")
    }

    fn name(&self) -> &str {
        "layered"
    }
}
