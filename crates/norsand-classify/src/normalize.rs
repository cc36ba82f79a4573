//! Per-run normalization constants and the steady-state distance measure.

use norsand_material::MaterialParameters;
use norsand_types::{NorsandError, NorsandResult, Scalar};

use crate::path::{StressPath, StressPathSample};
use crate::result::NormalizedPoint;

/// Divisors and targets shared by every step of one run's classification.
///
/// Construction checks every divisor, so the methods below never divide by
/// zero or a non-finite value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    /// Initial mean effective stress.
    pub p0: Scalar,
    /// Steady-state deviatoric stress `Mtc · exp(-psi0/lambd) · p0`.
    pub q_ss: Scalar,
    /// Critical friction ratio.
    pub mtc: Scalar,
    /// Shear rigidity `Gref / pref`.
    pub rigidity: Scalar,
}

impl Normalizer {
    pub fn new(params: &MaterialParameters, path: &StressPath) -> NorsandResult<Self> {
        params.validate()?;

        let p0 = path.p0();
        if !(p0.is_finite() && p0 > 0.0) {
            return Err(NorsandError::Data(format!(
                "initial mean effective stress must be positive, got p0 = {p0}"
            )));
        }

        let q_ss = params.steady_state_q(path.psi0(), p0)?;

        Ok(Self {
            p0,
            q_ss,
            mtc: params.mtc,
            rigidity: params.rigidity(),
        })
    }

    /// Relative distance `|q - q_ss| / q_ss` from the steady state.
    #[inline]
    pub fn q_check(&self, q: Scalar) -> Scalar {
        (q - self.q_ss).abs() / self.q_ss
    }

    /// Normalizes a sampled point.
    #[inline]
    pub fn point(&self, sample: &StressPathSample) -> NormalizedPoint {
        NormalizedPoint::new(sample.p / self.p0, sample.q / self.p0, sample.eps * self.rigidity)
    }

    /// The critical-state point on the steady-state line at strain `eps`.
    pub fn critical_point(&self, eps: Scalar) -> NormalizedPoint {
        NormalizedPoint::new(
            self.q_ss / (self.mtc * self.p0),
            self.q_ss / self.p0,
            eps * self.rigidity,
        )
    }
}
