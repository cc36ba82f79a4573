//! Classification output types.

use std::fmt;

use serde::{Deserialize, Serialize};

use norsand_types::constants::SENTINEL;
use norsand_types::{NorsandError, NorsandResult, Scalar};

/// Material response label. The numeric codes are part of the report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResponseType {
    /// Deviatoric stress drops from a peak and never recovers.
    Softening,
    /// Softening followed by a genuine reversal.
    QuasiSteadyState,
    /// No qualifying softening anywhere on the path.
    Hardening,
}

impl ResponseType {
    /// Returns all response types in code order.
    pub fn all() -> &'static [ResponseType] {
        &[
            ResponseType::Softening,
            ResponseType::QuasiSteadyState,
            ResponseType::Hardening,
        ]
    }

    /// Report code: 0, 1, or 2.
    pub fn code(self) -> u8 {
        match self {
            ResponseType::Softening => 0,
            ResponseType::QuasiSteadyState => 1,
            ResponseType::Hardening => 2,
        }
    }

    /// Inverse of [`code`](Self::code).
    ///
    /// Any other code means a result was produced outside the three labels,
    /// which is reported as [`NorsandError::Unclassified`].
    pub fn from_code(code: i64) -> NorsandResult<Self> {
        match code {
            0 => Ok(ResponseType::Softening),
            1 => Ok(ResponseType::QuasiSteadyState),
            2 => Ok(ResponseType::Hardening),
            other => Err(NorsandError::Unclassified(format!("no response type has code {other}"))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ResponseType::Softening => "softening",
            ResponseType::QuasiSteadyState => "quasi_steady_state",
            ResponseType::Hardening => "hardening",
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stress-strain point normalized by `p0` (stresses) and `Ir` (strain).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    /// `p / p0`
    pub p: Scalar,
    /// `q / p0`
    pub q: Scalar,
    /// `eps · Ir`
    pub eps: Scalar,
}

impl NormalizedPoint {
    /// All components at the `-1` sentinel.
    pub const UNSET: NormalizedPoint = NormalizedPoint {
        p: SENTINEL,
        q: SENTINEL,
        eps: SENTINEL,
    };

    pub fn new(p: Scalar, q: Scalar, eps: Scalar) -> Self {
        Self { p, q, eps }
    }

    pub fn is_unset(&self) -> bool {
        *self == Self::UNSET
    }

    pub fn to_array(self) -> [Scalar; 3] {
        [self.p, self.q, self.eps]
    }
}

/// How the critical (or quasi-steady) point was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "index", rename_all = "snake_case")]
pub enum CriticalSource {
    /// Genuine reversal found by the forward scan.
    Scan(usize),
    /// First post-peak sample within the steady-state band.
    Proximity(usize),
    /// First post-peak sample with a stress plateau.
    Stationary(usize),
    /// Monotone cubic evaluated at the steady-state stress.
    Extrapolated,
    /// Left at the sentinel.
    Unresolved,
}

impl CriticalSource {
    /// Sample index the point was read from, if any.
    pub fn index(self) -> Option<usize> {
        match self {
            CriticalSource::Scan(i) | CriticalSource::Proximity(i) | CriticalSource::Stationary(i) => {
                Some(i)
            }
            CriticalSource::Extrapolated | CriticalSource::Unresolved => None,
        }
    }
}

/// Classification of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub response: ResponseType,
    /// Initial state parameter of the run.
    pub psi0: Scalar,
    /// Sample index of the peak point (phase transformation for hardening).
    pub peak_index: usize,
    /// Peak point, or the phase-transformation point for hardening.
    pub peak: NormalizedPoint,
    /// Quasi-steady or critical-state point.
    pub critical: NormalizedPoint,
    pub critical_source: CriticalSource,
}

impl ClassificationResult {
    /// Peak then critical components: `[p_pk, q_pk, eps_pk, p_cs, q_cs, eps_cs]`.
    pub fn point_columns(&self) -> [Scalar; 6] {
        let [a, b, c] = self.peak.to_array();
        let [d, e, f] = self.critical.to_array();
        [a, b, c, d, e, f]
    }
}
