//! Forward scan over a stress path.
//!
//! The scan is a three-state machine:
//!
//! ```text
//! Initial ──(dq < 0, qCheck > tol)──▶ Softened ──(dq > 0, qCheck > tol)──▶ QuasiSteadyFound
//! ```
//!
//! `QuasiSteadyFound` is terminal: the scan returns without reading any
//! later sample. The tolerance keeps small oscillations on the steady-state
//! line from being read as a peak or a reversal.

use norsand_types::Scalar;

use crate::normalize::Normalizer;
use crate::path::StressPath;

/// State of the forward scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No qualifying softening yet.
    Initial,
    /// Softening began at `peak_index`.
    Softened { peak_index: usize },
    /// A genuine reversal was found at `qss_index`.
    QuasiSteadyFound { peak_index: usize, qss_index: usize },
}

impl ScanState {
    /// Applies the transition guards for step `n`.
    pub fn step(self, n: usize, dq: Scalar, q_check: Scalar, tolerance: Scalar) -> ScanState {
        match self {
            ScanState::Initial if dq < 0.0 && q_check > tolerance => {
                ScanState::Softened { peak_index: n }
            }
            ScanState::Softened { peak_index } if dq > 0.0 && q_check > tolerance => {
                ScanState::QuasiSteadyFound {
                    peak_index,
                    qss_index: n,
                }
            }
            state => state,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ScanState::QuasiSteadyFound { .. })
    }
}

/// What the scan established, independent of any fallback search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The path never softened.
    Monotonic,
    /// Softening began at `peak_index` and no reversal followed.
    SoftenedWithoutReversal { peak_index: usize },
    /// Softening at `peak_index`, reversal at `qss_index`.
    QuasiSteady { peak_index: usize, qss_index: usize },
}

impl From<ScanState> for ScanOutcome {
    fn from(state: ScanState) -> Self {
        match state {
            ScanState::Initial => ScanOutcome::Monotonic,
            ScanState::Softened { peak_index } => ScanOutcome::SoftenedWithoutReversal { peak_index },
            ScanState::QuasiSteadyFound {
                peak_index,
                qss_index,
            } => ScanOutcome::QuasiSteady {
                peak_index,
                qss_index,
            },
        }
    }
}

/// Runs the scan over `path`.
pub fn scan(path: &StressPath, norm: &Normalizer, tolerance: Scalar) -> ScanOutcome {
    let samples = path.samples();
    let mut state = ScanState::Initial;

    for n in 1..samples.len() {
        let dq = samples[n].q - samples[n - 1].q;
        state = state.step(n, dq, norm.q_check(samples[n].q), tolerance);
        if state.is_terminal() {
            break;
        }
    }

    state.into()
}
