//! Stress-path samples of a single run.

use serde::{Deserialize, Serialize};

use norsand_types::{NorsandError, NorsandResult, Scalar};

/// One solver output row, reduced to the channels the classifier reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressPathSample {
    /// Mean effective stress.
    pub p: Scalar,
    /// Deviatoric stress.
    pub q: Scalar,
    /// Accumulated shear strain.
    pub eps: Scalar,
    /// Initial state parameter, repeated on every row.
    pub psi0: Scalar,
}

impl StressPathSample {
    pub fn new(p: Scalar, q: Scalar, eps: Scalar, psi0: Scalar) -> Self {
        Self { p, q, eps, psi0 }
    }
}

/// Time-ordered samples of one run. Always holds at least 2 rows.
///
/// The sample order is the simulation step order and is never changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StressPath {
    samples: Vec<StressPathSample>,
}

impl StressPath {
    /// Wraps `samples`, rejecting paths with fewer than 2 rows.
    pub fn new(samples: Vec<StressPathSample>) -> NorsandResult<Self> {
        if samples.len() < 2 {
            return Err(NorsandError::Data(format!(
                "stress path needs at least 2 samples, got {}",
                samples.len()
            )));
        }
        Ok(Self { samples })
    }

    #[inline]
    pub fn samples(&self) -> &[StressPathSample] {
        &self.samples
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the path has no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Initial mean effective stress (first sample).
    #[inline]
    pub fn p0(&self) -> Scalar {
        self.samples[0].p
    }

    /// Initial state parameter (first sample).
    #[inline]
    pub fn psi0(&self) -> Scalar {
        self.samples[0].psi0
    }

    /// Index of the global minimum of `p`. Ties resolve to the first index;
    /// NaN entries never win.
    pub fn argmin_p(&self) -> usize {
        let mut best = 0;
        for (i, s) in self.samples.iter().enumerate().skip(1) {
            if s.p < self.samples[best].p {
                best = i;
            }
        }
        best
    }
}

impl<'de> Deserialize<'de> for StressPath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            samples: Vec<StressPathSample>,
        }
        let raw = Raw::deserialize(deserializer)?;
        StressPath::new(raw.samples).map_err(serde::de::Error::custom)
    }
}
