//! Strongly-typed run identifiers.
//!
//! A run id is the sequential index assigned by the sample generator. Its
//! zero-padded form names the descriptor, the solver output directory, and
//! the diagnostic figure for that run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::RUN_PREFIX;

/// Sequential identifier of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RunId(pub u32);

impl RunId {
    /// Returns the raw index as `usize`.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Zero-padded run name, e.g. `ns-000042`.
    pub fn name(self) -> String {
        format!("{RUN_PREFIX}-{:06}", self.0)
    }

    /// Parses a run name of the form `ns-000042` (a trailing `/` or file
    /// extension is ignored).
    pub fn parse_name(name: &str) -> Option<Self> {
        let stem = name.trim_end_matches('/');
        let stem = stem.split('.').next().unwrap_or(stem);
        let digits = stem.strip_prefix(RUN_PREFIX)?.strip_prefix('-')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(RunId)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<u32> for RunId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}
