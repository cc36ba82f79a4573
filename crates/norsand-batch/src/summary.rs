//! Batch summary — counts collected over a batch run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use norsand_classify::ResponseType;
use norsand_types::{FailureKind, NorsandError, NorsandResult};

/// Counts per response type and failure kind for one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Runs attempted.
    pub total: usize,
    /// Runs that produced a classification.
    pub classified: usize,
    /// Runs recorded as failed.
    pub failed: usize,
    pub by_response: BTreeMap<ResponseType, usize>,
    pub by_failure: BTreeMap<FailureKind, usize>,
    /// Total wall-clock time (seconds).
    pub wall_time: f64,
    /// Worker threads used.
    pub threads: usize,
}

impl BatchSummary {
    /// Empty summary with every bucket present at zero.
    pub fn new(threads: usize) -> Self {
        Self {
            total: 0,
            classified: 0,
            failed: 0,
            by_response: ResponseType::all().iter().map(|&r| (r, 0)).collect(),
            by_failure: FailureKind::all().iter().map(|&k| (k, 0)).collect(),
            wall_time: 0.0,
            threads,
        }
    }

    pub fn record_classified(&mut self, response: ResponseType) {
        self.total += 1;
        self.classified += 1;
        *self.by_response.entry(response).or_insert(0) += 1;
    }

    pub fn record_failed(&mut self, kind: FailureKind) {
        self.total += 1;
        self.failed += 1;
        *self.by_failure.entry(kind).or_insert(0) += 1;
    }

    pub fn count(&self, response: ResponseType) -> usize {
        self.by_response.get(&response).copied().unwrap_or(0)
    }

    pub fn failures(&self, kind: FailureKind) -> usize {
        self.by_failure.get(&kind).copied().unwrap_or(0)
    }

    /// Multi-line summary for terminal output.
    pub fn to_table(&self) -> String {
        let mut out = format!(
            "runs: {}  classified: {}  failed: {}  wall time: {:.3}s  threads: {}\n",
            self.total, self.classified, self.failed, self.wall_time, self.threads
        );
        for (response, n) in &self.by_response {
            out.push_str(&format!("  {:<20} {:>8}\n", response.name(), n));
        }
        for (kind, n) in self.by_failure.iter().filter(|(_, &n)| n > 0) {
            out.push_str(&format!("  {:<20} {:>8}\n", format!("failed/{}", kind.name()), n));
        }
        out
    }

    pub fn to_json(&self) -> NorsandResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| NorsandError::Serialization(format!("summary: {e}")))
    }

    /// Writes `summary.json` into `dir`.
    pub fn write_json(&self, dir: &Path) -> NorsandResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join("summary.json");
        std::fs::write(&path, self.to_json()?)?;
        Ok(path)
    }
}
