//! Batch configuration, loadable from TOML.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use norsand_classify::ClassifierConfig;
use norsand_report::ReportLayout;
use norsand_types::{NorsandResult, RunId};

/// Everything `process` needs besides the classifier implementation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Root holding one `ns-XXXXXX/` directory per run.
    pub data_dir: PathBuf,
    /// First run id.
    pub start: u32,
    /// Number of runs.
    pub runs: u32,
    /// Where tables, summary and figures go.
    pub output_dir: PathBuf,
    /// Worker threads; 0 means one per core.
    pub threads: usize,
    /// Write per-run JSON figures under `<output_dir>/figures`.
    pub figures: bool,
    pub layout: ReportLayout,
    pub classifier: ClassifierConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("simulation/data"),
            start: 0,
            runs: 119_790,
            output_dir: PathBuf::from("."),
            threads: 0,
            figures: false,
            layout: ReportLayout::Standard,
            classifier: ClassifierConfig::default(),
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> NorsandResult<()> {
        self.classifier.validate()
    }

    /// Run ids `start .. start + runs`.
    pub fn ids(&self) -> Vec<RunId> {
        let end = self.start.saturating_add(self.runs);
        (self.start..end).map(RunId).collect()
    }

    /// Directory for diagnostic figures.
    pub fn figures_dir(&self) -> PathBuf {
        self.output_dir.join("figures")
    }
}
