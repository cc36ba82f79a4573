//! Configuration files and command-line overrides.
//!
//! Every subcommand starts from the serde defaults, replaces them with the
//! TOML file if one is given, then applies the flags that were set.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use norsand_batch::BatchConfig;
use norsand_classify::ExtrapolationMode;
use norsand_report::ReportLayout;
use norsand_sampling::{ParameterSpace, SamplingMode};
use norsand_types::{NorsandError, NorsandResult};

/// `generate` configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Directory for the descriptors.
    pub output_dir: PathBuf,
    pub sampling: SamplingMode,
    pub space: ParameterSpace,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("json-output"),
            sampling: SamplingMode::Grid,
            space: ParameterSpace::default(),
        }
    }
}

/// `--mode` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeFlag {
    Grid,
    Random,
}

/// Flags of `generate` that override the configuration file.
#[derive(Debug, Clone, Default)]
pub struct GenerateOverrides {
    pub output: Option<PathBuf>,
    pub mode: Option<ModeFlag>,
    pub samples: Option<usize>,
    pub seed: Option<u64>,
}

impl GenerateConfig {
    /// Applies `flags`. Giving `--samples` without `--mode` selects random
    /// sampling.
    pub fn apply(&mut self, flags: &GenerateOverrides) -> NorsandResult<()> {
        if let Some(output) = &flags.output {
            self.output_dir = output.clone();
        }

        let (samples, seed) = match self.sampling {
            SamplingMode::Random { samples, seed } => (Some(samples), Some(seed)),
            SamplingMode::Grid => (None, None),
        };
        let random = match flags.mode {
            Some(ModeFlag::Random) => true,
            Some(ModeFlag::Grid) => false,
            None => samples.is_some() || flags.samples.is_some(),
        };

        self.sampling = if random {
            let samples = flags
                .samples
                .or(samples)
                .ok_or_else(|| NorsandError::InvalidConfig("random sampling needs a sample count".into()))?;
            SamplingMode::Random {
                samples,
                seed: flags.seed.or(seed).unwrap_or(0),
            }
        } else {
            SamplingMode::Grid
        };
        Ok(())
    }
}

/// Flags of `process` that override the configuration file. Boolean flags
/// can only switch a feature on.
#[derive(Debug, Clone, Default)]
pub struct ProcessOverrides {
    pub data_dir: Option<PathBuf>,
    pub runs: Option<u32>,
    pub start: Option<u32>,
    pub output: Option<PathBuf>,
    pub threads: Option<usize>,
    pub figures: bool,
    pub no_extrapolation: bool,
    pub extended: bool,
}

impl ProcessOverrides {
    pub fn apply(&self, cfg: &mut BatchConfig) {
        if let Some(dir) = &self.data_dir {
            cfg.data_dir = dir.clone();
        }
        if let Some(runs) = self.runs {
            cfg.runs = runs;
        }
        if let Some(start) = self.start {
            cfg.start = start;
        }
        if let Some(dir) = &self.output {
            cfg.output_dir = dir.clone();
        }
        if let Some(threads) = self.threads {
            cfg.threads = threads;
        }
        if self.figures {
            cfg.figures = true;
        }
        if self.no_extrapolation {
            cfg.classifier.extrapolation = ExtrapolationMode::Disabled;
        }
        if self.extended {
            cfg.layout = ReportLayout::Extended;
        }
    }
}

/// Reads a TOML file into `T`, or returns `T::default()` without a path.
pub fn load_toml<T: DeserializeOwned + Default>(path: Option<&Path>) -> NorsandResult<T> {
    let Some(path) = path else {
        return Ok(T::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| NorsandError::InvalidConfig(format!("{}: {e}", path.display())))?;
    toml::from_str(&text).map_err(|e| NorsandError::InvalidConfig(format!("{}: {e}", path.display())))
}

/// A configuration file of either subcommand.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigFile {
    Generate(GenerateConfig),
    Batch(BatchConfig),
}

/// Reads a TOML configuration. Files with a `space` or `sampling` table are
/// study configurations; anything else is read as a batch configuration.
pub fn read_config_file(path: &Path) -> NorsandResult<ConfigFile> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| NorsandError::InvalidConfig(format!("{}: {e}", path.display())))?;
    let table: toml::Table =
        toml::from_str(&text).map_err(|e| NorsandError::InvalidConfig(format!("{}: {e}", path.display())))?;

    let study = table.contains_key("space") || table.contains_key("sampling");
    let value = toml::Value::Table(table);
    let parsed = if study {
        value.try_into().map(ConfigFile::Generate)
    } else {
        value.try_into().map(ConfigFile::Batch)
    };
    parsed.map_err(|e| NorsandError::InvalidConfig(format!("{}: {e}", path.display())))
}
