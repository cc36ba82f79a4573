//! Run stores: where a run's parameters and stress path come from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use norsand_classify::StressPath;
use norsand_material::MaterialParameters;
use norsand_types::constants::{DATA_FILE, PARAMS_FILE};
use norsand_types::{NorsandError, NorsandResult, RunId};

use crate::parse::{parse_data_table, parse_params_echo};

/// Everything the classifier needs for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    pub id: RunId,
    pub params: MaterialParameters,
    pub path: StressPath,
}

/// Trait for run sources.
///
/// Loading is the only blocking step of a run; implementations read the
/// run fully and release any handle before returning.
pub trait RunStore: Send + Sync {
    fn load(&self, id: RunId) -> NorsandResult<RunRecord>;

    /// Returns the store's name for logging.
    fn name(&self) -> &str;
}

/// Reads solver output laid out as `<root>/ns-XXXXXX/{saveParams,saveData}.txt`.
#[derive(Debug, Clone)]
pub struct DirectoryRunStore {
    root: PathBuf,
}

impl DirectoryRunStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the output of `id`.
    pub fn run_dir(&self, id: RunId) -> PathBuf {
        self.root.join(id.name())
    }

    /// Loads a run from an explicit directory.
    pub fn load_dir(id: RunId, dir: &Path) -> NorsandResult<RunRecord> {
        let params = parse_params_echo(&read_file(&dir.join(PARAMS_FILE))?)
            .map_err(|e| with_context(e, id))?;
        let path = parse_data_table(&read_file(&dir.join(DATA_FILE))?)
            .map_err(|e| with_context(e, id))?;
        debug!(run = %id, rows = path.len(), dir = %dir.display(), "run loaded");
        Ok(RunRecord { id, params, path })
    }
}

impl RunStore for DirectoryRunStore {
    fn load(&self, id: RunId) -> NorsandResult<RunRecord> {
        Self::load_dir(id, &self.run_dir(id))
    }

    fn name(&self) -> &str {
        "directory"
    }
}

/// Holds runs in memory. Useful for tests and for callers that already
/// parsed the solver output.
#[derive(Debug, Clone, Default)]
pub struct MemoryRunStore {
    runs: HashMap<RunId, (MaterialParameters, StressPath)>,
}

impl MemoryRunStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a run. Overwrites if the id already exists.
    pub fn insert(&mut self, id: RunId, params: MaterialParameters, path: StressPath) {
        self.runs.insert(id, (params, path));
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

impl RunStore for MemoryRunStore {
    fn load(&self, id: RunId) -> NorsandResult<RunRecord> {
        let (params, path) = self
            .runs
            .get(&id)
            .ok_or_else(|| NorsandError::Input(format!("{id}: no such run")))?;
        Ok(RunRecord {
            id,
            params: params.clone(),
            path: path.clone(),
        })
    }

    fn name(&self) -> &str {
        "memory"
    }
}

fn read_file(path: &Path) -> NorsandResult<String> {
    std::fs::read_to_string(path).map_err(|e| NorsandError::Input(format!("{}: {e}", path.display())))
}

fn with_context(err: NorsandError, id: RunId) -> NorsandError {
    match err {
        NorsandError::Input(msg) => NorsandError::Input(format!("{id}: {msg}")),
        NorsandError::Data(msg) => NorsandError::Data(format!("{id}: {msg}")),
        other => other,
    }
}
