//! Run input descriptor contract.
//!
//! One descriptor per run, serialized as JSON with three groups:
//! `params` (material constants), `opts` (solver mode flags) and `sim`
//! (initial state and output location). The solver owns the meaning of
//! `opts`; they are passed through unchanged.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use norsand_material::MaterialParameters;
use norsand_types::{NorsandError, NorsandResult, RunId, Scalar};

/// Complete input for one solver run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunDescriptor {
    pub params: MaterialParameters,
    pub opts: SolverOptions,
    pub sim: SimulationSetup,
}

/// Solver mode flags, kept as opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverOptions {
    /// Load-direction convention.
    pub loose: String,
    /// Critical-state-line shape.
    pub csl: String,
    /// Test type.
    pub test: String,
    /// Drained/undrained condition.
    pub dvol: String,
    /// Numerical yield-surface policy.
    #[serde(rename = "Dmin")]
    pub dmin: String,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            loose: "ED".into(),
            csl: "linear".into(),
            test: "txc".into(),
            dvol: "undrained".into(),
            dmin: "approx2".into(),
        }
    }
}

/// Initial stress state, void ratio, target strain and output directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSetup {
    pub p0: Scalar,
    pub q0: Scalar,
    pub pi0: Scalar,
    pub e0: Scalar,
    #[serde(rename = "epsQ")]
    pub eps_q: Scalar,
    /// Output directory name, e.g. `ns-000042/`.
    pub name: String,
}

impl SimulationSetup {
    /// Initial image pressure `ceil(p0 / e)`.
    pub fn image_pressure(p0: Scalar) -> Scalar {
        (p0 / std::f64::consts::E).ceil()
    }

    /// Initial void ratio `psi0 + Gamma - lambd · ln(p0 / pref)`.
    pub fn void_ratio(psi0: Scalar, gamma: Scalar, lambd: Scalar, p0: Scalar, pref: Scalar) -> Scalar {
        psi0 + (gamma - lambd * (p0 / pref).ln())
    }

    /// Output directory name for `id`.
    pub fn dir_name(id: RunId) -> String {
        format!("{}/", id.name())
    }
}

impl RunDescriptor {
    /// File name for `id`, e.g. `ns-000042.json`.
    pub fn file_name(id: RunId) -> String {
        format!("{}.json", id.name())
    }

    /// Serializes with four-space indentation.
    pub fn to_json_pretty(&self) -> NorsandResult<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)
            .map_err(|e| NorsandError::Serialization(format!("descriptor: {e}")))?;
        Ok(buf)
    }

    /// Writes the descriptor for `id` into `dir`.
    pub fn write_to_dir(&self, dir: &Path, id: RunId) -> NorsandResult<()> {
        let bytes = self.to_json_pretty()?;
        let mut file = std::fs::File::create(dir.join(Self::file_name(id)))?;
        file.write_all(&bytes)?;
        Ok(())
    }

    /// Reads a descriptor from a JSON file.
    pub fn read(path: &Path) -> NorsandResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| NorsandError::Input(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&text)
            .map_err(|e| NorsandError::Input(format!("{}: {e}", path.display())))
    }
}
