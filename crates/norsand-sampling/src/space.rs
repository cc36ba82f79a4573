//! Parameter space of a study: constants plus one axis per varied quantity.

use serde::{Deserialize, Serialize};

use norsand_io::contract::{RunDescriptor, SimulationSetup, SolverOptions};
use norsand_material::MaterialParameters;
use norsand_types::{NorsandError, NorsandResult, RunId, Scalar};

use crate::axis::Axis;

/// Quantities held fixed across the whole study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConstants {
    /// Reference pressure.
    pub pref: Scalar,
    /// Initial mean effective stress.
    pub p0: Scalar,
    /// Initial deviatoric stress.
    pub q0: Scalar,
    #[serde(rename = "Mtc")]
    pub mtc: Scalar,
    #[serde(rename = "Gamma")]
    pub gamma: Scalar,
    pub lambd: Scalar,
    /// Shear rigidity; `Gref = Ir · pref`.
    #[serde(rename = "Ir")]
    pub ir: Scalar,
    pub ne: Scalar,
    pub np: Scalar,
    pub nh: Scalar,
    /// Target shear strain of each simulation.
    #[serde(rename = "epsQ")]
    pub eps_q: Scalar,
}

impl Default for StudyConstants {
    fn default() -> Self {
        Self {
            pref: 100.0e3,
            p0: 160.0e3,
            q0: 0.0,
            mtc: 1.24,
            gamma: 0.91,
            lambd: 0.014,
            ir: 150.0,
            ne: 1.0,
            np: 0.0,
            nh: 2.0,
            eps_q: 0.4,
        }
    }
}

/// One point of the parameter space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSample {
    pub psi0: Scalar,
    pub nu: Scalar,
    #[serde(rename = "N")]
    pub n: Scalar,
    pub chitc: Scalar,
    pub href: Scalar,
}

/// Study constants, solver options and the varied axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSpace {
    pub constants: StudyConstants,
    pub options: SolverOptions,
    pub psi0: Axis,
    pub nu: Axis,
    #[serde(rename = "N")]
    pub n: Axis,
    pub chitc: Axis,
    pub href: Axis,
}

impl Default for ParameterSpace {
    fn default() -> Self {
        Self {
            constants: StudyConstants::default(),
            options: SolverOptions::default(),
            psi0: Axis::Linspace { start: -0.2, stop: 0.2, num: 11 },
            nu: Axis::Linspace { start: 0.1, stop: 0.35, num: 6 },
            n: Axis::Linspace { start: 0.1, stop: 0.6, num: 11 },
            chitc: Axis::Linspace { start: 1.0, stop: 6.0, num: 11 },
            href: Axis::Logspace { start: 5.0, stop: 150.0, num: 15 },
        }
    }
}

impl ParameterSpace {
    /// Axes in grid nesting order, outermost first.
    pub fn axes(&self) -> [(&'static str, &Axis); 5] {
        [
            ("psi0", &self.psi0),
            ("nu", &self.nu),
            ("N", &self.n),
            ("chitc", &self.chitc),
            ("href", &self.href),
        ]
    }

    pub fn validate(&self) -> NorsandResult<()> {
        for (name, axis) in self.axes() {
            axis.validate(name)?;
        }
        let c = &self.constants;
        for (name, value) in [("pref", c.pref), ("p0", c.p0), ("Mtc", c.mtc), ("lambd", c.lambd), ("Ir", c.ir)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(NorsandError::InvalidConfig(format!(
                    "constant {name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Number of grid points.
    pub fn grid_size(&self) -> usize {
        self.axes().iter().map(|(_, axis)| axis.len()).product()
    }

    /// Material parameters for one sample.
    pub fn material(&self, sample: &ParameterSample) -> MaterialParameters {
        let c = &self.constants;
        MaterialParameters {
            pref: c.pref,
            gref: c.ir * c.pref,
            ne: c.ne,
            nu: sample.nu,
            gamma: c.gamma,
            lambd: c.lambd,
            mtc: c.mtc,
            n: sample.n,
            href: sample.href,
            np: c.np,
            nh: c.nh,
            chitc: sample.chitc,
        }
    }

    /// Full solver descriptor for run `id`.
    pub fn descriptor(&self, id: RunId, sample: &ParameterSample) -> RunDescriptor {
        let c = &self.constants;
        RunDescriptor {
            params: self.material(sample),
            opts: self.options.clone(),
            sim: SimulationSetup {
                p0: c.p0,
                q0: c.q0,
                pi0: SimulationSetup::image_pressure(c.p0),
                e0: SimulationSetup::void_ratio(sample.psi0, c.gamma, c.lambd, c.p0, c.pref),
                eps_q: c.eps_q,
                name: SimulationSetup::dir_name(id),
            },
        }
    }
}
