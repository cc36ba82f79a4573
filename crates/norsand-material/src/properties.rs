//! NorSand material parameters.
//!
//! Field names on the wire are exactly the solver's keys so a parameters
//! echo can be deserialized without a mapping table.

use serde::{Deserialize, Serialize};

use norsand_types::{NorsandError, NorsandResult, Scalar};

/// Material constants for one simulation run.
///
/// | Key | Meaning | Used by the classifier |
/// |---|---|---|
/// | `pref` | Reference pressure | yes (rigidity) |
/// | `Gref` | Reference shear modulus | yes (rigidity) |
/// | `lambd` | Critical-state line slope | yes (steady state) |
/// | `Mtc` | Critical friction ratio | yes (steady state) |
/// | `nu`, `N`, `chitc`, `href` | Calibration constants | reported only |
/// | `Gamma`, `ne`, `np`, `nh` | Calibration constants | no |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialParameters {
    pub pref: Scalar,
    #[serde(rename = "Gref")]
    pub gref: Scalar,
    #[serde(default)]
    pub ne: Scalar,
    pub nu: Scalar,
    #[serde(rename = "Gamma", default)]
    pub gamma: Scalar,
    pub lambd: Scalar,
    #[serde(rename = "Mtc")]
    pub mtc: Scalar,
    #[serde(rename = "N")]
    pub n: Scalar,
    pub href: Scalar,
    #[serde(default)]
    pub np: Scalar,
    #[serde(default)]
    pub nh: Scalar,
    pub chitc: Scalar,
}

impl MaterialParameters {
    /// Shear rigidity `Ir = Gref / pref`, used to make strain dimensionless.
    pub fn rigidity(&self) -> Scalar {
        self.gref / self.pref
    }

    /// Steady-state deviatoric stress `q_ss = Mtc · exp(-psi0/lambd) · p0`.
    ///
    /// Fails if the result is zero or not finite.
    pub fn steady_state_q(&self, psi0: Scalar, p0: Scalar) -> NorsandResult<Scalar> {
        let q_ss = self.mtc * (-psi0 / self.lambd).exp() * p0;
        if !q_ss.is_finite() || q_ss == 0.0 {
            return Err(NorsandError::Data(format!(
                "steady-state stress q_ss = {q_ss} (Mtc = {}, psi0 = {psi0}, lambd = {}, p0 = {p0})",
                self.mtc, self.lambd
            )));
        }
        Ok(q_ss)
    }

    /// Checks the constants the classifier divides by.
    pub fn validate(&self) -> NorsandResult<()> {
        check_positive("Mtc", self.mtc)?;
        check_positive("lambd", self.lambd)?;
        check_positive("pref", self.pref)?;
        if !self.gref.is_finite() {
            return Err(NorsandError::Data(format!("Gref must be finite, got {}", self.gref)));
        }
        Ok(())
    }
}

fn check_positive(name: &str, value: Scalar) -> NorsandResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(NorsandError::Data(format!("{name} must be positive and finite, got {value}")))
    }
}
