//! Run descriptor validation.
//!
//! Catches descriptors the solver would accept but the classifier could
//! never process, before they are written.

use norsand_types::{NorsandError, NorsandResult, RunId};

use crate::contract::{RunDescriptor, SimulationSetup};

/// Validates a complete run descriptor.
///
/// Checks:
/// - Material divisors (`Mtc`, `lambd`, `pref`) are positive and `Gref` finite
/// - Initial mean stress is positive and the target strain is positive
/// - Every numeric field is finite
/// - The output directory name has the `ns-XXXXXX/` form
/// - Solver option strings are non-empty
pub fn validate_descriptor(desc: &RunDescriptor) -> NorsandResult<()> {
    desc.params
        .validate()
        .map_err(|e| NorsandError::InvalidConfig(format!("params: {e}")))?;

    let sim = &desc.sim;
    for (name, value) in [
        ("p0", sim.p0),
        ("q0", sim.q0),
        ("pi0", sim.pi0),
        ("e0", sim.e0),
        ("epsQ", sim.eps_q),
    ] {
        if !value.is_finite() {
            return Err(NorsandError::InvalidConfig(format!("sim.{name} must be finite, got {value}")));
        }
    }
    if sim.p0 <= 0.0 {
        return Err(NorsandError::InvalidConfig(format!(
            "sim.p0 must be positive, got {}",
            sim.p0
        )));
    }
    if sim.eps_q <= 0.0 {
        return Err(NorsandError::InvalidConfig(format!(
            "sim.epsQ must be positive, got {}",
            sim.eps_q
        )));
    }

    match RunId::parse_name(&sim.name) {
        Some(id) if sim.name == SimulationSetup::dir_name(id) => {}
        _ => {
            return Err(NorsandError::InvalidConfig(format!(
                "sim.name '{}' is not of the form ns-XXXXXX/",
                sim.name
            )))
        }
    }

    let opts = &desc.opts;
    for (name, value) in [
        ("loose", &opts.loose),
        ("csl", &opts.csl),
        ("test", &opts.test),
        ("dvol", &opts.dvol),
        ("Dmin", &opts.dmin),
    ] {
        if value.trim().is_empty() {
            return Err(NorsandError::InvalidConfig(format!("opts.{name} is empty")));
        }
    }

    Ok(())
}
