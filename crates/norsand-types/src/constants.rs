//! Classification thresholds, column contract, and file-layout names.

use crate::scalar::Scalar;

/// Relative distance from the steady-state stress below which a sample is
/// considered to sit on the steady-state line.
///
/// Onset and reversal detection require `qCheck > PROXIMITY_TOLERANCE`;
/// the proximity fallback accepts `qCheck < PROXIMITY_TOLERANCE`.
pub const PROXIMITY_TOLERANCE: Scalar = 0.01;

/// Absolute step-to-step change in deviatoric stress treated as a plateau.
pub const STATIONARITY_TOLERANCE: Scalar = 1.0e-12;

/// Sentinel written for point components a response type does not populate.
pub const SENTINEL: Scalar = -1.0;

/// Column holding mean effective stress `p` in the solver data table.
pub const COL_P: usize = 0;

/// Column holding deviatoric stress `q`.
pub const COL_Q: usize = 1;

/// Column holding the accumulated shear strain.
pub const COL_EPS: usize = 4;

/// Column holding the initial state parameter `psi0`.
pub const COL_PSI0: usize = 6;

/// Minimum number of columns a data row must carry.
pub const MIN_COLUMNS: usize = COL_PSI0 + 1;

/// File inside each run directory echoing the material parameters.
pub const PARAMS_FILE: &str = "saveParams.txt";

/// File inside each run directory holding the stress-strain table.
pub const DATA_FILE: &str = "saveData.txt";

/// Prefix shared by run directories, descriptors, and figures.
pub const RUN_PREFIX: &str = "ns";
