//! Scalar type alias for stress-path data.
//!
//! Solver output is written in double precision and the classification
//! thresholds (down to `1e-12`) are only meaningful at that precision.

/// The floating-point type used throughout the toolkit.
pub type Scalar = f64;
