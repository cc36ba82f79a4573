//! # norsand-material
//!
//! The per-run NorSand parameter record and the quantities the
//! classifier derives from it (shear rigidity, steady-state stress).

pub mod properties;

pub use properties::MaterialParameters;
