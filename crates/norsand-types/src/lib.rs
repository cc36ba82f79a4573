//! # norsand-types
//!
//! Shared types, identifiers, error types, and classification constants
//! for the NorSand parametric study toolkit.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other norsand crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{FailureKind, NorsandError, NorsandResult};
pub use ids::RunId;
pub use scalar::Scalar;
