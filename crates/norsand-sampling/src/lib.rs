//! # norsand-sampling
//!
//! Builds the run descriptors of a parametric study.
//!
//! A [`ParameterSpace`] fixes the study constants and gives one [`Axis`] per
//! varied quantity. [`SamplingMode::Grid`] walks the Cartesian product;
//! [`SamplingMode::Random`] draws a seeded, reproducible set of points.

pub mod axis;
pub mod generator;
pub mod space;

pub use axis::Axis;
pub use generator::{Generator, SamplingMode};
pub use space::{ParameterSample, ParameterSpace, StudyConstants};
