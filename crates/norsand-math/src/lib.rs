//! # norsand-math
//!
//! Numeric primitives for the NorSand toolkit.
//!
//! Provides:
//! - [`Pchip`] — piecewise cubic Hermite interpolant with Fritsch–Carlson
//!   slopes (shape preserving, extrapolates with its end segments)
//! - [`prune_increasing`] — keeps the strictly increasing abscissa subsequence

pub mod pchip;

pub use pchip::{prune_increasing, Pchip};
