//! Error types for the NorSand toolkit.
//!
//! All crates return `NorsandResult<T>` from fallible operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the NorSand toolkit.
#[derive(Debug, Error)]
pub enum NorsandError {
    /// A run descriptor or solver output file is missing or malformed.
    #[error("Input error: {0}")]
    Input(String),

    /// The stress path or material parameters cannot be classified.
    #[error("Data error: {0}")]
    Data(String),

    /// Classification reached a state that maps to no response type.
    #[error("Unclassified response: {0}")]
    Unclassified(String),

    /// The critical-state interpolant could not be constructed.
    #[error("Extrapolation error: {0}")]
    Extrapolation(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, NorsandError>`.
pub type NorsandResult<T> = Result<T, NorsandError>;

/// Coarse failure bucket used in batch summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FailureKind {
    Input,
    Data,
    Extrapolation,
    Unclassified,
    Config,
}

impl FailureKind {
    /// Returns all failure kinds in summary order.
    pub fn all() -> &'static [FailureKind] {
        &[
            FailureKind::Input,
            FailureKind::Data,
            FailureKind::Extrapolation,
            FailureKind::Unclassified,
            FailureKind::Config,
        ]
    }

    /// Returns a short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            FailureKind::Input => "input",
            FailureKind::Data => "data",
            FailureKind::Extrapolation => "extrapolation",
            FailureKind::Unclassified => "unclassified",
            FailureKind::Config => "config",
        }
    }
}

impl NorsandError {
    /// Maps this error to its summary bucket.
    ///
    /// I/O and serialization failures count as input failures: they can only
    /// arise while reading or writing run files.
    pub fn kind(&self) -> FailureKind {
        match self {
            NorsandError::Input(_) | NorsandError::Io(_) | NorsandError::Serialization(_) => {
                FailureKind::Input
            }
            NorsandError::Data(_) => FailureKind::Data,
            NorsandError::Unclassified(_) => FailureKind::Unclassified,
            NorsandError::Extrapolation(_) => FailureKind::Extrapolation,
            NorsandError::InvalidConfig(_) => FailureKind::Config,
        }
    }

    /// Returns true if this error must abort a whole batch rather than a
    /// single run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, NorsandError::Unclassified(_))
    }
}
