//! MeshError: Unified error type for bend-mesh public APIs
//!
//! Every fallible operation in the crate (parameter resolution, topology
//! validation, serialization and the post-processing readers) reports through
//! this enum so callers can match on the failure class.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type MeshResult<T> = Result<T, MeshError>;

/// Unified error type for bend-mesh operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// Invalid or geometrically infeasible generator parameters.
    ///
    /// Raised by the parameter resolver before any topology is built.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// The generated topology broke one of its structural invariants
    /// (handedness, index range, patch face counts). Indicates a defect in
    /// the generator, never bad input.
    #[error("Topology invariant violated: {0}")]
    TopologyInvariant(String),
    /// Writing the output artifact failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// A tab-separated numeric table could not be parsed.
    #[error("Table parse error at line {line}: {message}")]
    TableParse { line: usize, message: String },
    /// A solver log could not be interpreted.
    #[error("Log parse error: {0}")]
    LogParse(String),
}

impl MeshError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        MeshError::Configuration(message.into())
    }

    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        MeshError::TopologyInvariant(message.into())
    }
}

impl From<std::io::Error> for MeshError {
    fn from(err: std::io::Error) -> Self {
        MeshError::Serialization(err.to_string())
    }
}

impl From<std::fmt::Error> for MeshError {
    fn from(err: std::fmt::Error) -> Self {
        MeshError::Serialization(err.to_string())
    }
}
