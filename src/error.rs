//! Error types for the frame solver

use thiserror::Error;

/// Main error type for model building and analysis
#[derive(Error, Debug)]
pub enum FEAError {
    #[error("Node '{0}' not found in model")]
    NodeNotFound(String),

    #[error("Auxiliary node '{0}' not found in model")]
    AuxNodeNotFound(String),

    #[error("Member '{0}' not found in model")]
    MemberNotFound(String),

    #[error("Plate '{0}' not found in model")]
    PlateNotFound(String),

    #[error("Duplicate name '{0}' already exists")]
    DuplicateName(String),

    #[error("Model is unstable: {0}")]
    Unstable(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Model not analyzed - run an analysis first")]
    NotAnalyzed,

    #[error("P-Delta analysis failed to converge after {0} iterations")]
    ConvergenceFailed(usize),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Math error: {0}")]
    MathError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for solver operations
pub type FEAResult<T> = Result<T, FEAError>;
