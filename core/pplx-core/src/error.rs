//! Error types for the PPLX execution layer.
//!
//! All public APIs return `PplxResult<T>`; no panics in library code.

use thiserror::Error;

/// Unified error type for all PPLX operations.
#[derive(Debug, Error)]
pub enum PplxError {
    /// Construction-time contract violation (missing input, missing field reference)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `next()` called on an operator with no remaining rows
    #[error("iterator exhausted: next() called with no available row")]
    ExhaustedIterator,

    /// `schema()` called on an operator that does not project
    #[error("[BUG] schema can only be applied to ProjectOperator, instead of {operator}")]
    NotApplicable { operator: String },

    /// A tuple could not be rebuilt from its field set
    #[error("row reconstruction failed: {0}")]
    RowReconstruction(String),

    /// Type mismatch between expected and actual values
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid configuration value
    #[error("config error: {0}")]
    Config(String),

    /// Operator execution error
    #[error("execution error: {message}\nContext: {context}")]
    Execution { message: String, context: String },

    /// Apache Arrow error (RecordBatch operations)
    #[error("arrow error: {source}")]
    Arrow {
        #[from]
        source: arrow::error::ArrowError,
    },
}

impl PplxError {
    /// True when the error only signals end of iteration.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, PplxError::ExhaustedIterator)
    }

    pub(crate) fn not_applicable(operator: &str) -> Self {
        PplxError::NotApplicable {
            operator: operator.to_string(),
        }
    }
}

/// Result type alias for all PPLX operations.
pub type PplxResult<T> = Result<T, PplxError>;

// From 구현들
impl From<serde_json::Error> for PplxError {
    fn from(err: serde_json::Error) -> Self {
        PplxError::Serialization(err.to_string())
    }
}
