//! Error types for distribution evaluation.

use arrow::error::ArrowError;
use datafusion::error::DataFusionError;
use thiserror::Error;

/// Result type alias using [`StochasticError`].
pub type Result<T> = std::result::Result<T, StochasticError>;

/// Error types for distribution evaluation.
///
/// Every variant is fatal to the batch that raised it. Missing input is not an
/// error: it yields a null output row instead.
#[derive(Debug, Error)]
pub enum StochasticError {
    // ==================== Parameter and Domain Errors ====================
    /// A parameter tuple lies outside its family's legal domain.
    #[error("Invalid parameter for {family} distribution: {parameter} = {value} ({reason})")]
    InvalidParameter {
        family: &'static str,
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Evaluation outside the support of a validated distribution.
    #[error("Domain error in {family}_{operation}: {message}")]
    DomainError {
        family: &'static str,
        operation: &'static str,
        message: String,
    },

    // ==================== Host Contract Errors ====================
    /// Wrong number of input columns for a function.
    #[error("{function} expects {expected} arguments, got {actual}")]
    ArgumentCount {
        function: String,
        expected: usize,
        actual: usize,
    },

    /// A varying column whose length differs from the batch row count.
    #[error("Length mismatch: batch has {expected} rows, column has {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Input column type that cannot be read as a number.
    #[error("Type error: expected {expected}, got {actual}")]
    TypeError { expected: String, actual: String },

    /// Operation result tag that disagrees with the registered output shape.
    #[error("Result shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// Operation invoked through another class's calling convention.
    #[error("{operation} is a {class} operation and cannot be evaluated as {requested}")]
    WrongOperationClass {
        operation: &'static str,
        class: &'static str,
        requested: &'static str,
    },

    /// Lookup of a function name that is not registered.
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Failure in the random-variate collaborator.
    #[error("Sampling error: {0}")]
    SamplingError(String),

    // ==================== Wrapped Errors ====================
    /// Arrow compute or builder error.
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// `DataFusion` error.
    #[error("DataFusion error: {0}")]
    DataFusion(#[from] DataFusionError),
}

impl StochasticError {
    /// Builds a [`StochasticError::DomainError`].
    pub fn domain(family: &'static str, operation: &'static str, message: impl Into<String>) -> Self {
        StochasticError::DomainError {
            family,
            operation,
            message: message.into(),
        }
    }

    /// Returns true for errors raised by parameter validation.
    #[must_use]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, StochasticError::InvalidParameter { .. })
    }

    /// Returns true for errors raised by the math collaborator.
    #[must_use]
    pub fn is_domain_error(&self) -> bool {
        matches!(self, StochasticError::DomainError { .. })
    }
}

impl From<StochasticError> for DataFusionError {
    fn from(err: StochasticError) -> Self {
        match err {
            StochasticError::DataFusion(inner) => inner,
            other => DataFusionError::External(Box::new(other)),
        }
    }
}
