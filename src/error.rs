//! Error types for procflow
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias for procflow operations
pub type Result<T> = std::result::Result<T, ProcflowError>;

/// Main error type for procflow operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcflowError {
    /// Sequence cannot be monitored (e.g. it is empty)
    #[error("Invalid sequence: {0}")]
    InvalidSequence(String),

    /// The prediction adapter failed to produce a next event
    #[error("Prediction error: {0}")]
    Prediction(#[from] PredictionError),

    /// Metrics requested over a run with no scored test cases
    #[error("Empty evaluation: no test cases were scored")]
    EmptyEvaluation,
}

/// Errors surfaced by a [`PredictionAdapter`](crate::predictor::PredictionAdapter)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// The adapter has no candidate for this history
    #[error("No candidate next event after {history_len} events")]
    NoCandidate { history_len: usize },

    /// The adapter produced output that is not a bare event name
    #[error("Malformed prediction: {0:?}")]
    Malformed(String),

    /// Backend failure (timeout, transport, inference)
    #[error("Predictor failed: {0}")]
    Failed(String),
}
