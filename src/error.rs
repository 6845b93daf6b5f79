//! Error types for apis
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for colony configuration
///
/// Raised synchronously at the offending call, never deferred to
/// `initialize`/`search`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A parameter with this name is already registered
    #[error("Parameter '{0}' is already registered")]
    DuplicateParameter(String),

    /// Lower bound exceeds upper bound
    #[error("Invalid bounds for '{name}': min ({min}) must be <= max ({max})")]
    InvalidBounds {
        /// Name of the offending parameter
        name: String,
        /// Rejected lower bound
        min: f64,
        /// Rejected upper bound
        max: f64,
    },

    /// Bounds mix integer and real kinds
    #[error("Bounds for '{0}' must both be integer or both be real")]
    BoundsKindMismatch(String),

    /// The colony was created with zero employer bees
    #[error("Colony must have at least one employer bee")]
    NoEmployers,

    /// The worker pool could not be constructed
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}

/// Error type for operations invoked out of sequence
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// `initialize` was called with an empty parameter schema
    #[error("Parameters must be registered before the colony is initialized")]
    NoParameters,

    /// `search` or `run` was called before `initialize`
    #[error("Colony must be initialized before searching")]
    NotInitialized,

    /// `add_param` was called after `initialize`
    #[error("Parameters cannot be added after the colony is initialized")]
    AlreadyInitialized,
}

/// An error produced by the user-supplied objective callback
///
/// Propagates unmodified through `initialize`/`search`; a failing evaluation
/// aborts the in-progress generation and the population stays at its pre-call
/// state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Objective evaluation failed: {0}")]
pub struct EvaluationError(pub String);

impl EvaluationError {
    /// Create a new evaluation error from a message
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<String> for EvaluationError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

impl From<&str> for EvaluationError {
    fn from(message: &str) -> Self {
        Self(message.to_owned())
    }
}

/// Top-level error type for colony operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ColonyError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// State error
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// Evaluation error
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),
}

/// Result type alias for colony operations
pub type ColonyResult<T> = Result<T, ColonyError>;
