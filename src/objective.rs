//! Objective-function contract
//!
//! The colony treats the objective as an opaque, possibly expensive callback.
//! Lower raw values are better; maximization objectives are handled by
//! negating the value before returning it.

use crate::error::EvaluationError;
use crate::parameter::ParamSet;

/// The objective function optimized by a colony
///
/// Implementations must be safe to invoke concurrently from independent
/// worker threads when parallel evaluation is enabled; the engine assumes no
/// shared mutable state between evaluations. Determinism is not required, but
/// with a non-deterministic objective the best-known assignment reflects
/// whichever evaluation happened to run.
///
/// Any error returned here aborts the in-progress generation and propagates
/// unmodified to the caller of `initialize`/`search`. The engine never retries
/// a failed evaluation or substitutes a default value.
pub trait Objective: Send + Sync {
    /// Evaluate a candidate assignment, returning the raw objective value
    fn evaluate(&self, params: &ParamSet) -> Result<f64, EvaluationError>;
}

impl<F> Objective for F
where
    F: Fn(&ParamSet) -> Result<f64, EvaluationError> + Send + Sync,
{
    fn evaluate(&self, params: &ParamSet) -> Result<f64, EvaluationError> {
        self(params)
    }
}
