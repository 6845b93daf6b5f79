//! Structured colony events
//!
//! The colony reports progress as discrete events through an [`EventSink`]
//! rather than formatted strings, so the collaborator decides rendering.
//! Events are informational only and never affect control flow; the default
//! sink drops everything.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::parameter::ParamValue;

/// Discrete events emitted by a running colony
#[derive(Clone, Debug, PartialEq)]
pub enum ColonyEvent {
    /// A parameter was registered in the schema
    ParameterRegistered {
        /// Parameter name
        name: String,
        /// Lower bound
        min: ParamValue,
        /// Upper bound
        max: ParamValue,
    },
    /// The initial population was built and evaluated
    ColonyInitialized {
        /// Population size (twice the employer count)
        population: usize,
    },
    /// A generation finished and the population was replaced
    GenerationCompleted {
        /// Generation number
        generation: usize,
        /// Mean fitness across the new population
        mean_fitness: f64,
        /// Mean raw objective value across the new population
        mean_objective: f64,
    },
    /// A bee improved on the best solution observed so far
    NewBestFound {
        /// Fitness score of the new best
        fitness: f64,
        /// Raw parameter values of the new best
        params: BTreeMap<String, ParamValue>,
    },
}

/// Sink for colony events
///
/// Implementations may be called from the search loop between phases; they
/// must be cheap or hand off to their own machinery. Dropping events is
/// always safe.
pub trait EventSink: Send + Sync {
    /// Receive one event
    fn on_event(&self, event: &ColonyEvent);
}

/// Default sink that discards every event
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn on_event(&self, _event: &ColonyEvent) {}
}

/// Sink that forwards events to the `tracing` macros
///
/// Parameter registration and generation summaries log at debug level, new
/// best solutions at info.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn on_event(&self, event: &ColonyEvent) {
        match event {
            ColonyEvent::ParameterRegistered { name, min, max } => {
                debug!(%name, %min, %max, "parameter registered");
            }
            ColonyEvent::ColonyInitialized { population } => {
                info!(population, "initial employer and onlooker positions evaluated");
            }
            ColonyEvent::GenerationCompleted {
                generation,
                mean_fitness,
                mean_objective,
            } => {
                debug!(generation, mean_fitness, mean_objective, "generation completed");
            }
            ColonyEvent::NewBestFound { fitness, params } => {
                info!(fitness, ?params, "new best solution");
            }
        }
    }
}
