//! # apis
//!
//! Artificial bee colony (ABC) optimization over bounded parameter spaces.
//!
//! Clients register named parameters with numeric bounds and supply an
//! objective callback; the colony maintains a population of candidate
//! solutions, iteratively explores, exploits, and abandons regions of the
//! search space, and reports the best solution found. Lower objective values
//! are better; negate the objective to maximize.
//!
//! ## Core Concepts
//!
//! - **Employers** exploit one food source each and refresh it via local
//!   mutation or scouting
//! - **Onlookers** probabilistically attach to an employer's neighborhood
//!   each generation, weighted by fitness
//! - **Abandonment** discards any position that fails to improve for
//!   `num_parameters * num_employers` consecutive generations
//!
//! Candidate evaluations within a generation are independent and can run on
//! a worker pool sized at colony construction (the default-on `parallel`
//! feature).
//!
//! ## Quick Start
//!
//! ```
//! use apis::prelude::*;
//! use rand::SeedableRng;
//!
//! # fn main() -> Result<(), ColonyError> {
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let objective = |params: &ParamSet| -> Result<f64, EvaluationError> {
//!     Ok(params.iter().map(|p| p.value().as_f64()).sum())
//! };
//!
//! let mut colony = Colony::new(10, objective)?;
//! colony.add_param("x", ParamValue::Int(0), ParamValue::Int(10), true)?;
//! colony.add_param("y", ParamValue::Int(0), ParamValue::Int(10), true)?;
//! colony.initialize(&mut rng)?;
//!
//! let best = colony.run(25, &mut rng)?;
//! assert_eq!(best.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod bee;
pub mod colony;
pub mod error;
pub mod events;
pub mod objective;
pub mod parameter;
pub mod stats;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bee::Bee;
    pub use crate::colony::Colony;
    pub use crate::error::{ColonyError, ColonyResult, ConfigError, EvaluationError, StateError};
    pub use crate::events::{ColonyEvent, EventSink, NoopSink, TracingSink};
    pub use crate::objective::Objective;
    pub use crate::parameter::{ParamSet, ParamValue, Parameter};
    pub use crate::stats::GenerationStats;
}
