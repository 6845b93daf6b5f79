//! Per-generation statistics
//!
//! Aggregates computed once per generation from the live population, kept by
//! the colony as a history and exposed through its query surface.

use serde::{Deserialize, Serialize};

use crate::bee::Bee;

/// Statistics for a single generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number (0 is the initial population)
    pub generation: usize,
    /// Highest fitness score in this generation
    pub best_fitness: f64,
    /// Mean fitness score across the population
    pub mean_fitness: f64,
    /// Mean raw objective value across the population
    pub mean_objective: f64,
    /// Number of bees currently past their trial limit
    pub abandoned: usize,
}

impl GenerationStats {
    /// Compute statistics from a population
    pub fn from_population(population: &[Bee], generation: usize) -> Self {
        if population.is_empty() {
            return Self {
                generation,
                best_fitness: 0.0,
                mean_fitness: 0.0,
                mean_objective: 0.0,
                abandoned: 0,
            };
        }

        let len = population.len() as f64;
        let best_fitness = population
            .iter()
            .map(Bee::fitness)
            .fold(f64::NEG_INFINITY, f64::max);
        let mean_fitness = population.iter().map(Bee::fitness).sum::<f64>() / len;
        let mean_objective = population.iter().map(Bee::objective).sum::<f64>() / len;
        let abandoned = population.iter().filter(|b| b.abandoned()).count();

        Self {
            generation,
            best_fitness,
            mean_fitness,
            mean_objective,
            abandoned,
        }
    }
}
