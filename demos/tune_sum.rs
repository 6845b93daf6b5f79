//! Integer Sum Minimization
//!
//! This example demonstrates the basic colony lifecycle: register bounded
//! parameters, initialize the population, run the search, and read back the
//! best assignment. The objective is the sum of three integers in [0, 10],
//! so the optimum is all zeros.

use rand::rngs::StdRng;
use rand::SeedableRng;

use apis::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Integer Sum Minimization ===\n");

    // Create a seeded RNG for reproducibility
    let mut rng = StdRng::seed_from_u64(42);

    // The objective: sum of all parameter values (minimized)
    let objective = |params: &ParamSet| -> Result<f64, EvaluationError> {
        Ok(params.iter().map(|p| p.value().as_f64()).sum())
    };

    // Ten employer bees, candidates evaluated on four worker threads,
    // progress forwarded to `tracing`
    let mut colony = Colony::with_workers(10, objective, 4)?.with_sink(TracingSink);
    colony.add_param("x", ParamValue::Int(0), ParamValue::Int(10), true)?;
    colony.add_param("y", ParamValue::Int(0), ParamValue::Int(10), true)?;
    colony.add_param("z", ParamValue::Int(0), ParamValue::Int(10), true)?;

    colony.initialize(&mut rng)?;
    let best = colony.run(50, &mut rng)?;

    println!("Search complete!");
    println!("  Best fitness: {:.6}", colony.best_fitness().unwrap_or(0.0));
    println!("  Generations:  {}", colony.generation());
    println!("\nBest assignment:");
    for (name, value) in &best {
        println!("  {} = {}", name, value);
    }

    let total: f64 = best.values().map(ParamValue::as_f64).sum();
    println!("\nObjective at best: {}", total);

    Ok(())
}
