//! Colony orchestration
//!
//! The [`Colony`] owns the parameter schema, the bee population, the
//! objective callback, and the per-generation employer/onlooker/scout cycle.
//! Each generation plans one successor per population slot, evaluates every
//! pending candidate as a single batch (on a worker pool when parallelism is
//! enabled), and only then applies replacement decisions, so a failing
//! evaluation leaves the population untouched.

use std::collections::BTreeMap;

use rand::Rng;
use rand_distr::{Distribution, WeightedIndex};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::bee::Bee;
use crate::error::{ColonyError, ColonyResult, ConfigError, EvaluationError, StateError};
use crate::events::{ColonyEvent, EventSink, NoopSink};
use crate::objective::Objective;
use crate::parameter::{ParamSet, ParamValue, Parameter};
use crate::stats::GenerationStats;

/// How a population slot is refreshed within one generation
enum Successor {
    /// Abandoned employer: restart from a random position
    Scout,
    /// Abandoned onlooker: reattach to a roulette-chosen neighborhood
    Reassigned,
    /// Working bee: compare against a mutated neighbor of its own position
    Neighbor,
}

/// Pick an index in `0..len` other than `exclude`
fn pick_distinct<R: Rng>(len: usize, exclude: usize, rng: &mut R) -> usize {
    if len <= 1 {
        return exclude;
    }
    let mut index = rng.gen_range(0..len - 1);
    if index >= exclude {
        index += 1;
    }
    index
}

/// Orchestrates the artificial bee colony search
///
/// Lifecycle: register parameters with [`add_param`](Self::add_param), build
/// and evaluate the initial population with
/// [`initialize`](Self::initialize), then call [`search`](Self::search) once
/// per generation (or [`run`](Self::run) for many). The population always
/// holds `2 * num_employers` bees after initialization.
pub struct Colony<O: Objective> {
    schema: Vec<Parameter>,
    bees: Vec<Bee>,
    num_employers: usize,
    objective: O,
    workers: usize,
    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,
    best_fitness: Option<f64>,
    best_params: Option<BTreeMap<String, ParamValue>>,
    generation: usize,
    history: Vec<GenerationStats>,
    sink: Box<dyn EventSink>,
}

impl<O: Objective> Colony<O> {
    /// Create a colony that evaluates candidates sequentially
    pub fn new(num_employers: usize, objective: O) -> Result<Self, ConfigError> {
        Self::with_workers(num_employers, objective, 1)
    }

    /// Create a colony that evaluates each generation's candidates on
    /// `workers` threads
    ///
    /// `workers <= 1` means fully sequential evaluation on the calling
    /// thread. The worker pool is built once here and reused for every
    /// generation.
    pub fn with_workers(
        num_employers: usize,
        objective: O,
        workers: usize,
    ) -> Result<Self, ConfigError> {
        if num_employers == 0 {
            return Err(ConfigError::NoEmployers);
        }

        #[cfg(feature = "parallel")]
        let pool = if workers > 1 {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .build()
                    .map_err(|e| ConfigError::ThreadPool(e.to_string()))?,
            )
        } else {
            None
        };

        Ok(Self {
            schema: Vec::new(),
            bees: Vec::new(),
            num_employers,
            objective,
            workers,
            #[cfg(feature = "parallel")]
            pool,
            best_fitness: None,
            best_params: None,
            generation: 0,
            history: Vec::new(),
            sink: Box::new(NoopSink),
        })
    }

    /// Replace the event sink
    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Register a parameter to optimize
    ///
    /// Only legal before [`initialize`](Self::initialize). Fails if the name
    /// duplicates an existing parameter or the bounds are invalid.
    pub fn add_param(
        &mut self,
        name: &str,
        min: ParamValue,
        max: ParamValue,
        restrict: bool,
    ) -> ColonyResult<()> {
        if !self.bees.is_empty() {
            return Err(StateError::AlreadyInitialized.into());
        }
        if self.schema.iter().any(|p| p.name() == name) {
            return Err(ConfigError::DuplicateParameter(name.to_owned()).into());
        }
        let parameter = Parameter::new(name, min, max, restrict)?;
        self.schema.push(parameter);
        self.sink.on_event(&ColonyEvent::ParameterRegistered {
            name: name.to_owned(),
            min,
            max,
        });
        Ok(())
    }

    /// Find initial positions for employers and deploy onlookers to
    /// neighboring positions of employers with good fitness
    ///
    /// The resulting population of `2 * num_employers` bees is generation 0.
    pub fn initialize<R: Rng>(&mut self, rng: &mut R) -> ColonyResult<()> {
        if self.schema.is_empty() {
            return Err(StateError::NoParameters.into());
        }
        if !self.bees.is_empty() {
            return Err(StateError::AlreadyInitialized.into());
        }
        let trial_limit = self.trial_limit();

        // Employer phase: random positions, evaluated as one batch.
        let positions: Vec<ParamSet> = (0..self.num_employers)
            .map(|_| self.random_assignment(rng))
            .collect();
        let values = self.evaluate_batch(&positions)?;
        let employers: Vec<Bee> = positions
            .into_iter()
            .zip(values)
            .map(|(params, objective)| Bee::employer(params, objective, trial_limit))
            .collect();

        // Onlooker phase: mutated neighbors of roulette-chosen employers.
        let weights: Vec<f64> = employers.iter().map(Bee::fitness).collect();
        let neighbors: Vec<ParamSet> = (0..self.num_employers)
            .map(|_| {
                let chosen = sample_weighted(&weights, rng);
                let reference = pick_distinct(employers.len(), chosen, rng);
                employers[chosen].mutate(&employers[reference], rng)
            })
            .collect();
        let values = self.evaluate_batch(&neighbors)?;
        let onlookers = neighbors
            .into_iter()
            .zip(values)
            .map(|(params, objective)| Bee::onlooker(params, objective, trial_limit));

        self.bees = employers;
        self.bees.extend(onlookers);
        self.generation = 0;
        self.update_best();
        self.record_generation();
        self.sink.on_event(&ColonyEvent::ColonyInitialized {
            population: self.bees.len(),
        });
        Ok(())
    }

    /// Advance the colony by one generation
    ///
    /// Every bee independently gets a successor: abandoned employers scout a
    /// fresh random position, abandoned onlookers reattach to a
    /// roulette-chosen neighborhood, and working bees compete against a
    /// mutated neighbor of their own position. All candidate evaluations for
    /// the generation are dispatched before any replacement decision is made.
    pub fn search<R: Rng>(&mut self, rng: &mut R) -> ColonyResult<()> {
        if self.bees.is_empty() {
            return Err(StateError::NotInitialized.into());
        }
        let trial_limit = self.trial_limit();

        // Roulette weights are snapshotted before any successor is planned,
        // so mid-generation candidates cannot influence this generation's
        // selection probabilities.
        let weights: Vec<f64> = self.bees.iter().map(Bee::fitness).collect();

        let mut plans = Vec::with_capacity(self.bees.len());
        let mut candidates = Vec::with_capacity(self.bees.len());
        for slot in 0..self.bees.len() {
            let bee = &self.bees[slot];
            let (plan, candidate) = if bee.abandoned() {
                if bee.is_employer() {
                    (Successor::Scout, self.random_assignment(rng))
                } else {
                    let chosen = sample_weighted(&weights, rng);
                    let reference = pick_distinct(self.bees.len(), chosen, rng);
                    (
                        Successor::Reassigned,
                        self.bees[chosen].mutate(&self.bees[reference], rng),
                    )
                }
            } else {
                let reference = pick_distinct(self.bees.len(), slot, rng);
                (
                    Successor::Neighbor,
                    bee.mutate(&self.bees[reference], rng),
                )
            };
            plans.push(plan);
            candidates.push(candidate);
        }

        // Full-generation barrier: nothing is replaced until the entire
        // batch has been evaluated, and an error leaves the population at
        // its pre-call state.
        let values = self.evaluate_batch(&candidates)?;

        for (slot, (candidate, objective)) in candidates.into_iter().zip(values).enumerate() {
            let bee = &mut self.bees[slot];
            match plans[slot] {
                Successor::Scout => *bee = Bee::employer(candidate, objective, trial_limit),
                Successor::Reassigned => *bee = Bee::onlooker(candidate, objective, trial_limit),
                Successor::Neighbor => {
                    if bee.is_better_food(objective) {
                        *bee = if bee.is_employer() {
                            Bee::employer(candidate, objective, trial_limit)
                        } else {
                            Bee::onlooker(candidate, objective, trial_limit)
                        };
                    } else {
                        bee.record_trial();
                    }
                }
            }
        }

        self.generation += 1;
        self.update_best();
        self.record_generation();
        Ok(())
    }

    /// Run `generations` search rounds and return the best assignment found
    pub fn run<R: Rng>(
        &mut self,
        generations: usize,
        rng: &mut R,
    ) -> ColonyResult<BTreeMap<String, ParamValue>> {
        if self.bees.is_empty() {
            return Err(StateError::NotInitialized.into());
        }
        for _ in 0..generations {
            self.search(rng)?;
        }
        self.best_params
            .clone()
            .ok_or_else(|| ColonyError::State(StateError::NotInitialized))
    }

    /// Roulette-wheel selection probabilities over the current population
    ///
    /// Probabilities are proportional to fitness and sum to 1 for any
    /// non-empty population.
    pub fn selection_probabilities(&self) -> Vec<f64> {
        let total: f64 = self.bees.iter().map(Bee::fitness).sum();
        self.bees.iter().map(|b| b.fitness() / total).collect()
    }

    /// Best fitness score observed across all generations
    pub fn best_fitness(&self) -> Option<f64> {
        self.best_fitness
    }

    /// Raw parameter values of the best solution observed so far
    pub fn best_params(&self) -> Option<&BTreeMap<String, ParamValue>> {
        self.best_params.as_ref()
    }

    /// Mean fitness of the current generation
    pub fn mean_fitness(&self) -> Option<f64> {
        if self.bees.is_empty() {
            return None;
        }
        Some(self.bees.iter().map(Bee::fitness).sum::<f64>() / self.bees.len() as f64)
    }

    /// Mean raw objective value of the current generation
    pub fn mean_objective(&self) -> Option<f64> {
        if self.bees.is_empty() {
            return None;
        }
        Some(self.bees.iter().map(Bee::objective).sum::<f64>() / self.bees.len() as f64)
    }

    /// Current generation number (0 after `initialize`)
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The live population
    pub fn population(&self) -> &[Bee] {
        &self.bees
    }

    /// Number of bees in the live population
    ///
    /// Zero before [`initialize`](Self::initialize), `2 * num_employers`
    /// afterwards.
    pub fn population_len(&self) -> usize {
        self.bees.len()
    }

    /// Number of employer bees (population is twice this)
    pub fn num_employers(&self) -> usize {
        self.num_employers
    }

    /// Configured parallelism degree
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Per-generation statistics recorded so far
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// Stagnation budget applied to every bee
    fn trial_limit(&self) -> usize {
        self.schema.len() * self.num_employers
    }

    /// Clone the schema with fresh uniformly random values
    fn random_assignment<R: Rng>(&self, rng: &mut R) -> ParamSet {
        let mut set = ParamSet::new();
        for prototype in &self.schema {
            let mut parameter = prototype.clone();
            parameter.generate_random_value(rng);
            set.insert(parameter);
        }
        set
    }

    /// Evaluate a batch of candidates, preserving input order
    ///
    /// Blocks until every evaluation in the batch completes. The first error
    /// aborts the batch.
    fn evaluate_batch(&self, candidates: &[ParamSet]) -> Result<Vec<f64>, EvaluationError> {
        #[cfg(feature = "parallel")]
        if let Some(pool) = &self.pool {
            return pool.install(|| {
                candidates
                    .par_iter()
                    .map(|candidate| self.objective.evaluate(candidate))
                    .collect()
            });
        }
        candidates
            .iter()
            .map(|candidate| self.objective.evaluate(candidate))
            .collect()
    }

    /// Update the best-known solution from the current population
    ///
    /// Best fitness is monotonically non-decreasing and survives the bee
    /// that produced it.
    fn update_best(&mut self) {
        for bee in &self.bees {
            let improved = self
                .best_fitness
                .map_or(true, |best| bee.fitness() > best);
            if improved {
                self.best_fitness = Some(bee.fitness());
                self.best_params = Some(bee.params().values());
                self.sink.on_event(&ColonyEvent::NewBestFound {
                    fitness: bee.fitness(),
                    params: bee.params().values(),
                });
            }
        }
    }

    fn record_generation(&mut self) {
        let stats = GenerationStats::from_population(&self.bees, self.generation);
        self.sink.on_event(&ColonyEvent::GenerationCompleted {
            generation: stats.generation,
            mean_fitness: stats.mean_fitness,
            mean_objective: stats.mean_objective,
        });
        self.history.push(stats);
    }
}

/// Sample an index proportionally to `weights`
///
/// Fitness scores are strictly positive, so the distribution is well formed;
/// the uniform fallback only guards degenerate floating-point weights.
fn sample_weighted<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    match WeightedIndex::new(weights) {
        Ok(dist) => dist.sample(rng),
        Err(_) => rng.gen_range(0..weights.len()),
    }
}
