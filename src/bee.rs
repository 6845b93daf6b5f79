//! Candidate solutions ("bees")
//!
//! A [`Bee`] owns one food source: a full parameter assignment, its raw
//! objective value, and the strictly positive fitness derived from it. Bees
//! also carry the stagnation counter that drives the abandonment policy.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::parameter::ParamSet;

/// A candidate solution and its evaluated quality
///
/// Bees are replaced, never revived: a bee that stagnates past its trial
/// limit is discarded and a fresh bee takes its population slot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Bee {
    params: ParamSet,
    objective: f64,
    fitness: f64,
    trials: usize,
    trial_limit: usize,
    employer: bool,
}

impl Bee {
    fn new(params: ParamSet, objective: f64, trial_limit: usize, employer: bool) -> Self {
        Self {
            params,
            objective,
            fitness: Self::fitness_from(objective),
            trials: 0,
            trial_limit,
            employer,
        }
    }

    /// Create an employer bee exploiting its own food source
    pub fn employer(params: ParamSet, objective: f64, trial_limit: usize) -> Self {
        Self::new(params, objective, trial_limit, true)
    }

    /// Create an onlooker bee attached to a neighbor position
    pub fn onlooker(params: ParamSet, objective: f64, trial_limit: usize) -> Self {
        Self::new(params, objective, trial_limit, false)
    }

    /// Transform a raw objective value into a strictly positive fitness score
    ///
    /// `obj >= 0` maps to `1 / (1 + obj)`, negative values map to
    /// `1 + |obj|`. Lower objective values always yield higher fitness for
    /// non-negative objectives; the transform assumes minimization as a fixed
    /// policy.
    pub fn fitness_from(objective: f64) -> f64 {
        if objective >= 0.0 {
            1.0 / (1.0 + objective)
        } else {
            1.0 + objective.abs()
        }
    }

    /// The bee's parameter assignment
    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    /// Last evaluated raw objective value
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Derived fitness score, always strictly positive
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Consecutive generations without improvement
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Stagnation budget, fixed at construction
    pub fn trial_limit(&self) -> usize {
        self.trial_limit
    }

    /// Whether this bee holds the employer role
    pub fn is_employer(&self) -> bool {
        self.employer
    }

    /// Whether the food source is exhausted and due for replacement
    pub fn abandoned(&self) -> bool {
        self.trials >= self.trial_limit
    }

    /// Whether a candidate objective value beats this bee's food source
    pub fn is_better_food(&self, candidate_objective: f64) -> bool {
        Self::fitness_from(candidate_objective) > self.fitness
    }

    /// Record one failed improvement attempt
    ///
    /// Called once per generation for a bee whose mutated candidate was no
    /// better than its current position.
    pub fn record_trial(&mut self) {
        self.trials += 1;
    }

    /// Propose a candidate assignment in this bee's neighborhood
    ///
    /// Perturbs exactly one randomly chosen parameter toward the same-named
    /// value of `reference`, with `phi` drawn uniformly from `[-1, 1]`. The
    /// bee itself is never modified; the returned set is a fresh clone of the
    /// schema with a single value changed. A bee over an empty parameter set
    /// has no coordinate to perturb and returns the empty clone as-is.
    pub fn mutate<R: Rng>(&self, reference: &Bee, rng: &mut R) -> ParamSet {
        let mut candidate = self.params.clone();
        if candidate.is_empty() {
            return candidate;
        }
        let chosen = rng.gen_range(0..candidate.len());
        let name = candidate
            .names()
            .nth(chosen)
            .map(str::to_owned)
            .expect("chosen index is within the parameter count");
        let contrast = reference
            .params
            .get(&name)
            .expect("all bees share one parameter schema")
            .value()
            .as_f64();
        let phi = rng.gen_range(-1.0..=1.0);
        let param = candidate
            .get_mut(&name)
            .expect("name was drawn from this set");
        let next = param.mutate_toward(contrast, phi);
        param.set_value(next);
        candidate
    }
}
