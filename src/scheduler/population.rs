//! Population search over independently seeded placement runs.
//!
//! Candidate 0 is the canonical run. Candidate `i > 0` draws its tier and
//! candidate-triple permutations from a ChaCha8 stream seeded by
//! `(seed, i)` alone, so adding candidates never changes earlier ones and
//! a larger population can only match or beat a smaller one.
//!
//! Candidates run in parallel with rayon and are collected in index order;
//! the selected schedule does not depend on thread scheduling.
//!
//! # Selection
//!
//! Lexicographic: fewest unplaced occurrences, then lowest utilization
//! variance, then lowest candidate index.

use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::Schedule;
use crate::problem::Problem;

use super::kpi::evaluate_fitness;
use super::placement::PlacementEngine;

/// Population search configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of candidates (K). Values below 1 are treated as 1.
    pub population_size: usize,
    /// Base seed.
    pub seed: u64,
    /// Evaluate candidates on the rayon pool.
    pub parallel: bool,
    /// Score weight per unplaced occurrence.
    pub conflict_weight: f64,
    /// Score weight of the utilization variance.
    pub utilization_weight: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            population_size: 12,
            seed: 42,
            parallel: true,
            conflict_weight: 1000.0,
            utilization_weight: 1.0,
        }
    }
}

impl SearchConfig {
    /// Sets the number of candidates.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the score weights.
    pub fn with_weights(mut self, conflict_weight: f64, utilization_weight: f64) -> Self {
        self.conflict_weight = conflict_weight;
        self.utilization_weight = utilization_weight;
        self
    }

    /// Effective population size.
    pub fn effective_size(&self) -> usize {
        self.population_size.max(1)
    }
}

/// Result of a population search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// The selected schedule, with fitness filled in.
    pub schedule: Schedule,
    /// Index of the selected candidate.
    pub selected: usize,
    /// Number of candidates evaluated.
    pub evaluated: usize,
}

/// Deterministic RNG for candidate `index` under `seed`.
pub fn candidate_rng(seed: u64, index: usize) -> ChaCha8Rng {
    let s = seed ^ (index as u64).rotate_left(17) ^ 0x9E37_79B1_85EB_CA87;
    ChaCha8Rng::seed_from_u64(s)
}

/// Runs K placement candidates and keeps the best.
#[derive(Debug, Clone)]
pub struct PopulationSearch<'p> {
    problem: &'p Problem,
    config: SearchConfig,
}

impl<'p> PopulationSearch<'p> {
    /// Creates a search over a compiled problem.
    pub fn new(problem: &'p Problem, config: SearchConfig) -> Self {
        Self { problem, config }
    }

    /// Builds and scores one candidate.
    pub fn run_candidate(&self, index: usize) -> Schedule {
        let engine = PlacementEngine::new(self.problem);
        let mut schedule = if index == 0 {
            engine.run_canonical()
        } else {
            engine.run_seeded(&mut candidate_rng(self.config.seed, index))
        };
        schedule.fitness = evaluate_fitness(
            &schedule,
            self.problem,
            self.config.conflict_weight,
            self.config.utilization_weight,
        );
        schedule
    }

    /// Evaluates every candidate and selects the best.
    pub fn run(&self) -> SearchOutcome {
        let k = self.config.effective_size();
        let mut candidates: Vec<Schedule> = if self.config.parallel {
            (0..k)
                .into_par_iter()
                .map(|i| self.run_candidate(i))
                .collect()
        } else {
            (0..k).map(|i| self.run_candidate(i)).collect()
        };

        let selected = select_best(&candidates);
        debug!(
            "population search: {} candidate(s), selected #{} (unplaced {}, variance {:.3})",
            k,
            selected,
            candidates[selected].fitness.unplaced,
            candidates[selected].fitness.utilization_variance
        );

        SearchOutcome {
            schedule: candidates.swap_remove(selected),
            selected,
            evaluated: k,
        }
    }
}

/// Index of the best-ranked schedule; ties go to the lowest index.
fn select_best(candidates: &[Schedule]) -> usize {
    let mut best = 0;
    for (i, c) in candidates.iter().enumerate().skip(1) {
        if c.fitness.cmp_rank(&candidates[best].fitness).is_lt() {
            best = i;
        }
    }
    best
}
