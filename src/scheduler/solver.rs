//! End-to-end timetable generation.
//!
//! validate → capacity check → population search → solution.

use log::info;
use serde::{Deserialize, Serialize};

use crate::capacity::{check_capacity, CapacityWarning};
use crate::models::{Schedule, TimetableConfig};
use crate::validation::{compile, InvalidConfigError};

use super::population::{PopulationSearch, SearchConfig};

/// Output of one solver invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableSolution {
    /// The best schedule found (possibly partial).
    pub schedule: Schedule,
    /// Pre-flight capacity warnings.
    pub capacity_warnings: Vec<CapacityWarning>,
    /// Number of candidates evaluated.
    pub candidates_evaluated: usize,
    /// Index of the candidate that won.
    pub selected_candidate: usize,
    /// Base seed used.
    pub seed: u64,
}

impl TimetableSolution {
    /// Whether every requested occurrence was placed.
    pub fn is_complete(&self) -> bool {
        self.schedule.is_complete()
    }
}

/// Timetable solver facade.
///
/// # Example
///
/// ```
/// use timetable_core::models::{Batch, Grid, Room, Subject, TimetableConfig};
/// use timetable_core::scheduler::{SearchConfig, TimetableSolver};
///
/// let config = TimetableConfig::new(Grid::new(5, 6))
///     .with_room(Room::classroom("C1"))
///     .with_room(Room::lab("L1"))
///     .with_batch(Batch::new("SY-B1", "SY"))
///     .with_subject(Subject::lecture("DS", "SY-B1").with_sessions(3))
///     .with_subject(Subject::lab("DSL", "SY-B1"));
///
/// let solver = TimetableSolver::new(SearchConfig::default().with_population_size(4));
/// let solution = solver.solve(&config).unwrap();
/// assert!(solution.is_complete());
/// assert_eq!(solution.schedule.assignment_count(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableSolver {
    config: SearchConfig,
}

impl TimetableSolver {
    /// Creates a solver.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Search configuration in use.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Generates a timetable.
    ///
    /// Fails only on an invalid configuration; otherwise always returns a
    /// schedule, with a conflict record for every unplaced occurrence.
    pub fn solve(&self, config: &TimetableConfig) -> Result<TimetableSolution, InvalidConfigError> {
        let problem = compile(config)?;
        let capacity_warnings = check_capacity(&problem);

        let outcome = PopulationSearch::new(&problem, self.config.clone()).run();
        info!(
            "timetable generated: {}/{} occurrence(s) placed, {} conflict(s), candidate {} of {}",
            outcome.schedule.assignment_count(),
            problem.occurrence_count(),
            outcome.schedule.conflict_count(),
            outcome.selected,
            outcome.evaluated
        );

        Ok(TimetableSolution {
            schedule: outcome.schedule,
            capacity_warnings,
            candidates_evaluated: outcome.evaluated,
            selected_candidate: outcome.selected,
            seed: self.config.seed,
        })
    }

    /// Parses a JSON configuration payload and solves it.
    pub fn solve_json(&self, json: &str) -> Result<TimetableSolution, InvalidConfigError> {
        self.solve(&TimetableConfig::from_json(json)?)
    }
}

/// Generates a timetable with the default search configuration.
pub fn generate_timetable(config: &TimetableConfig) -> Result<TimetableSolution, InvalidConfigError> {
    TimetableSolver::default().solve(config)
}
