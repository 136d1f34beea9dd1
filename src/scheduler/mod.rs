//! Placement, population search and KPI evaluation.
//!
//! # Algorithm
//!
//! `PlacementEngine` is a tiered greedy: labs first, then lectures, each
//! occurrence taking the first (day, window, room) triple the occupancy
//! maps accept. It is not optimal, but one run is fast and never violates
//! a hard constraint.
//!
//! `PopulationSearch` runs K such candidates (one canonical, the rest with
//! seeded permutations) in parallel and keeps the best by fitness.
//! `TimetableSolver` wraps validation, the capacity check and the search.
//!
//! # KPI
//!
//! `ScheduleKpi` computes placement rate, batch and room utilization, and
//! the per-day load variance that drives candidate ranking.
//!
//! # References
//!
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"
//! - Schaerf (1999), "A Survey of Automated Timetabling"

mod conflict;
#[cfg(test)]
mod fixtures;
mod kpi;
mod placement;
mod population;
mod solver;

pub use conflict::ConflictReporter;
pub use kpi::{day_loads, evaluate_fitness, utilization_variance, variance, ScheduleKpi};
pub use placement::PlacementEngine;
pub use population::{candidate_rng, PopulationSearch, SearchConfig, SearchOutcome};
pub use solver::{generate_timetable, TimetableSolution, TimetableSolver};
