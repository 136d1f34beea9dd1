//! Timetable quality metrics (KPIs) and candidate fitness.
//!
//! Computes performance indicators from a completed schedule and the
//! compiled problem it was built for.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placement rate | placed / required occurrences |
//! | Batch utilization | occupied slots / grid size, per batch |
//! | Room utilization | occupied slots / grid size, per room |
//! | Avg room utilization | mean over all rooms |
//! | Utilization variance | population variance of occupied slots per (batch, day) |
//!
//! # Fitness
//!
//! A candidate is ranked by its unplaced count first and its utilization
//! variance second. A low variance means each batch's load is spread
//! evenly across the week.

use std::collections::HashMap;

use crate::models::{ConflictReason, Fitness, Schedule};
use crate::problem::Problem;

/// Timetable performance indicators.
#[derive(Debug, Clone)]
pub struct ScheduleKpi {
    /// Occurrences requested by the configuration.
    pub required: usize,
    /// Occurrences placed.
    pub placed: usize,
    /// Fraction of occurrences placed (0.0..1.0).
    pub placement_rate: f64,
    /// Per-batch utilization of the usable grid.
    pub utilization_by_batch: HashMap<String, f64>,
    /// Per-room utilization of the usable grid.
    pub utilization_by_room: HashMap<String, f64>,
    /// Average room utilization (0.0..1.0).
    pub avg_room_utilization: f64,
    /// Variance of occupied slots per (batch, day).
    pub utilization_variance: f64,
    /// Conflict counts per reason.
    pub conflicts_by_reason: HashMap<ConflictReason, usize>,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule and its problem.
    pub fn calculate(schedule: &Schedule, problem: &Problem) -> Self {
        let grid_size = problem.grid.size();
        let required = problem.occurrence_count();
        let placed = schedule.assignment_count();

        let mut batch_slots: HashMap<String, u64> = problem
            .batches
            .iter()
            .map(|b| (b.id.clone(), 0))
            .collect();
        let mut room_slots: HashMap<String, u64> =
            problem.rooms.iter().map(|r| (r.id.clone(), 0)).collect();
        for a in &schedule.assignments {
            let len = a.slots.len as u64;
            *batch_slots.entry(a.batch_id.clone()).or_default() += len;
            *room_slots.entry(a.room_id.clone()).or_default() += len;
        }

        let ratio = |used: u64| {
            if grid_size == 0 {
                0.0
            } else {
                used as f64 / grid_size as f64
            }
        };
        let utilization_by_batch: HashMap<String, f64> = batch_slots
            .into_iter()
            .map(|(id, used)| (id, ratio(used)))
            .collect();
        let utilization_by_room: HashMap<String, f64> = room_slots
            .into_iter()
            .map(|(id, used)| (id, ratio(used)))
            .collect();

        let avg_room_utilization = if utilization_by_room.is_empty() {
            0.0
        } else {
            let sum: f64 = utilization_by_room.values().sum();
            sum / utilization_by_room.len() as f64
        };

        let placement_rate = if required == 0 {
            1.0
        } else {
            placed as f64 / required as f64
        };

        let mut conflicts_by_reason = HashMap::new();
        for c in &schedule.conflicts {
            *conflicts_by_reason.entry(c.reason).or_insert(0) += 1;
        }

        Self {
            required,
            placed,
            placement_rate,
            utilization_by_batch,
            utilization_by_room,
            avg_room_utilization,
            utilization_variance: utilization_variance(schedule, problem),
            conflicts_by_reason,
        }
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_unplaced: usize, min_room_utilization: f64) -> bool {
        self.required.saturating_sub(self.placed) <= max_unplaced
            && self.avg_room_utilization >= min_room_utilization
    }
}

/// Occupied slots per (batch, day), batch-major.
pub fn day_loads(schedule: &Schedule, problem: &Problem) -> Vec<u32> {
    let days = problem.grid.days as usize;
    let index: HashMap<&str, usize> = problem
        .batches
        .iter()
        .enumerate()
        .map(|(i, b)| (b.id.as_str(), i))
        .collect();

    let mut loads = vec![0u32; problem.batches.len() * days];
    for a in &schedule.assignments {
        let Some(&b) = index.get(a.batch_id.as_str()) else {
            continue;
        };
        if let Some(cell) = loads.get_mut(b * days + a.day as usize) {
            *cell += a.slots.len;
        }
    }
    loads
}

/// Population variance of a sample. Zero for an empty sample.
pub fn variance(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n
}

/// Variance of occupied slots over every (batch, day) cell.
pub fn utilization_variance(schedule: &Schedule, problem: &Problem) -> f64 {
    variance(&day_loads(schedule, problem))
}

/// Scores a schedule for candidate ranking.
pub fn evaluate_fitness(
    schedule: &Schedule,
    problem: &Problem,
    conflict_weight: f64,
    utilization_weight: f64,
) -> Fitness {
    let unplaced = schedule.conflict_count();
    let utilization_variance = utilization_variance(schedule, problem);
    Fitness {
        unplaced,
        utilization_variance,
        score: unplaced as f64 * conflict_weight + utilization_variance * utilization_weight,
    }
}
