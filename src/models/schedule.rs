//! Schedule (solution) model.
//!
//! A schedule is the output of one candidate run: the placed assignments,
//! a conflict record for every occurrence that could not be placed, and
//! the candidate's fitness.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Grid, SlotRange};

/// One placed occurrence: subject × batch → day, slot range, room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Subject id.
    pub subject_id: String,
    /// Owning batch id (denormalized for query convenience).
    pub batch_id: String,
    /// Occurrence index within the subject's weekly sessions (0-based).
    pub occurrence: u32,
    /// Day index.
    pub day: u32,
    /// Occupied slots.
    pub slots: SlotRange,
    /// Assigned room id.
    pub room_id: String,
    /// Teaching faculty id, if any.
    pub faculty_id: Option<String>,
}

/// Why an occurrence could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConflictReason {
    /// No room in the pool matching the subject's kind.
    PoolMismatch,
    /// The batch (or its year group) was busy.
    BatchOverlap,
    /// The room was already booked.
    RoomDoubleBooking,
    /// The lab room was already booked by another lab subject.
    LabDoubleBooking,
    /// The faculty was already teaching.
    FacultyOverlap,
    /// A per-day spreading limit was reached.
    DailyLimit,
    /// The session can never fit the grid.
    CapacityShortfall,
    /// Every candidate (day, slot, room) was blocked.
    NoFreeSlot,
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::PoolMismatch => "pool mismatch",
            Self::BatchOverlap => "batch overlap",
            Self::RoomDoubleBooking => "room double-booking",
            Self::LabDoubleBooking => "lab double-booking",
            Self::FacultyOverlap => "faculty overlap",
            Self::DailyLimit => "daily limit reached",
            Self::CapacityShortfall => "capacity shortfall",
            Self::NoFreeSlot => "no free slot/room",
        };
        f.write_str(s)
    }
}

/// A structured record of an occurrence left unplaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRecord {
    /// Subject id.
    pub subject_id: String,
    /// Batch id.
    pub batch_id: String,
    /// Occurrence index that could not be placed.
    pub occurrence: u32,
    /// Reason code.
    pub reason: ConflictReason,
    /// Human-readable context (e.g. the last near-miss).
    pub context: String,
}

impl fmt::Display for ConflictRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} #{} (batch {}): {}",
            self.reason, self.subject_id, self.occurrence, self.batch_id, self.context
        )
    }
}

/// Ranking score of a candidate schedule. Lower is better.
///
/// Unplaced occurrences always dominate utilization variance; `score`
/// folds both into one number for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Fitness {
    /// Occurrences left unplaced.
    pub unplaced: usize,
    /// Variance of occupied slots over (batch, day) cells.
    pub utilization_variance: f64,
    /// Weighted combination of the two terms.
    pub score: f64,
}

impl Fitness {
    /// Lexicographic comparison: unplaced first, then variance.
    pub fn cmp_rank(&self, other: &Self) -> std::cmp::Ordering {
        self.unplaced
            .cmp(&other.unplaced)
            .then_with(|| self.utilization_variance.total_cmp(&other.utilization_variance))
    }
}

/// A complete candidate timetable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Placed occurrences.
    pub assignments: Vec<Assignment>,
    /// Occurrences that could not be placed.
    pub conflicts: Vec<ConflictRecord>,
    /// Candidate fitness.
    pub fitness: Fitness,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Adds a conflict record.
    pub fn add_conflict(&mut self, conflict: ConflictRecord) {
        self.conflicts.push(conflict);
    }

    /// Whether every occurrence was placed.
    pub fn is_complete(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Number of conflict records.
    pub fn conflict_count(&self) -> usize {
        self.conflicts.len()
    }

    /// Assignments of one batch.
    pub fn assignments_for_batch(&self, batch_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.batch_id == batch_id)
            .collect()
    }

    /// Assignments in one room.
    pub fn assignments_for_room(&self, room_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.room_id == room_id)
            .collect()
    }

    /// Assignments of one subject.
    pub fn assignments_for_subject(&self, subject_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.subject_id == subject_id)
            .collect()
    }

    /// Placed occurrences of one subject.
    pub fn placed_count(&self, subject_id: &str) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.subject_id == subject_id)
            .count()
    }

    /// Conflicts of one subject.
    pub fn conflicts_for_subject(&self, subject_id: &str) -> Vec<&ConflictRecord> {
        self.conflicts
            .iter()
            .filter(|c| c.subject_id == subject_id)
            .collect()
    }

    /// Day × slot view of one batch: `grid[day][slot]` holds the assignment
    /// covering that cell, if any.
    pub fn batch_grid<'a>(&'a self, batch_id: &str, grid: &Grid) -> Vec<Vec<Option<&'a Assignment>>> {
        let mut cells = vec![vec![None; grid.slots_per_day as usize]; grid.days as usize];
        for a in self.assignments_for_batch(batch_id) {
            let Some(row) = cells.get_mut(a.day as usize) else {
                continue;
            };
            for slot in a.slots.slots() {
                if let Some(cell) = row.get_mut(slot as usize) {
                    *cell = Some(a);
                }
            }
        }
        cells
    }
}
