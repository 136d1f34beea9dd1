//! Tiered greedy placement.
//!
//! # Algorithm
//!
//! 1. Tier order is fixed: every Lab occurrence, then every Lecture occurrence.
//! 2. Within a tier, occurrences are ordered by (batch id, subject id,
//!    occurrence index). A seeded run shuffles each tier independently.
//! 3. For each occurrence, candidate (day, window, room) triples are
//!    enumerated by ascending day, then window start, then room id within
//!    the matching pool. A seeded run visits them in a random permutation.
//! 4. The first triple the [`OccupancyState`] accepts is reserved atomically.
//!    If none is accepted the occurrence is reported with the last near-miss.
//!
//! No backtracking: an earlier placement is never revisited.
//!
//! # Complexity
//! O(n · d · w · r) where n=occurrences, d=days, w=windows per day,
//! r=rooms in the pool, times the session duration per check.

use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::models::{Assignment, ConflictReason, Schedule, SlotRange, SubjectKind};
use crate::occupancy::{Blocked, OccupancyState, Reservation};
use crate::problem::{Occurrence, Problem};

use super::conflict::ConflictReporter;

/// Builds one candidate schedule from a compiled problem.
///
/// # Example
///
/// ```
/// use timetable_core::models::{Batch, Grid, Room, Subject, TimetableConfig};
/// use timetable_core::scheduler::PlacementEngine;
/// use timetable_core::validation::compile;
///
/// let config = TimetableConfig::new(Grid::new(5, 6))
///     .with_room(Room::classroom("C1"))
///     .with_batch(Batch::new("SY-B1", "SY"))
///     .with_subject(Subject::lecture("DS", "SY-B1").with_sessions(3));
/// let problem = compile(&config).unwrap();
///
/// let schedule = PlacementEngine::new(&problem).run_canonical();
/// assert_eq!(schedule.assignment_count(), 3);
/// assert!(schedule.is_complete());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PlacementEngine<'p> {
    problem: &'p Problem,
}

impl<'p> PlacementEngine<'p> {
    /// Creates an engine over a compiled problem.
    pub fn new(problem: &'p Problem) -> Self {
        Self { problem }
    }

    /// Runs with the canonical (unpermuted) orders.
    pub fn run_canonical(&self) -> Schedule {
        self.run::<ChaCha8Rng>(None)
    }

    /// Runs with tier and candidate orders drawn from `rng`.
    pub fn run_seeded<R: Rng>(&self, rng: &mut R) -> Schedule {
        self.run(Some(rng))
    }

    fn run<R: Rng>(&self, mut rng: Option<&mut R>) -> Schedule {
        let mut state = OccupancyState::new(self.problem);
        let mut reporter = ConflictReporter::new();
        let mut schedule = Schedule::new();

        for kind in [SubjectKind::Lab, SubjectKind::Lecture] {
            let mut tier = self.problem.occurrences_of(kind);
            if let Some(rng) = rng.as_deref_mut() {
                tier.shuffle(rng);
            }
            for occurrence in tier {
                self.place(
                    occurrence,
                    &mut state,
                    &mut schedule,
                    &mut reporter,
                    rng.as_deref_mut(),
                );
            }
        }

        debug!(
            "placement run finished: {} placed, {} unplaced",
            schedule.assignment_count(),
            reporter.len()
        );
        schedule.conflicts = reporter.into_records();
        schedule
    }

    fn place<R: Rng>(
        &self,
        occurrence: Occurrence,
        state: &mut OccupancyState,
        schedule: &mut Schedule,
        reporter: &mut ConflictReporter,
        rng: Option<&mut R>,
    ) {
        let problem = self.problem;
        let subject = &problem.subjects[occurrence.subject];
        let batch_id = &problem.batches[subject.batch].id;

        let pool = problem.pool_rooms(subject.pool());
        if pool.is_empty() {
            reporter.record(
                &subject.id,
                batch_id,
                occurrence.index,
                ConflictReason::PoolMismatch,
                format!("no {} rooms configured", subject.pool()),
            );
            return;
        }

        let windows = problem.grid.windows(subject.duration);
        if windows.is_empty() {
            reporter.record(
                &subject.id,
                batch_id,
                occurrence.index,
                ConflictReason::CapacityShortfall,
                format!(
                    "session of {} slot(s) exceeds the longest usable run of {} slot(s)",
                    subject.duration,
                    problem.grid.longest_run()
                ),
            );
            return;
        }

        let mut candidates = self.candidates(&windows, pool);
        if let Some(rng) = rng {
            candidates.shuffle(rng);
        }

        let mut near_miss: Option<(Reservation, Blocked)> = None;
        for (day, range, room) in candidates {
            let reservation = Reservation::new(problem, occurrence, day, range, room);
            match state.reserve(&reservation) {
                Ok(()) => {
                    trace!(
                        "placed {} #{} for {} on day {} slots {}..{} in {}",
                        subject.id,
                        occurrence.index,
                        batch_id,
                        day,
                        range.start,
                        range.end(),
                        problem.rooms[room].id
                    );
                    schedule.add_assignment(Assignment {
                        subject_id: subject.id.clone(),
                        batch_id: batch_id.clone(),
                        occurrence: occurrence.index,
                        day,
                        slots: range,
                        room_id: problem.rooms[room].id.clone(),
                        faculty_id: subject.faculty.map(|f| problem.faculties[f].clone()),
                    });
                    return;
                }
                Err(blocked) => near_miss = Some((reservation, blocked)),
            }
        }

        let context = match near_miss {
            Some((r, blocked)) => self.describe(&r, blocked),
            None => "no candidate slot".to_string(),
        };
        debug!("unplaced {} #{} for {}: {}", subject.id, occurrence.index, batch_id, context);
        reporter.record(
            &subject.id,
            batch_id,
            occurrence.index,
            ConflictReason::NoFreeSlot,
            context,
        );
    }

    /// Every (day, window, room) triple in canonical order.
    fn candidates(&self, windows: &[SlotRange], pool: &[usize]) -> Vec<(u32, SlotRange, usize)> {
        let days = self.problem.grid.days;
        let mut out = Vec::with_capacity(days as usize * windows.len() * pool.len());
        for day in 0..days {
            for &window in windows {
                for &room in pool {
                    out.push((day, window, room));
                }
            }
        }
        out
    }

    /// Human-readable context for the last rejected triple.
    fn describe(&self, r: &Reservation, blocked: Blocked) -> String {
        let p = self.problem;
        let detail = match blocked {
            Blocked::Year { slot, other } => {
                format!("same-year batch {} busy at slot {slot}", p.batches[other].id)
            }
            Blocked::Room { slot, holder } => format!(
                "room held by {} #{} at slot {slot}",
                p.subjects[holder.subject].id, holder.index
            ),
            Blocked::Lab { slot, subject } => {
                format!("lab held by {} at slot {slot}", p.subjects[subject].id)
            }
            other => other.to_string(),
        };
        format!(
            "last near-miss: batch {}, day {}, slots {}..{}, room {} ({}: {})",
            p.batches[r.batch].id,
            r.day,
            r.range.start,
            r.range.end(),
            p.rooms[r.room].id,
            blocked.reason(),
            detail
        )
    }
}
