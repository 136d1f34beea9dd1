//! Per-run occupancy tracking.
//!
//! An [`OccupancyState`] records who holds every (day, slot) cell for each
//! batch, year group, room, lab room and faculty. It is owned by exactly one
//! candidate run and never shared: parallel candidates each build their own.
//!
//! Queries cover a whole [`SlotRange`]; a multi-slot session is free only if
//! every slot is free. [`OccupancyState::reserve`] validates the full range
//! against every map before writing anything, so a failed reservation
//! leaves the state untouched.

use std::fmt;

use crate::models::{ConflictReason, Grid, PoolKind, SlotRange, SubjectKind};
use crate::problem::{Occurrence, Problem};

/// A proposed placement of one occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    /// The occurrence being placed.
    pub occurrence: Occurrence,
    /// Owning batch index.
    pub batch: usize,
    /// Subject kind (labs also check lab occupancy).
    pub kind: SubjectKind,
    /// Teaching faculty index.
    pub faculty: Option<usize>,
    /// Day index.
    pub day: u32,
    /// Occupied slots.
    pub range: SlotRange,
    /// Room index.
    pub room: usize,
}

impl Reservation {
    /// Builds a reservation for an occurrence at (day, range, room).
    pub fn new(problem: &Problem, occurrence: Occurrence, day: u32, range: SlotRange, room: usize) -> Self {
        let subject = &problem.subjects[occurrence.subject];
        Self {
            occurrence,
            batch: subject.batch,
            kind: subject.kind,
            faculty: subject.faculty,
            day,
            range,
            room,
        }
    }
}

/// Why a reservation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocked {
    /// The range leaves the day or covers a break.
    OutsideGrid,
    /// The room's pool doesn't match the subject kind.
    WrongPool,
    /// The batch is busy at `slot`.
    Batch { slot: u32 },
    /// Another batch of the same year (`other`) is busy at `slot`.
    Year { slot: u32, other: usize },
    /// The room is booked at `slot`.
    Room { slot: u32, holder: Occurrence },
    /// The lab room is booked by lab subject `subject` at `slot`.
    Lab { slot: u32, subject: usize },
    /// The faculty is teaching at `slot`.
    Faculty { slot: u32 },
    /// The subject already has its daily maximum of sessions.
    SubjectDailyLimit,
    /// The batch already has its daily maximum of labs.
    BatchLabDailyLimit,
}

impl Blocked {
    /// Conflict reason reported when this blocker is the last near-miss.
    pub fn reason(&self) -> ConflictReason {
        match self {
            Self::OutsideGrid => ConflictReason::CapacityShortfall,
            Self::WrongPool => ConflictReason::PoolMismatch,
            Self::Batch { .. } | Self::Year { .. } => ConflictReason::BatchOverlap,
            Self::Room { .. } => ConflictReason::RoomDoubleBooking,
            Self::Lab { .. } => ConflictReason::LabDoubleBooking,
            Self::Faculty { .. } => ConflictReason::FacultyOverlap,
            Self::SubjectDailyLimit | Self::BatchLabDailyLimit => ConflictReason::DailyLimit,
        }
    }
}

impl fmt::Display for Blocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutsideGrid => write!(f, "range outside usable grid"),
            Self::WrongPool => write!(f, "room pool mismatch"),
            Self::Batch { slot } => write!(f, "batch busy at slot {slot}"),
            Self::Year { slot, .. } => write!(f, "year group busy at slot {slot}"),
            Self::Room { slot, .. } => write!(f, "room booked at slot {slot}"),
            Self::Lab { slot, .. } => write!(f, "lab booked at slot {slot}"),
            Self::Faculty { slot } => write!(f, "faculty busy at slot {slot}"),
            Self::SubjectDailyLimit => write!(f, "subject daily limit reached"),
            Self::BatchLabDailyLimit => write!(f, "batch daily lab limit reached"),
        }
    }
}

/// Occupancy maps for one candidate run.
#[derive(Debug, Clone)]
pub struct OccupancyState {
    grid: Grid,
    batch_year: Vec<usize>,
    room_pool: Vec<PoolKind>,
    max_daily_per_subject: Option<u32>,
    max_daily_labs_per_batch: Option<u32>,
    /// batch → cell → room
    batch: Vec<Vec<Option<usize>>>,
    /// year → cell → batch
    year: Vec<Vec<Option<usize>>>,
    /// room → cell → occurrence
    room: Vec<Vec<Option<Occurrence>>>,
    /// lab room → cell → subject
    lab: Vec<Vec<Option<usize>>>,
    /// faculty → cell → occurrence
    faculty: Vec<Vec<Option<Occurrence>>>,
    /// subject → day → sessions placed
    subject_daily: Vec<Vec<u32>>,
    /// batch → day → labs placed
    batch_daily_labs: Vec<Vec<u32>>,
}

impl OccupancyState {
    /// Creates an empty state sized for a problem.
    pub fn new(problem: &Problem) -> Self {
        let grid = problem.grid.clone();
        let cells = grid.cell_count();
        let days = grid.days as usize;
        Self {
            batch_year: problem.batches.iter().map(|b| b.year).collect(),
            room_pool: problem.rooms.iter().map(|r| r.pool).collect(),
            max_daily_per_subject: problem.limits.max_sessions_per_subject,
            max_daily_labs_per_batch: problem.limits.max_labs_per_batch,
            batch: vec![vec![None; cells]; problem.batches.len()],
            year: vec![vec![None; cells]; problem.years.len()],
            room: vec![vec![None; cells]; problem.rooms.len()],
            lab: vec![vec![None; cells]; problem.rooms.len()],
            faculty: vec![vec![None; cells]; problem.faculties.len()],
            subject_daily: vec![vec![0; days]; problem.subjects.len()],
            batch_daily_labs: vec![vec![0; days]; problem.batches.len()],
            grid,
        }
    }

    fn cells(&self, day: u32, range: SlotRange) -> impl Iterator<Item = (u32, usize)> + '_ {
        range.slots().map(move |s| (s, self.grid.cell(day, s)))
    }

    /// Whether the range lies on a real day and avoids breaks and day ends.
    fn in_grid(&self, day: u32, range: SlotRange) -> bool {
        day < self.grid.days && self.grid.is_usable(range)
    }

    /// Whether the batch and its year group are free over the range.
    ///
    /// A range outside the usable grid is never free.
    pub fn is_batch_free(&self, batch: usize, day: u32, range: SlotRange) -> bool {
        self.in_grid(day, range) && self.batch_blocker(batch, day, range).is_none()
    }

    /// Whether the room is free over the range.
    pub fn is_room_free(&self, room: usize, day: u32, range: SlotRange) -> bool {
        self.in_grid(day, range) && self.room_blocker(room, day, range).is_none()
    }

    /// Whether no lab subject holds the lab room over the range.
    pub fn is_lab_free(&self, room: usize, day: u32, range: SlotRange) -> bool {
        self.in_grid(day, range) && self.lab_blocker(room, day, range).is_none()
    }

    /// Whether the faculty is free over the range.
    pub fn is_faculty_free(&self, faculty: usize, day: u32, range: SlotRange) -> bool {
        self.in_grid(day, range) && self.faculty_blocker(faculty, day, range).is_none()
    }

    fn batch_blocker(&self, batch: usize, day: u32, range: SlotRange) -> Option<Blocked> {
        let year = self.batch_year[batch];
        for (slot, c) in self.cells(day, range) {
            if self.batch[batch][c].is_some() {
                return Some(Blocked::Batch { slot });
            }
            if let Some(other) = self.year[year][c] {
                return Some(Blocked::Year { slot, other });
            }
        }
        None
    }

    fn room_blocker(&self, room: usize, day: u32, range: SlotRange) -> Option<Blocked> {
        self.cells(day, range).find_map(|(slot, c)| {
            self.room[room][c].map(|holder| Blocked::Room { slot, holder })
        })
    }

    fn lab_blocker(&self, room: usize, day: u32, range: SlotRange) -> Option<Blocked> {
        self.cells(day, range).find_map(|(slot, c)| {
            self.lab[room][c].map(|subject| Blocked::Lab { slot, subject })
        })
    }

    fn faculty_blocker(&self, faculty: usize, day: u32, range: SlotRange) -> Option<Blocked> {
        self.cells(day, range)
            .find(|&(_, c)| self.faculty[faculty][c].is_some())
            .map(|(slot, _)| Blocked::Faculty { slot })
    }

    /// Runs every applicable check and reports the first blocker.
    pub fn check(&self, r: &Reservation) -> Result<(), Blocked> {
        if !self.in_grid(r.day, r.range) {
            return Err(Blocked::OutsideGrid);
        }
        if self.room_pool[r.room] != PoolKind::for_subject(r.kind) {
            return Err(Blocked::WrongPool);
        }
        if let Some(b) = self.batch_blocker(r.batch, r.day, r.range) {
            return Err(b);
        }
        if r.kind == SubjectKind::Lab {
            if let Some(b) = self.lab_blocker(r.room, r.day, r.range) {
                return Err(b);
            }
        }
        if let Some(b) = self.room_blocker(r.room, r.day, r.range) {
            return Err(b);
        }
        if let Some(faculty) = r.faculty {
            if let Some(b) = self.faculty_blocker(faculty, r.day, r.range) {
                return Err(b);
            }
        }
        let day = r.day as usize;
        if let Some(max) = self.max_daily_per_subject {
            if self.subject_daily[r.occurrence.subject][day] >= max {
                return Err(Blocked::SubjectDailyLimit);
            }
        }
        if r.kind == SubjectKind::Lab {
            if let Some(max) = self.max_daily_labs_per_batch {
                if self.batch_daily_labs[r.batch][day] >= max {
                    return Err(Blocked::BatchLabDailyLimit);
                }
            }
        }
        Ok(())
    }

    /// Reserves the whole range in every relevant map, or nothing.
    pub fn reserve(&mut self, r: &Reservation) -> Result<(), Blocked> {
        self.check(r)?;

        let year = self.batch_year[r.batch];
        for slot in r.range.slots() {
            let c = self.grid.cell(r.day, slot);
            self.batch[r.batch][c] = Some(r.room);
            self.year[year][c] = Some(r.batch);
            self.room[r.room][c] = Some(r.occurrence);
            if r.kind == SubjectKind::Lab {
                self.lab[r.room][c] = Some(r.occurrence.subject);
            }
            if let Some(faculty) = r.faculty {
                self.faculty[faculty][c] = Some(r.occurrence);
            }
        }
        self.subject_daily[r.occurrence.subject][r.day as usize] += 1;
        if r.kind == SubjectKind::Lab {
            self.batch_daily_labs[r.batch][r.day as usize] += 1;
        }
        Ok(())
    }

    fn cell_at(&self, day: u32, slot: u32) -> Option<usize> {
        (day < self.grid.days && slot < self.grid.slots_per_day).then(|| self.grid.cell(day, slot))
    }

    /// Room held by the batch at (day, slot), if any.
    pub fn batch_room_at(&self, batch: usize, day: u32, slot: u32) -> Option<usize> {
        self.batch[batch][self.cell_at(day, slot)?]
    }

    /// Occurrence holding the room at (day, slot), if any.
    pub fn room_holder_at(&self, room: usize, day: u32, slot: u32) -> Option<Occurrence> {
        self.room[room][self.cell_at(day, slot)?]
    }

    /// Occupied cells of a batch on one day.
    pub fn batch_day_load(&self, batch: usize, day: u32) -> u32 {
        if day >= self.grid.days {
            return 0;
        }
        (0..self.grid.slots_per_day)
            .filter(|&s| self.batch[batch][self.grid.cell(day, s)].is_some())
            .count() as u32
    }
}
