//! Compiled, index-based scheduling problem.
//!
//! Built once per invocation from a validated [`TimetableConfig`] and
//! shared read-only by every candidate run. Every entity list is sorted by
//! ascending identifier, so index order equals id order and search order is
//! reproducible.

use std::collections::HashMap;

use crate::models::{DailyLimits, Grid, PoolKind, RoomPools, SubjectKind, TimetableConfig};
use crate::validation::InvalidConfigError;

/// Compact room descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInfo {
    /// Room id.
    pub id: String,
    /// Resolved pool.
    pub pool: PoolKind,
}

/// Compact batch descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchInfo {
    /// Batch id.
    pub id: String,
    /// Index into [`Problem::years`].
    pub year: usize,
}

/// Compact subject descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectInfo {
    /// Subject id.
    pub id: String,
    /// Lecture or lab.
    pub kind: SubjectKind,
    /// Required weekly sessions.
    pub sessions: u32,
    /// Slots per session.
    pub duration: u32,
    /// Index into [`Problem::batches`].
    pub batch: usize,
    /// Index into [`Problem::faculties`].
    pub faculty: Option<usize>,
}

impl SubjectInfo {
    /// The pool this subject must draw rooms from.
    #[inline]
    pub fn pool(&self) -> PoolKind {
        PoolKind::for_subject(self.kind)
    }
}

/// One of a subject's weekly sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Occurrence {
    /// Index into [`Problem::subjects`].
    pub subject: usize,
    /// Session index within the week (0-based).
    pub index: u32,
}

/// Index-based view of a validated configuration.
#[derive(Debug, Clone)]
pub struct Problem {
    /// Day × slot grid (breaks normalized).
    pub grid: Grid,
    /// Per-day spreading limits.
    pub limits: DailyLimits,
    /// Rooms: classroom pool then lab pool, each ascending by id.
    pub rooms: Vec<RoomInfo>,
    /// Batches, ascending by id.
    pub batches: Vec<BatchInfo>,
    /// Year keys, ascending.
    pub years: Vec<String>,
    /// Faculty ids, ascending.
    pub faculties: Vec<String>,
    /// Subjects, ascending by id.
    pub subjects: Vec<SubjectInfo>,
    classroom_rooms: Vec<usize>,
    lab_rooms: Vec<usize>,
}

impl Problem {
    /// Builds the problem from a configuration.
    ///
    /// Assumes the configuration passed [`crate::validation::validate_config`];
    /// room tags are still resolved fallibly.
    pub(crate) fn build(config: &TimetableConfig) -> Result<Self, InvalidConfigError> {
        let pools = RoomPools::partition(&config.rooms)?;
        let grid = config.grid.clone().with_breaks(config.grid.breaks.iter().copied());

        let mut rooms = Vec::with_capacity(pools.len());
        let mut classroom_rooms = Vec::new();
        let mut lab_rooms = Vec::new();
        for kind in [PoolKind::Classroom, PoolKind::Lab] {
            for room in pools.pool(kind) {
                let idx = rooms.len();
                rooms.push(RoomInfo {
                    id: room.id.clone(),
                    pool: kind,
                });
                match kind {
                    PoolKind::Classroom => classroom_rooms.push(idx),
                    PoolKind::Lab => lab_rooms.push(idx),
                }
            }
        }

        let mut years: Vec<String> = config.batches.iter().map(|b| b.year.clone()).collect();
        years.sort();
        years.dedup();
        let year_index: HashMap<&str, usize> = years
            .iter()
            .enumerate()
            .map(|(i, y)| (y.as_str(), i))
            .collect();

        let mut sorted_batches: Vec<_> = config.batches.iter().collect();
        sorted_batches.sort_by(|a, b| a.id.cmp(&b.id));
        let batches: Vec<BatchInfo> = sorted_batches
            .iter()
            .map(|b| BatchInfo {
                id: b.id.clone(),
                year: year_index[b.year.as_str()],
            })
            .collect();
        let batch_index: HashMap<&str, usize> = batches
            .iter()
            .enumerate()
            .map(|(i, b)| (b.id.as_str(), i))
            .collect();

        let mut faculties: Vec<String> = config.faculties.iter().map(|f| f.id.clone()).collect();
        faculties.sort();
        let faculty_index: HashMap<&str, usize> = faculties
            .iter()
            .enumerate()
            .map(|(i, f)| (f.as_str(), i))
            .collect();

        let mut sorted_subjects: Vec<_> = config.subjects.iter().collect();
        sorted_subjects.sort_by(|a, b| a.id.cmp(&b.id));
        let subjects = sorted_subjects
            .iter()
            .filter_map(|s| {
                let batch = *batch_index.get(s.batch.as_str())?;
                Some(SubjectInfo {
                    id: s.id.clone(),
                    kind: s.kind,
                    sessions: s.sessions_per_week,
                    duration: s.duration,
                    batch,
                    faculty: s
                        .faculty
                        .as_deref()
                        .and_then(|f| faculty_index.get(f).copied()),
                })
            })
            .collect();

        Ok(Self {
            grid,
            limits: config.limits.clone(),
            rooms,
            batches,
            years,
            faculties,
            subjects,
            classroom_rooms,
            lab_rooms,
        })
    }

    /// Room indices of one pool, ascending by id.
    pub fn pool_rooms(&self, kind: PoolKind) -> &[usize] {
        match kind {
            PoolKind::Classroom => &self.classroom_rooms,
            PoolKind::Lab => &self.lab_rooms,
        }
    }

    /// All occurrences of one tier, ordered by (batch id, subject id, index).
    pub fn occurrences_of(&self, kind: SubjectKind) -> Vec<Occurrence> {
        let mut subject_order: Vec<usize> = (0..self.subjects.len())
            .filter(|&s| self.subjects[s].kind == kind)
            .collect();
        // Subjects are already id-sorted; a stable sort by batch keeps that.
        subject_order.sort_by_key(|&s| self.subjects[s].batch);

        subject_order
            .into_iter()
            .flat_map(|s| (0..self.subjects[s].sessions).map(move |index| Occurrence { subject: s, index }))
            .collect()
    }

    /// Total requested occurrences.
    pub fn occurrence_count(&self) -> usize {
        self.subjects.iter().map(|s| s.sessions as usize).sum()
    }

    /// Batch indices belonging to one year.
    pub fn batches_in_year(&self, year: usize) -> impl Iterator<Item = usize> + '_ {
        self.batches
            .iter()
            .enumerate()
            .filter(move |(_, b)| b.year == year)
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Batch, Faculty, Room, Subject};
    use crate::validation::compile;

    fn sample_config() -> TimetableConfig {
        TimetableConfig::new(Grid::new(5, 7).with_breaks([4, 2]))
            .with_room(Room::lab("L2"))
            .with_room(Room::classroom("C2"))
            .with_room(Room::lab("L1"))
            .with_room(Room::classroom("C1"))
            .with_faculty(Faculty::new("F2"))
            .with_faculty(Faculty::new("F1"))
            .with_batch(Batch::new("TY-B1", "TY"))
            .with_batch(Batch::new("SY-B2", "SY"))
            .with_batch(Batch::new("SY-B1", "SY"))
            .with_subject(Subject::lecture("OS", "TY-B1").with_sessions(2).with_faculty("F2"))
            .with_subject(Subject::lecture("DS", "SY-B1").with_sessions(2))
            .with_subject(Subject::lab("DSL", "SY-B1").with_faculty("F1"))
            .with_subject(Subject::lecture("CN", "SY-B2"))
    }

    #[test]
    fn test_build_sorted_indices() {
        let p = compile(&sample_config()).unwrap();
        let room_ids: Vec<&str> = p.rooms.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(room_ids, vec!["C1", "C2", "L1", "L2"]);
        assert_eq!(p.pool_rooms(PoolKind::Classroom), &[0, 1]);
        assert_eq!(p.pool_rooms(PoolKind::Lab), &[2, 3]);

        let batch_ids: Vec<&str> = p.batches.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(batch_ids, vec!["SY-B1", "SY-B2", "TY-B1"]);
        assert_eq!(p.years, vec!["SY", "TY"]);
        assert_eq!(p.batches[1].year, 0);
        assert_eq!(p.batches[2].year, 1);
        assert_eq!(p.faculties, vec!["F1", "F2"]);
        assert_eq!(p.grid.breaks, vec![2, 4]);
    }

    #[test]
    fn test_subject_references() {
        let p = compile(&sample_config()).unwrap();
        let dsl = p.subjects.iter().find(|s| s.id == "DSL").unwrap();
        assert_eq!(dsl.batch, 0);
        assert_eq!(dsl.faculty, Some(0));
        assert_eq!(dsl.pool(), PoolKind::Lab);
        let os = p.subjects.iter().find(|s| s.id == "OS").unwrap();
        assert_eq!(os.faculty, Some(1));
    }

    #[test]
    fn test_occurrence_order() {
        let p = compile(&sample_config()).unwrap();
        let lectures: Vec<(&str, u32)> = p
            .occurrences_of(SubjectKind::Lecture)
            .iter()
            .map(|o| (p.subjects[o.subject].id.as_str(), o.index))
            .collect();
        // (batch id, subject id, occurrence index)
        assert_eq!(
            lectures,
            vec![("DS", 0), ("DS", 1), ("CN", 0), ("OS", 0), ("OS", 1)]
        );
        assert_eq!(p.occurrences_of(SubjectKind::Lab).len(), 1);
        assert_eq!(p.occurrence_count(), 6);
    }

    #[test]
    fn test_batches_in_year() {
        let p = compile(&sample_config()).unwrap();
        assert_eq!(p.batches_in_year(0).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(p.batches_in_year(1).collect::<Vec<_>>(), vec![2]);
    }
}
