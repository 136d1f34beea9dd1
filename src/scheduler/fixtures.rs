//! Shared configurations and invariant checks for scheduler tests.

use std::collections::{HashMap, HashSet};

use crate::models::{
    Batch, DailyLimits, Faculty, Grid, PoolKind, Room, Schedule, Subject, SubjectKind,
    TimetableConfig,
};
use crate::problem::Problem;

/// One batch, three single-slot lectures, two classrooms.
pub fn three_lectures() -> TimetableConfig {
    TimetableConfig::new(Grid::new(5, 6))
        .with_room(Room::classroom("C1"))
        .with_room(Room::classroom("C2"))
        .with_batch(Batch::new("B1", "SY"))
        .with_subject(Subject::lecture("CN", "B1"))
        .with_subject(Subject::lecture("DS", "B1"))
        .with_subject(Subject::lecture("OS", "B1"))
}

/// Five two-slot labs, one per batch, each batch in its own year; two lab rooms.
pub fn five_labs(grid: Grid) -> TimetableConfig {
    let mut cfg = TimetableConfig::new(grid)
        .with_room(Room::lab("L1"))
        .with_room(Room::lab("L2"));
    for i in 1..=5 {
        cfg = cfg
            .with_batch(Batch::new(format!("B{i}"), format!("Y{i}")))
            .with_subject(Subject::lab(format!("LAB{i}"), format!("B{i}")));
    }
    cfg
}

/// A realistic department: shared year groups, faculties, breaks and limits.
pub fn department() -> TimetableConfig {
    TimetableConfig::new(Grid::new(5, 7).with_breaks([2, 4]))
        .with_room(Room::classroom("C101"))
        .with_room(Room::classroom("C102"))
        .with_room(Room::lab("L201"))
        .with_room(Room::lab("L202"))
        .with_faculty(Faculty::new("F-ADA"))
        .with_faculty(Faculty::new("F-BOB"))
        .with_faculty(Faculty::new("F-CY"))
        .with_batch(Batch::new("SY-B1", "SY"))
        .with_batch(Batch::new("SY-B2", "SY"))
        .with_batch(Batch::new("TY-B1", "TY"))
        .with_subject(Subject::lecture("DS", "SY-B1").with_sessions(3).with_faculty("F-ADA"))
        .with_subject(Subject::lecture("DM", "SY-B1").with_sessions(2).with_faculty("F-BOB"))
        .with_subject(Subject::lab("DSL", "SY-B1").with_faculty("F-ADA"))
        .with_subject(Subject::lecture("OOP", "SY-B2").with_sessions(3).with_faculty("F-ADA"))
        .with_subject(Subject::lab("OOPL", "SY-B2").with_sessions(2).with_faculty("F-CY"))
        .with_subject(Subject::lecture("OS", "TY-B1").with_sessions(3).with_faculty("F-BOB"))
        .with_subject(Subject::lecture("CN", "TY-B1").with_sessions(2).with_faculty("F-CY"))
        .with_subject(Subject::lab("OSL", "TY-B1").with_faculty("F-CY"))
        .with_limits(
            DailyLimits::none()
                .with_max_sessions_per_subject(1)
                .with_max_labs_per_batch(1),
        )
}

/// Panics if the schedule breaks any placement invariant.
pub fn assert_invariants(schedule: &Schedule, problem: &Problem) {
    let subjects: HashMap<&str, _> = problem.subjects.iter().map(|s| (s.id.as_str(), s)).collect();
    let rooms: HashMap<&str, PoolKind> =
        problem.rooms.iter().map(|r| (r.id.as_str(), r.pool)).collect();
    let years: HashMap<&str, usize> =
        problem.batches.iter().map(|b| (b.id.as_str(), b.year)).collect();

    let mut batch_cells = HashSet::new();
    let mut year_cells = HashSet::new();
    let mut room_cells = HashSet::new();
    let mut faculty_cells = HashSet::new();
    let mut placed: HashMap<&str, u32> = HashMap::new();

    for a in &schedule.assignments {
        let subject = subjects[a.subject_id.as_str()];
        assert_eq!(
            rooms[a.room_id.as_str()],
            PoolKind::for_subject(subject.kind),
            "pool mismatch for {}",
            a.subject_id
        );
        assert_eq!(a.slots.len, subject.duration);
        assert!(a.day < problem.grid.days);
        assert!(problem.grid.is_usable(a.slots), "unusable range for {}", a.subject_id);
        *placed.entry(a.subject_id.as_str()).or_default() += 1;

        for slot in a.slots.slots() {
            assert!(batch_cells.insert((a.batch_id.as_str(), a.day, slot)), "batch overlap");
            assert!(
                year_cells.insert((years[a.batch_id.as_str()], a.day, slot)),
                "year overlap"
            );
            // Room exclusivity covers lab exclusivity across batches.
            assert!(room_cells.insert((a.room_id.as_str(), a.day, slot)), "room overlap");
            if let Some(f) = &a.faculty_id {
                assert!(faculty_cells.insert((f.as_str(), a.day, slot)), "faculty overlap");
            }
        }
    }

    for s in &problem.subjects {
        let got = placed.get(s.id.as_str()).copied().unwrap_or(0);
        assert!(got <= s.sessions);
        let missing = schedule.conflicts_for_subject(&s.id).len() as u32;
        assert_eq!(got + missing, s.sessions, "session deficit without record for {}", s.id);
    }

    if let Some(max) = problem.limits.max_sessions_per_subject {
        let mut per_day: HashMap<(&str, u32), u32> = HashMap::new();
        for a in &schedule.assignments {
            *per_day.entry((a.subject_id.as_str(), a.day)).or_default() += 1;
        }
        assert!(per_day.values().all(|&n| n <= max));
    }
    if let Some(max) = problem.limits.max_labs_per_batch {
        let mut per_day: HashMap<(&str, u32), u32> = HashMap::new();
        for a in &schedule.assignments {
            if subjects[a.subject_id.as_str()].kind == SubjectKind::Lab {
                *per_day.entry((a.batch_id.as_str(), a.day)).or_default() += 1;
            }
        }
        assert!(per_day.values().all(|&n| n <= max));
    }
}
