//! Timetable configuration payload.
//!
//! Mirrors the `config_json` blob the surrounding application stores per
//! project. The core treats it as an input struct: it is validated and
//! compiled by [`crate::validation::compile`] before any placement.

use serde::{Deserialize, Serialize};

use super::{Batch, Faculty, Grid, Room, Subject};
use crate::validation::{ConfigIssue, ConfigIssueKind, InvalidConfigError};

/// Optional per-day spreading limits. `None` = unlimited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLimits {
    /// Max sessions of one subject per day.
    #[serde(default)]
    pub max_sessions_per_subject: Option<u32>,
    /// Max lab sessions of one batch per day.
    #[serde(default)]
    pub max_labs_per_batch: Option<u32>,
}

impl DailyLimits {
    /// No limits.
    pub fn none() -> Self {
        Self::default()
    }

    /// Sets the per-subject daily cap.
    pub fn with_max_sessions_per_subject(mut self, max: u32) -> Self {
        self.max_sessions_per_subject = Some(max);
        self
    }

    /// Sets the per-batch daily lab cap.
    pub fn with_max_labs_per_batch(mut self, max: u32) -> Self {
        self.max_labs_per_batch = Some(max);
        self
    }
}

/// Complete input for one scheduling invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableConfig {
    /// All rooms, any pool.
    pub rooms: Vec<Room>,
    /// Student batches.
    pub batches: Vec<Batch>,
    /// Subjects to timetable.
    pub subjects: Vec<Subject>,
    /// Faculty roster referenced by subjects.
    #[serde(default)]
    pub faculties: Vec<Faculty>,
    /// Day × slot grid.
    pub grid: Grid,
    /// Per-day spreading limits.
    #[serde(default)]
    pub limits: DailyLimits,
}

impl TimetableConfig {
    /// Creates an empty configuration on the given grid.
    pub fn new(grid: Grid) -> Self {
        Self {
            rooms: Vec::new(),
            batches: Vec::new(),
            subjects: Vec::new(),
            faculties: Vec::new(),
            grid,
            limits: DailyLimits::default(),
        }
    }

    /// Parses a JSON payload.
    pub fn from_json(json: &str) -> Result<Self, InvalidConfigError> {
        serde_json::from_str(json).map_err(|e| {
            InvalidConfigError::new(vec![ConfigIssue::new(
                ConfigIssueKind::MalformedPayload,
                format!("Malformed configuration payload: {e}"),
            )])
        })
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds a batch.
    pub fn with_batch(mut self, batch: Batch) -> Self {
        self.batches.push(batch);
        self
    }

    /// Adds a subject and registers it on its batch, if that batch exists
    /// and does not list it yet.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        if let Some(batch) = self.batches.iter_mut().find(|b| b.id == subject.batch) {
            if !batch.subjects.contains(&subject.id) {
                batch.subjects.push(subject.id.clone());
            }
        }
        self.subjects.push(subject);
        self
    }

    /// Adds a faculty member.
    pub fn with_faculty(mut self, faculty: Faculty) -> Self {
        self.faculties.push(faculty);
        self
    }

    /// Sets the daily limits.
    pub fn with_limits(mut self, limits: DailyLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Total occurrences requested across all subjects.
    pub fn total_occurrences(&self) -> u64 {
        self.subjects.iter().map(|s| s.sessions_per_week as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubjectKind;

    #[test]
    fn test_builder_registers_subject_on_batch() {
        let cfg = TimetableConfig::new(Grid::new(5, 6))
            .with_batch(Batch::new("B1", "SY"))
            .with_subject(Subject::lecture("MATH", "B1").with_sessions(3))
            .with_subject(Subject::lab("PHY", "B1"));
        assert_eq!(cfg.batches[0].subjects, vec!["MATH", "PHY"]);
        assert_eq!(cfg.total_occurrences(), 4);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "rooms": [
                {"id": "CR-1", "pool": "n"},
                {"id": "Lab-1", "pool": "r", "capacity": 30}
            ],
            "batches": [{"id": "SY-B1", "year": "SY", "subjects": ["DS", "DSL"]}],
            "subjects": [
                {"id": "DS", "kind": "Lecture", "sessions_per_week": 3, "duration": 1, "batch": "SY-B1"},
                {"id": "DSL", "kind": "Lab", "sessions_per_week": 1, "duration": 2, "batch": "SY-B1", "faculty": "F1"}
            ],
            "faculties": [{"id": "F1"}],
            "grid": {"days": 5, "slots_per_day": 7, "breaks": [2, 4]},
            "limits": {"max_sessions_per_subject": 1}
        }"#;
        let cfg = TimetableConfig::from_json(json).unwrap();
        assert_eq!(cfg.rooms.len(), 2);
        assert_eq!(cfg.subjects[1].kind, SubjectKind::Lab);
        assert_eq!(cfg.grid.breaks, vec![2, 4]);
        assert_eq!(cfg.limits.max_sessions_per_subject, Some(1));
        assert_eq!(cfg.limits.max_labs_per_batch, None);
    }

    #[test]
    fn test_from_json_malformed() {
        let err = TimetableConfig::from_json("{\"rooms\": 3}").unwrap_err();
        assert_eq!(err.issues[0].kind, ConfigIssueKind::MalformedPayload);
    }
}
