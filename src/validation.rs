//! Input validation for timetable configurations.
//!
//! Checks structural integrity of the configuration before any placement
//! attempt and compiles it into an index-based [`Problem`]. Detects:
//! - Unrecognised room pool tags
//! - Duplicate IDs (rooms, batches, subjects, faculties)
//! - Subjects referencing unknown batches or faculties
//! - Batches listing unknown subjects, or subjects owned by another batch
//! - Non-positive session counts and durations
//! - Empty grids and out-of-range break slots
//!
//! All issues are collected and returned together.

use std::collections::{HashMap, HashSet};
use std::fmt;

use log::debug;
use thiserror::Error;

use crate::models::{RoomPools, TimetableConfig};
use crate::problem::Problem;

/// A single configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// Issue category.
    pub kind: ConfigIssueKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of configuration issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigIssueKind {
    /// A room's pool tag is neither a classroom nor a lab tag.
    UnknownPoolTag,
    /// Two entities of the same type share an ID.
    DuplicateId,
    /// A subject references a batch that doesn't exist.
    UnknownBatch,
    /// A batch references a subject that doesn't exist.
    UnknownSubject,
    /// A subject references a faculty that doesn't exist.
    UnknownFaculty,
    /// A batch lists a subject owned by a different batch.
    SubjectBatchMismatch,
    /// A subject needs zero sessions per week.
    NonPositiveSessions,
    /// A subject's sessions last zero slots.
    NonPositiveDuration,
    /// The grid has no usable slot.
    EmptyGrid,
    /// A break slot lies outside the day.
    InvalidBreak,
    /// The payload could not be parsed.
    MalformedPayload,
}

impl ConfigIssue {
    pub(crate) fn new(kind: ConfigIssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Fatal configuration error. Placement must not run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid timetable configuration: {}", join_issues(.issues))]
pub struct InvalidConfigError {
    /// Every issue found.
    pub issues: Vec<ConfigIssue>,
}

impl InvalidConfigError {
    pub(crate) fn new(issues: Vec<ConfigIssue>) -> Self {
        Self { issues }
    }

    /// Whether any issue has the given kind.
    pub fn has_kind(&self, kind: ConfigIssueKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validates a configuration.
///
/// Checks:
/// 1. The grid has at least one usable slot and every break is in range
/// 2. Every room tag resolves to a pool
/// 3. No duplicate room, batch, subject or faculty IDs
/// 4. Every subject has a known batch, a known faculty (if any),
///    and positive session count and duration
/// 5. Every batch's subject list names known subjects it owns
///
/// # Returns
/// `Ok(())` if all checks pass, `Err` carrying all detected issues.
pub fn validate_config(config: &TimetableConfig) -> Result<(), InvalidConfigError> {
    let mut issues = Vec::new();

    // Grid
    let grid = &config.grid;
    for &b in &grid.breaks {
        if b >= grid.slots_per_day {
            issues.push(ConfigIssue::new(
                ConfigIssueKind::InvalidBreak,
                format!(
                    "Break slot {b} is outside the day ({} slots)",
                    grid.slots_per_day
                ),
            ));
        }
    }
    if grid.is_empty() {
        issues.push(ConfigIssue::new(
            ConfigIssueKind::EmptyGrid,
            format!(
                "Grid of {} day(s) × {} slot(s) has no usable slot",
                grid.days, grid.slots_per_day
            ),
        ));
    }

    // Rooms
    if let Err(e) = RoomPools::partition(&config.rooms) {
        issues.extend(e.issues);
    }
    check_duplicates("room", config.rooms.iter().map(|r| r.id.as_str()), &mut issues);

    // Faculties and batches
    let faculty_ids =
        check_duplicates("faculty", config.faculties.iter().map(|f| f.id.as_str()), &mut issues);
    let batch_ids =
        check_duplicates("batch", config.batches.iter().map(|b| b.id.as_str()), &mut issues);
    check_duplicates("subject", config.subjects.iter().map(|s| s.id.as_str()), &mut issues);

    // Subjects
    let mut owner: HashMap<&str, &str> = HashMap::new();
    for subject in &config.subjects {
        owner.entry(subject.id.as_str()).or_insert(subject.batch.as_str());

        if !batch_ids.contains(subject.batch.as_str()) {
            issues.push(ConfigIssue::new(
                ConfigIssueKind::UnknownBatch,
                format!(
                    "Subject '{}' references unknown batch '{}'",
                    subject.id, subject.batch
                ),
            ));
        }
        if let Some(faculty) = &subject.faculty {
            if !faculty_ids.contains(faculty.as_str()) {
                issues.push(ConfigIssue::new(
                    ConfigIssueKind::UnknownFaculty,
                    format!(
                        "Subject '{}' references unknown faculty '{}'",
                        subject.id, faculty
                    ),
                ));
            }
        }
        if subject.sessions_per_week == 0 {
            issues.push(ConfigIssue::new(
                ConfigIssueKind::NonPositiveSessions,
                format!("Subject '{}' needs at least one weekly session", subject.id),
            ));
        }
        if subject.duration == 0 {
            issues.push(ConfigIssue::new(
                ConfigIssueKind::NonPositiveDuration,
                format!("Subject '{}' has a zero-slot session duration", subject.id),
            ));
        }
    }

    // Batch subject lists
    for batch in &config.batches {
        for subject_id in &batch.subjects {
            match owner.get(subject_id.as_str()) {
                None => issues.push(ConfigIssue::new(
                    ConfigIssueKind::UnknownSubject,
                    format!(
                        "Batch '{}' references unknown subject '{}'",
                        batch.id, subject_id
                    ),
                )),
                Some(&owning) if owning != batch.id => issues.push(ConfigIssue::new(
                    ConfigIssueKind::SubjectBatchMismatch,
                    format!(
                        "Batch '{}' lists subject '{}' owned by batch '{}'",
                        batch.id, subject_id, owning
                    ),
                )),
                Some(_) => {}
            }
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        debug!("configuration rejected with {} issue(s)", issues.len());
        Err(InvalidConfigError::new(issues))
    }
}

/// Validates a configuration and compiles it into a [`Problem`].
pub fn compile(config: &TimetableConfig) -> Result<Problem, InvalidConfigError> {
    validate_config(config)?;
    Problem::build(config)
}

/// Records duplicate IDs and returns the set of distinct IDs.
fn check_duplicates<'a>(
    label: &str,
    ids: impl Iterator<Item = &'a str>,
    issues: &mut Vec<ConfigIssue>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            issues.push(ConfigIssue::new(
                ConfigIssueKind::DuplicateId,
                format!("Duplicate {label} ID: {id}"),
            ));
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Batch, Faculty, Grid, Room, Subject};

    fn sample_config() -> TimetableConfig {
        TimetableConfig::new(Grid::new(5, 6))
            .with_room(Room::classroom("C1"))
            .with_room(Room::lab("L1"))
            .with_faculty(Faculty::new("F1"))
            .with_batch(Batch::new("B1", "SY"))
            .with_subject(Subject::lecture("MATH", "B1").with_sessions(3).with_faculty("F1"))
            .with_subject(Subject::lab("PHY", "B1"))
    }

    fn kinds(err: &InvalidConfigError) -> Vec<ConfigIssueKind> {
        err.issues.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&sample_config()).is_ok());
        assert!(compile(&sample_config()).is_ok());
    }

    #[test]
    fn test_unknown_pool_tag() {
        let cfg = sample_config().with_room(Room::new("G1", "gym"));
        let err = validate_config(&cfg).unwrap_err();
        assert!(err.has_kind(ConfigIssueKind::UnknownPoolTag));
    }

    #[test]
    fn test_duplicate_ids() {
        let cfg = sample_config()
            .with_room(Room::classroom("C1"))
            .with_batch(Batch::new("B1", "TY"));
        let err = validate_config(&cfg).unwrap_err();
        let dupes = kinds(&err)
            .into_iter()
            .filter(|k| *k == ConfigIssueKind::DuplicateId)
            .count();
        assert_eq!(dupes, 2);
    }

    #[test]
    fn test_unknown_batch_and_faculty() {
        let cfg = sample_config().with_subject(Subject::lecture("CHEM", "B9").with_faculty("F9"));
        let err = validate_config(&cfg).unwrap_err();
        assert!(err.has_kind(ConfigIssueKind::UnknownBatch));
        assert!(err.has_kind(ConfigIssueKind::UnknownFaculty));
    }

    #[test]
    fn test_non_positive_values() {
        let cfg = sample_config()
            .with_subject(Subject::lecture("A", "B1").with_sessions(0))
            .with_subject(Subject::lecture("B", "B1").with_duration(0));
        let err = validate_config(&cfg).unwrap_err();
        assert!(err.has_kind(ConfigIssueKind::NonPositiveSessions));
        assert!(err.has_kind(ConfigIssueKind::NonPositiveDuration));
    }

    #[test]
    fn test_batch_subject_references() {
        let mut cfg = sample_config().with_batch(Batch::new("B2", "SY").with_subject("GHOST"));
        cfg.batches[1].subjects.push("MATH".into()); // owned by B1
        let err = validate_config(&cfg).unwrap_err();
        assert!(err.has_kind(ConfigIssueKind::UnknownSubject));
        assert!(err.has_kind(ConfigIssueKind::SubjectBatchMismatch));
    }

    #[test]
    fn test_empty_grid() {
        let mut cfg = sample_config();
        cfg.grid = Grid::new(0, 6);
        let err = validate_config(&cfg).unwrap_err();
        assert_eq!(kinds(&err), vec![ConfigIssueKind::EmptyGrid]);
    }

    #[test]
    fn test_invalid_break() {
        let mut cfg = sample_config();
        cfg.grid = Grid::new(5, 6).with_breaks([6]);
        let err = validate_config(&cfg).unwrap_err();
        assert!(err.has_kind(ConfigIssueKind::InvalidBreak));
    }

    #[test]
    fn test_multiple_errors_collected() {
        let mut cfg = sample_config()
            .with_room(Room::new("X", "?"))
            .with_subject(Subject::lecture("Z", "NOPE").with_sessions(0));
        cfg.grid = Grid::new(0, 0);
        let err = validate_config(&cfg).unwrap_err();
        assert!(err.issues.len() >= 4);
    }

    #[test]
    fn test_error_display() {
        let cfg = sample_config().with_room(Room::new("G1", "gym"));
        let err = validate_config(&cfg).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("invalid timetable configuration"));
        assert!(msg.contains("G1"));
    }
}
