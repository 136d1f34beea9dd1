//! Subject model.
//!
//! A subject is taught to exactly one batch and needs a fixed number of
//! weekly sessions, each occupying `duration` consecutive slots.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subject classification. Determines the room pool a subject draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubjectKind {
    /// Theory lecture, held in a classroom.
    Lecture,
    /// Practical session, held in a lab.
    Lab,
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lecture => write!(f, "lecture"),
            Self::Lab => write!(f, "lab"),
        }
    }
}

/// A subject to be timetabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Lecture or lab.
    pub kind: SubjectKind,
    /// Required sessions per week.
    pub sessions_per_week: u32,
    /// Slots per session.
    pub duration: u32,
    /// Owning batch id.
    pub batch: String,
    /// Teaching faculty id, if assigned.
    #[serde(default)]
    pub faculty: Option<String>,
}

impl Subject {
    /// Creates a subject with one single-slot session per week.
    pub fn new(id: impl Into<String>, kind: SubjectKind, batch: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind,
            sessions_per_week: 1,
            duration: 1,
            batch: batch.into(),
            faculty: None,
        }
    }

    /// Creates a lecture subject.
    pub fn lecture(id: impl Into<String>, batch: impl Into<String>) -> Self {
        Self::new(id, SubjectKind::Lecture, batch)
    }

    /// Creates a lab subject (two-slot sessions).
    pub fn lab(id: impl Into<String>, batch: impl Into<String>) -> Self {
        Self::new(id, SubjectKind::Lab, batch).with_duration(2)
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the weekly session count.
    pub fn with_sessions(mut self, sessions_per_week: u32) -> Self {
        self.sessions_per_week = sessions_per_week;
        self
    }

    /// Sets the session duration in slots.
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the teaching faculty.
    pub fn with_faculty(mut self, faculty: impl Into<String>) -> Self {
        self.faculty = Some(faculty.into());
        self
    }

    /// Slot demand per week (sessions × duration).
    pub fn weekly_demand(&self) -> u64 {
        self.sessions_per_week as u64 * self.duration as u64
    }
}
