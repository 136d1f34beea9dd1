//! Batch and faculty models.

use serde::{Deserialize, Serialize};

/// A student batch.
///
/// Batches that share a `year` key are taught as one cohort in time:
/// none of them may be busy in the same (day, slot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// Unique batch identifier (e.g. "SY-B1").
    pub id: String,
    /// Year/grouping key (e.g. "SY").
    pub year: String,
    /// Subject ids taught to this batch, in display order.
    #[serde(default)]
    pub subjects: Vec<String>,
}

impl Batch {
    /// Creates a batch in the given year group.
    pub fn new(id: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            year: year.into(),
            subjects: Vec::new(),
        }
    }

    /// Adds a subject reference.
    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.subjects.push(subject_id.into());
        self
    }

    /// Adds several subject references.
    pub fn with_subjects<I, S>(mut self, subject_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subjects.extend(subject_ids.into_iter().map(Into::into));
        self
    }
}

/// A teaching faculty member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    /// Unique faculty identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

impl Faculty {
    /// Creates a faculty member.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
