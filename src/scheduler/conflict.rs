//! Structured reporting of unplaced occurrences.

use crate::models::{ConflictReason, ConflictRecord};

/// Accumulates conflict records for one candidate run.
#[derive(Debug, Clone, Default)]
pub struct ConflictReporter {
    records: Vec<ConflictRecord>,
}

impl ConflictReporter {
    /// Creates an empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one unplaced occurrence.
    pub fn record(
        &mut self,
        subject_id: &str,
        batch_id: &str,
        occurrence: u32,
        reason: ConflictReason,
        context: impl Into<String>,
    ) {
        self.records.push(ConflictRecord {
            subject_id: subject_id.to_string(),
            batch_id: batch_id.to_string(),
            occurrence,
            reason,
            context: context.into(),
        });
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records with the given reason.
    pub fn by_reason(&self, reason: ConflictReason) -> Vec<&ConflictRecord> {
        self.records.iter().filter(|r| r.reason == reason).collect()
    }

    /// Records of one subject.
    pub fn for_subject(&self, subject_id: &str) -> Vec<&ConflictRecord> {
        self.records
            .iter()
            .filter(|r| r.subject_id == subject_id)
            .collect()
    }

    /// All records, in the order they were recorded.
    pub fn records(&self) -> &[ConflictRecord] {
        &self.records
    }

    /// Consumes the reporter.
    pub fn into_records(self) -> Vec<ConflictRecord> {
        self.records
    }
}
