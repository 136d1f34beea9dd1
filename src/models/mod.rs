//! Timetabling domain models.
//!
//! Provides the input types a caller supplies per scheduling invocation
//! and the output types a run hands back.
//!
//! # Domain Mappings
//!
//! | timetable-core | University | School | Training centre |
//! |----------------|------------|--------|-----------------|
//! | Batch | Division/Section | Class | Cohort |
//! | Year key | Year of study | Grade | Programme |
//! | Subject | Course | Subject | Module |
//! | Room pool | Classroom/Lab | Classroom/Lab | Hall/Workshop |
//! | Schedule | Timetable | Timetable | Rota |

mod batch;
mod config;
mod grid;
mod room;
mod schedule;
mod subject;

pub use batch::{Batch, Faculty};
pub use config::{DailyLimits, TimetableConfig};
pub use grid::{Grid, SlotRange};
pub use room::{PoolKind, Room, RoomPools};
pub use schedule::{Assignment, ConflictReason, ConflictRecord, Fitness, Schedule};
pub use subject::{Subject, SubjectKind};
