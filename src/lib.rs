//! Timetable construction core.
//!
//! Assigns every weekly session of every subject to a (day, slot range,
//! room) without double-booking a batch, a year group, a room, a lab or a
//! faculty member. Runs are deterministic for a given seed.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Grid`, `Room`, `Subject`, `Batch`,
//!   `TimetableConfig`, `Schedule`, `Assignment`, `ConflictRecord`
//! - **`validation`**: Input integrity checks (pool tags, duplicate IDs, references)
//! - **`problem`**: Index-based compiled view of a validated configuration
//! - **`occupancy`**: Per-run occupancy maps with atomic reserve-or-reject
//! - **`capacity`**: Pre-flight demand vs supply warnings
//! - **`scheduler`**: Tiered placement, population search, KPIs, solver facade
//!
//! # Example
//!
//! ```
//! use timetable_core::generate_timetable;
//! use timetable_core::models::{Batch, Grid, Room, Subject, TimetableConfig};
//!
//! let config = TimetableConfig::new(Grid::new(5, 6))
//!     .with_room(Room::classroom("C1"))
//!     .with_room(Room::classroom("C2"))
//!     .with_batch(Batch::new("SY-B1", "SY"))
//!     .with_subject(Subject::lecture("CN", "SY-B1"))
//!     .with_subject(Subject::lecture("DS", "SY-B1"))
//!     .with_subject(Subject::lecture("OS", "SY-B1"));
//!
//! let solution = generate_timetable(&config).unwrap();
//! assert_eq!(solution.schedule.assignment_count(), 3);
//! assert!(solution.schedule.conflicts.is_empty());
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

pub mod capacity;
pub mod models;
pub mod occupancy;
pub mod problem;
pub mod scheduler;
pub mod validation;

pub use scheduler::{generate_timetable, SearchConfig, TimetableSolution, TimetableSolver};
pub use validation::InvalidConfigError;
