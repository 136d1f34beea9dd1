//! Pre-flight capacity analysis.
//!
//! Compares slot demand (`sessions × duration`) against slot supply before
//! any placement runs, so an oversubscribed configuration is diagnosable
//! without reading individual conflicts.
//!
//! # Checks
//!
//! | Scope | Demand | Supply |
//! |-------|--------|--------|
//! | Pool | subjects mapped to the pool | grid size × rooms in pool |
//! | Batch | subjects of the batch | grid size |
//! | Year | subjects of every batch in the year | grid size |
//!
//! The year check only runs for years with more than one batch; with a
//! single batch it would repeat the batch check.
//!
//! Warnings are advisory: scheduling proceeds and the excess shows up as
//! conflict records.

use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::models::PoolKind;
use crate::problem::Problem;

/// What a capacity warning is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapacityScope {
    /// A room pool.
    Pool(PoolKind),
    /// One batch.
    Batch,
    /// A year group of batches.
    Year,
}

/// Non-fatal oversubscription notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityWarning {
    /// What is oversubscribed.
    pub scope: CapacityScope,
    /// Pool name, batch id or year key.
    pub entity: String,
    /// Slot demand.
    pub demand: u64,
    /// Slot supply.
    pub supply: u64,
    /// Human-readable description.
    pub message: String,
}

impl CapacityWarning {
    /// Slots that cannot be served even with a perfect placement.
    pub fn shortfall(&self) -> u64 {
        self.demand.saturating_sub(self.supply)
    }
}

impl fmt::Display for CapacityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Checks demand against supply per pool, batch and year group.
pub fn check_capacity(problem: &Problem) -> Vec<CapacityWarning> {
    let grid_size = problem.grid.size();
    let mut warnings = Vec::new();

    // Pools
    for kind in [PoolKind::Classroom, PoolKind::Lab] {
        let demand: u64 = problem
            .subjects
            .iter()
            .filter(|s| s.pool() == kind)
            .map(|s| s.sessions as u64 * s.duration as u64)
            .sum();
        let rooms = problem.pool_rooms(kind).len() as u64;
        let supply = grid_size * rooms;
        if demand > supply {
            warnings.push(CapacityWarning {
                scope: CapacityScope::Pool(kind),
                entity: kind.to_string(),
                demand,
                supply,
                message: format!(
                    "Insufficient {kind} capacity: need {demand} slot(s) but only {supply} available with {rooms} room(s)"
                ),
            });
        }
    }

    // Batches
    let mut batch_demand = vec![0u64; problem.batches.len()];
    for s in &problem.subjects {
        batch_demand[s.batch] += s.sessions as u64 * s.duration as u64;
    }
    for (b, &demand) in batch_demand.iter().enumerate() {
        if demand > grid_size {
            let id = &problem.batches[b].id;
            warnings.push(CapacityWarning {
                scope: CapacityScope::Batch,
                entity: id.clone(),
                demand,
                supply: grid_size,
                message: format!(
                    "Batch '{id}' needs {demand} slot(s) but the grid has only {grid_size}"
                ),
            });
        }
    }

    // Year groups
    for (y, year) in problem.years.iter().enumerate() {
        let members: Vec<usize> = problem.batches_in_year(y).collect();
        if members.len() < 2 {
            continue;
        }
        let demand: u64 = members.iter().map(|&b| batch_demand[b]).sum();
        if demand > grid_size {
            warnings.push(CapacityWarning {
                scope: CapacityScope::Year,
                entity: year.clone(),
                demand,
                supply: grid_size,
                message: format!(
                    "Year '{year}' ({} batches) needs {demand} slot(s) but the grid has only {grid_size}",
                    members.len()
                ),
            });
        }
    }

    for w in &warnings {
        warn!("{w}");
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Batch, Grid, Room, Subject, TimetableConfig};
    use crate::validation::compile;

    #[test]
    fn test_no_warnings_when_fits() {
        let cfg = TimetableConfig::new(Grid::new(5, 6))
            .with_room(Room::classroom("C1"))
            .with_room(Room::lab("L1"))
            .with_batch(Batch::new("B1", "SY"))
            .with_subject(Subject::lecture("MATH", "B1").with_sessions(4))
            .with_subject(Subject::lab("PHY", "B1").with_sessions(2));
        let p = compile(&cfg).unwrap();
        assert!(check_capacity(&p).is_empty());
    }

    #[test]
    fn test_pool_oversubscribed() {
        // 1 day × 2 slots, 1 lab: supply 2, demand 3 labs × 2 slots = 6
        let cfg = TimetableConfig::new(Grid::new(1, 2))
            .with_room(Room::lab("L1"))
            .with_batch(Batch::new("B1", "SY"))
            .with_batch(Batch::new("B2", "TY"))
            .with_batch(Batch::new("B3", "BTech"))
            .with_subject(Subject::lab("A", "B1"))
            .with_subject(Subject::lab("B", "B2"))
            .with_subject(Subject::lab("C", "B3"));
        let p = compile(&cfg).unwrap();
        let warnings = check_capacity(&p);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].scope, CapacityScope::Pool(PoolKind::Lab));
        assert_eq!(warnings[0].demand, 6);
        assert_eq!(warnings[0].supply, 2);
        assert_eq!(warnings[0].shortfall(), 4);
    }

    #[test]
    fn test_empty_pool_with_demand() {
        let cfg = TimetableConfig::new(Grid::new(5, 6))
            .with_room(Room::classroom("C1"))
            .with_batch(Batch::new("B1", "SY"))
            .with_subject(Subject::lab("PHY", "B1"));
        let p = compile(&cfg).unwrap();
        let warnings = check_capacity(&p);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].supply, 0);
        assert!(warnings[0].message.contains("lab"));
    }

    #[test]
    fn test_batch_oversubscribed() {
        let cfg = TimetableConfig::new(Grid::new(1, 3))
            .with_room(Room::classroom("C1"))
            .with_room(Room::classroom("C2"))
            .with_batch(Batch::new("B1", "SY"))
            .with_subject(Subject::lecture("MATH", "B1").with_sessions(4));
        let p = compile(&cfg).unwrap();
        let warnings = check_capacity(&p);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].scope, CapacityScope::Batch);
        assert_eq!(warnings[0].entity, "B1");
    }

    #[test]
    fn test_same_year_saturation() {
        // Two SY batches each fill the whole grid alone; together they overflow
        // both the single classroom and the shared year timeline.
        let cfg = TimetableConfig::new(Grid::new(5, 6))
            .with_room(Room::classroom("C1"))
            .with_batch(Batch::new("SY-B1", "SY"))
            .with_batch(Batch::new("SY-B2", "SY"))
            .with_subject(Subject::lecture("A", "SY-B1").with_sessions(30))
            .with_subject(Subject::lecture("B", "SY-B2").with_sessions(30));
        let p = compile(&cfg).unwrap();
        let warnings = check_capacity(&p);
        let scopes: Vec<CapacityScope> = warnings.iter().map(|w| w.scope).collect();
        assert_eq!(
            scopes,
            vec![CapacityScope::Pool(PoolKind::Classroom), CapacityScope::Year]
        );
        assert_eq!(warnings[1].entity, "SY");
        assert_eq!(warnings[1].demand, 60);
        assert_eq!(warnings[1].supply, 30);
    }

    #[test]
    fn test_breaks_reduce_supply() {
        let cfg = TimetableConfig::new(Grid::new(1, 4).with_breaks([1]))
            .with_room(Room::classroom("C1"))
            .with_batch(Batch::new("B1", "SY"))
            .with_subject(Subject::lecture("MATH", "B1").with_sessions(4));
        let p = compile(&cfg).unwrap();
        let warnings = check_capacity(&p);
        assert!(warnings.iter().any(|w| w.supply == 3));
    }
}
