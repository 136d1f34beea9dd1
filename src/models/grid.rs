//! Day × slot grid model.
//!
//! A timetable grid is a fixed number of days, each divided into the same
//! number of slots. Some slot indices may be declared as breaks: they are
//! unusable on every day, and no multi-slot session may span one.
//!
//! # Time Model
//! Slots are zero-based within a day. A session occupies a contiguous
//! [`SlotRange`] that never crosses a day boundary.

use serde::{Deserialize, Serialize};

/// A contiguous range of slots within one day: `[start, start + len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotRange {
    /// First occupied slot (inclusive).
    pub start: u32,
    /// Number of slots occupied.
    pub len: u32,
}

impl SlotRange {
    /// Creates a new slot range.
    pub fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    /// One past the last occupied slot.
    #[inline]
    pub fn end(&self) -> u32 {
        self.start + self.len
    }

    /// Whether a slot falls within this range.
    #[inline]
    pub fn contains(&self, slot: u32) -> bool {
        slot >= self.start && slot < self.end()
    }

    /// Whether two ranges share at least one slot.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Iterates the occupied slot indices.
    pub fn slots(&self) -> std::ops::Range<u32> {
        self.start..self.end()
    }
}

/// The fixed day × slot grid shared by every batch and room in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// Number of teaching days.
    pub days: u32,
    /// Slots per day (including break slots).
    pub slots_per_day: u32,
    /// Slot indices that are breaks on every day.
    #[serde(default)]
    pub breaks: Vec<u32>,
}

impl Grid {
    /// Creates a grid without breaks.
    pub fn new(days: u32, slots_per_day: u32) -> Self {
        Self {
            days,
            slots_per_day,
            breaks: Vec::new(),
        }
    }

    /// Sets the break slots (deduplicated, sorted).
    pub fn with_breaks(mut self, breaks: impl IntoIterator<Item = u32>) -> Self {
        self.breaks = breaks.into_iter().collect();
        self.breaks.sort_unstable();
        self.breaks.dedup();
        self
    }

    /// Whether the grid has no usable slot at all.
    pub fn is_empty(&self) -> bool {
        self.days == 0 || self.usable_slots_per_day() == 0
    }

    /// Whether a slot index is a break.
    #[inline]
    pub fn is_break(&self, slot: u32) -> bool {
        self.breaks.contains(&slot)
    }

    /// Slots per day that can host a session.
    pub fn usable_slots_per_day(&self) -> u32 {
        (0..self.slots_per_day).filter(|&s| !self.is_break(s)).count() as u32
    }

    /// Total usable (day, slot) cells.
    pub fn size(&self) -> u64 {
        self.days as u64 * self.usable_slots_per_day() as u64
    }

    /// Whether a range lies inside the day and avoids every break.
    pub fn is_usable(&self, range: SlotRange) -> bool {
        range.len > 0
            && range.end() <= self.slots_per_day
            && range.slots().all(|s| !self.is_break(s))
    }

    /// Valid ranges of `duration` slots within one day, ascending by start.
    ///
    /// Each run of usable slots between breaks is cut into consecutive,
    /// non-overlapping blocks of `duration` starting at the run's first
    /// slot. Single-slot windows cover every usable slot.
    pub fn windows(&self, duration: u32) -> Vec<SlotRange> {
        if duration == 0 || duration > self.slots_per_day {
            return Vec::new();
        }
        let mut out = Vec::new();
        let mut run_start = None;
        for slot in 0..=self.slots_per_day {
            let usable = slot < self.slots_per_day && !self.is_break(slot);
            match (usable, run_start) {
                (true, None) => run_start = Some(slot),
                (false, Some(start)) => {
                    let mut s = start;
                    while s + duration <= slot {
                        out.push(SlotRange::new(s, duration));
                        s += duration;
                    }
                    run_start = None;
                }
                _ => {}
            }
        }
        out
    }

    /// Longest run of consecutive usable slots in a day.
    pub fn longest_run(&self) -> u32 {
        let mut best = 0;
        let mut run = 0;
        for slot in 0..self.slots_per_day {
            if self.is_break(slot) {
                run = 0;
            } else {
                run += 1;
                best = best.max(run);
            }
        }
        best
    }

    /// Flat cell index for (day, slot).
    #[inline]
    pub(crate) fn cell(&self, day: u32, slot: u32) -> usize {
        (day * self.slots_per_day + slot) as usize
    }

    /// Number of flat cells (days × slots_per_day, breaks included).
    #[inline]
    pub(crate) fn cell_count(&self) -> usize {
        (self.days * self.slots_per_day) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_range() {
        let r = SlotRange::new(2, 3);
        assert_eq!(r.end(), 5);
        assert!(r.contains(2));
        assert!(r.contains(4));
        assert!(!r.contains(5));
        assert_eq!(r.slots().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_slot_range_overlap() {
        let a = SlotRange::new(0, 2);
        assert!(a.overlaps(&SlotRange::new(1, 2)));
        assert!(!a.overlaps(&SlotRange::new(2, 2))); // half-open
    }

    #[test]
    fn test_grid_size() {
        let g = Grid::new(5, 6);
        assert_eq!(g.size(), 30);
        assert_eq!(g.usable_slots_per_day(), 6);
        assert!(!g.is_empty());
    }

    #[test]
    fn test_grid_breaks() {
        let g = Grid::new(5, 7).with_breaks([4, 2, 2]);
        assert_eq!(g.breaks, vec![2, 4]);
        assert_eq!(g.usable_slots_per_day(), 5);
        assert_eq!(g.size(), 25);
        assert!(g.is_break(2));
        assert!(!g.is_break(3));
    }

    #[test]
    fn test_windows_skip_breaks() {
        // 0 1 [2] 3 [4] 5 6
        let g = Grid::new(1, 7).with_breaks([2, 4]);
        let two: Vec<u32> = g.windows(2).iter().map(|r| r.start).collect();
        assert_eq!(two, vec![0, 5]);
        let one: Vec<u32> = g.windows(1).iter().map(|r| r.start).collect();
        assert_eq!(one, vec![0, 1, 3, 5, 6]);
        assert!(g.windows(3).is_empty());
        assert_eq!(g.longest_run(), 2);
    }

    #[test]
    fn test_windows_day_boundary() {
        let g = Grid::new(2, 6);
        let starts: Vec<u32> = g.windows(2).iter().map(|r| r.start).collect();
        assert_eq!(starts, vec![0, 2, 4]);
        let three: Vec<u32> = g.windows(3).iter().map(|r| r.start).collect();
        assert_eq!(three, vec![0, 3]);
        assert!(g.windows(7).is_empty());
        assert!(g.windows(0).is_empty());
    }

    #[test]
    fn test_windows_aligned_per_run() {
        // 0 1 2 [3] 4 5 6 7
        let g = Grid::new(1, 8).with_breaks([3]);
        let two: Vec<u32> = g.windows(2).iter().map(|r| r.start).collect();
        assert_eq!(two, vec![0, 4, 6]);
        assert!(g.windows(2).iter().all(|w| g.is_usable(*w)));
        let one: Vec<u32> = g.windows(1).iter().map(|r| r.start).collect();
        assert_eq!(one, vec![0, 1, 2, 4, 5, 6, 7]);
    }

    #[test]
    fn test_empty_grid() {
        assert!(Grid::new(0, 6).is_empty());
        assert!(Grid::new(5, 0).is_empty());
        assert!(Grid::new(5, 2).with_breaks([0, 1]).is_empty());
    }
}
