//! Room and room pool model.
//!
//! Rooms carry a free-form pool tag in the input payload. Partitioning
//! resolves each tag into a [`PoolKind`] and splits the rooms into a
//! classroom pool and a lab pool, each iterated in ascending id order.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::SubjectKind;
use crate::validation::{ConfigIssue, ConfigIssueKind, InvalidConfigError};

/// A teaching room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Pool tag (e.g. "classroom", "lab").
    pub pool: String,
    /// Seating capacity, if known.
    #[serde(default)]
    pub capacity: Option<u32>,
}

/// Room pool classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PoolKind {
    /// Rooms for lectures.
    Classroom,
    /// Rooms for lab sessions.
    Lab,
}

impl PoolKind {
    /// Resolves a pool tag.
    ///
    /// Accepts `classroom`, `lecture`, `n` and `lab`, `laboratory`, `r`
    /// (case-insensitive). Returns `None` for anything else.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "classroom" | "lecture" | "n" => Some(Self::Classroom),
            "lab" | "laboratory" | "r" => Some(Self::Lab),
            _ => None,
        }
    }

    /// The pool a subject of the given kind must draw from.
    pub fn for_subject(kind: SubjectKind) -> Self {
        match kind {
            SubjectKind::Lecture => Self::Classroom,
            SubjectKind::Lab => Self::Lab,
        }
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classroom => write!(f, "classroom"),
            Self::Lab => write!(f, "lab"),
        }
    }
}

impl Room {
    /// Creates a room with the given pool tag.
    pub fn new(id: impl Into<String>, pool: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            pool: pool.into(),
            capacity: None,
        }
    }

    /// Creates a classroom.
    pub fn classroom(id: impl Into<String>) -> Self {
        Self::new(id, "classroom")
    }

    /// Creates a lab room.
    pub fn lab(id: impl Into<String>) -> Self {
        Self::new(id, "lab")
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the seating capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Resolved pool, or `None` if the tag is unrecognised.
    pub fn pool_kind(&self) -> Option<PoolKind> {
        PoolKind::from_tag(&self.pool)
    }
}

/// Rooms partitioned by pool, each pool sorted by ascending id.
#[derive(Debug, Clone, Default)]
pub struct RoomPools {
    classrooms: Vec<Room>,
    labs: Vec<Room>,
}

impl RoomPools {
    /// Partitions rooms into the classroom and lab pools.
    ///
    /// Every room with an unrecognised tag is reported; the partition only
    /// succeeds when all tags resolve.
    pub fn partition(rooms: &[Room]) -> Result<Self, InvalidConfigError> {
        let mut pools = Self::default();
        let mut issues = Vec::new();

        for room in rooms {
            match room.pool_kind() {
                Some(PoolKind::Classroom) => pools.classrooms.push(room.clone()),
                Some(PoolKind::Lab) => pools.labs.push(room.clone()),
                None => issues.push(ConfigIssue::new(
                    ConfigIssueKind::UnknownPoolTag,
                    format!("Room '{}' has unrecognised pool tag '{}'", room.id, room.pool),
                )),
            }
        }

        if !issues.is_empty() {
            return Err(InvalidConfigError::new(issues));
        }

        pools.classrooms.sort_by(|a, b| a.id.cmp(&b.id));
        pools.labs.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(pools)
    }

    /// Rooms of one pool, ascending by id.
    pub fn pool(&self, kind: PoolKind) -> &[Room] {
        match kind {
            PoolKind::Classroom => &self.classrooms,
            PoolKind::Lab => &self.labs,
        }
    }

    /// Classroom pool, ascending by id.
    pub fn classrooms(&self) -> &[Room] {
        &self.classrooms
    }

    /// Lab pool, ascending by id.
    pub fn labs(&self) -> &[Room] {
        &self.labs
    }

    /// Total room count across pools.
    pub fn len(&self) -> usize {
        self.classrooms.len() + self.labs.len()
    }

    /// Whether both pools are empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
