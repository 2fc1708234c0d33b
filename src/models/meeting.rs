//! Meeting (section) model.
//!
//! A meeting is one enrollable offering of a course, e.g. lecture section
//! `LEC-0101`. It belongs to exactly one category and recurs on one or
//! more weekly time slots.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::TimeSlot;

/// The required-selection bucket a meeting belongs to.
///
/// A student takes exactly one meeting per populated category per course.
/// Ordering (Lecture < Tutorial < Practical) fixes the group order within a
/// course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Lecture,
    Tutorial,
    Practical,
}

impl Category {
    /// All categories in group order.
    pub const ALL: [Category; 3] = [Category::Lecture, Category::Tutorial, Category::Practical];

    /// Catalog teaching-method tag.
    pub fn tag(self) -> &'static str {
        match self {
            Category::Lecture => "LEC",
            Category::Tutorial => "TUT",
            Category::Practical => "PRA",
        }
    }

    /// Parses a catalog tag. Returns `None` for anything unrecognised; the
    /// caller decides how loudly to fail.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "LEC" | "LECTURE" => Some(Category::Lecture),
            "TUT" | "TUTORIAL" => Some(Category::Tutorial),
            "PRA" | "PRACTICAL" => Some(Category::Practical),
            _ => None,
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_tag(s).ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Lecture => "lecture",
            Category::Tutorial => "tutorial",
            Category::Practical => "practical",
        };
        f.write_str(name)
    }
}

/// One enrollable offering.
///
/// Immutable once built. Shared as `Arc<Meeting>` by its course, its group,
/// and every schedule that selects it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Meeting {
    /// Section identifier, unique within the course.
    pub id: String,
    /// Owning course id (lookup only).
    pub course_id: String,
    /// Selection bucket.
    pub category: Category,
    /// Weekly occurrences. Empty for asynchronous offerings, which never
    /// conflict with anything.
    pub slots: Vec<TimeSlot>,
}

impl Meeting {
    /// Creates a meeting with no slots.
    pub fn new(id: impl Into<String>, course_id: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            course_id: course_id.into(),
            category,
            slots: Vec::new(),
        }
    }

    /// Adds a weekly slot.
    pub fn with_slot(mut self, slot: TimeSlot) -> Self {
        self.slots.push(slot);
        self
    }

    /// Replaces all slots.
    pub fn with_slots(mut self, slots: Vec<TimeSlot>) -> Self {
        self.slots = slots;
        self
    }

    /// Whether any slot of `self` overlaps any slot of `other`.
    pub fn conflicts_with(&self, other: &Meeting) -> bool {
        self.slots
            .iter()
            .any(|a| other.slots.iter().any(|b| a.overlaps(b)))
    }

    /// Total weekly contact time in minutes.
    pub fn weekly_minutes(&self) -> u32 {
        self.slots.iter().map(|s| s.duration_minutes() as u32).sum()
    }
}
