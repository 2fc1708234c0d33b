//! Course model.
//!
//! A course owns its meetings, filed by category. Only populated categories
//! are present: a course without tutorials simply has no tutorial entry.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{Category, Meeting, MeetingGroup, TimeSlot};

/// A requested unit of study.
///
/// # Invariant
/// Every meeting in `categories[c]` has `category == c` and
/// `course_id == id`. Meetings can only be added through
/// [`Course::with_meeting`], which stamps both fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    id: String,
    categories: BTreeMap<Category, Vec<Arc<Meeting>>>,
}

impl Course {
    /// Creates a course with no meetings.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            categories: BTreeMap::new(),
        }
    }

    /// Adds a meeting owned by this course.
    pub fn with_meeting(
        mut self,
        meeting_id: impl Into<String>,
        category: Category,
        slots: Vec<TimeSlot>,
    ) -> Self {
        let meeting = Meeting::new(meeting_id, self.id.clone(), category).with_slots(slots);
        self.categories
            .entry(category)
            .or_default()
            .push(Arc::new(meeting));
        self
    }

    /// Catalog code.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Candidates for a category, if the course has that category.
    pub fn candidates(&self, category: Category) -> Option<&[Arc<Meeting>]> {
        self.categories.get(&category).map(Vec::as_slice)
    }

    /// Populated categories in group order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.keys().copied()
    }

    /// Looks up a meeting by id.
    pub fn meeting(&self, meeting_id: &str) -> Option<&Arc<Meeting>> {
        self.categories
            .values()
            .flatten()
            .find(|m| m.id == meeting_id)
    }

    /// Total number of meetings across categories.
    pub fn meeting_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// One meeting group per category, in category order.
    pub fn groups(&self) -> Vec<MeetingGroup> {
        self.categories
            .iter()
            .map(|(&category, candidates)| {
                MeetingGroup::new(self.id.clone(), category, candidates.clone())
            })
            .collect()
    }
}
