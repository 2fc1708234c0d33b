//! Schedule (solution) model.
//!
//! A schedule assigns exactly one meeting to each (course, category) pair
//! it covers. During search it is partial; at a search leaf it is complete.
//!
//! Schedules are persistent values: [`Schedule::with_selection`] returns a
//! new schedule and leaves the original untouched, so sibling branches of
//! the search can share a prefix without coordinating.

use serde::ser::{Serialize, Serializer};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::{Category, Meeting};

/// Identity of a selection: one (course, category) pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, Deserialize)]
pub struct GroupKey {
    pub course_id: String,
    pub category: Category,
}

impl GroupKey {
    pub fn new(course_id: impl Into<String>, category: Category) -> Self {
        Self {
            course_id: course_id.into(),
            category,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.course_id, self.category.tag())
    }
}

/// A set of chosen meetings keyed by (course, category).
///
/// Equality and hashing are by content, so result lists from different
/// search strategies can be compared as sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Schedule {
    selections: BTreeMap<GroupKey, Arc<Meeting>>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this schedule with `meeting` selected for its own
    /// (course, category) pair. Meetings are shared, not cloned.
    pub fn with_selection(&self, meeting: Arc<Meeting>) -> Self {
        let key = GroupKey::new(meeting.course_id.clone(), meeting.category);
        self.with_selection_for(key, meeting)
    }

    /// Returns a copy of this schedule with `meeting` filling the group
    /// `key`, whatever the meeting's own course and category say.
    pub fn with_selection_for(&self, key: GroupKey, meeting: Arc<Meeting>) -> Self {
        let mut selections = self.selections.clone();
        selections.insert(key, meeting);
        Self { selections }
    }

    /// Selections in key order.
    pub fn selections(&self) -> impl Iterator<Item = (&GroupKey, &Meeting)> {
        self.selections.iter().map(|(k, m)| (k, m.as_ref()))
    }

    /// Selected meetings in key order.
    pub fn meetings(&self) -> impl Iterator<Item = &Meeting> {
        self.selections.values().map(|m| m.as_ref())
    }

    /// The meeting chosen for a (course, category) pair.
    pub fn meeting_for(&self, course_id: &str, category: Category) -> Option<&Meeting> {
        self.selections
            .get(&GroupKey::new(course_id, category))
            .map(|m| m.as_ref())
    }

    /// Flattened view for renderers: (course, category) → meeting id.
    pub fn meeting_ids(&self) -> BTreeMap<GroupKey, String> {
        self.selections
            .iter()
            .map(|(k, m)| (k.clone(), m.id.clone()))
            .collect()
    }

    /// Whether any two selected meetings conflict.
    ///
    /// The search never produces such a schedule; this is the full pairwise
    /// check used to verify results.
    pub fn has_internal_conflict(&self) -> bool {
        let meetings: Vec<&Meeting> = self.meetings().collect();
        meetings.iter().enumerate().any(|(i, a)| {
            meetings[i + 1..].iter().any(|b| a.conflicts_with(b))
        })
    }

    /// Total weekly contact time across all selections (minutes).
    pub fn weekly_minutes(&self) -> u32 {
        self.meetings().map(Meeting::weekly_minutes).sum()
    }

    /// Number of selections.
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

impl Serialize for Schedule {
    /// Serialized as the list of selected meetings; each meeting carries
    /// its own course id and category.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.meetings())
    }
}
