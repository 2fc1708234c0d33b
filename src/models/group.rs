//! Meeting groups and the schedule conflict predicate.
//!
//! A meeting group is the search engine's choice point: one (course,
//! category) pair and the ordered candidates for it.

use serde::Serialize;
use std::sync::Arc;

use super::{Category, GroupKey, Meeting, Schedule};

/// Candidates for one (course, category) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeetingGroup {
    course_id: String,
    category: Category,
    candidates: Vec<Arc<Meeting>>,
}

impl MeetingGroup {
    /// Creates a group. Candidate order is preserved and determines the
    /// order in which the search tries them.
    ///
    /// The search files each chosen candidate under this group's key, so a
    /// candidate tagged with another course or category still fills exactly
    /// this group.
    pub fn new(course_id: impl Into<String>, category: Category, candidates: Vec<Arc<Meeting>>) -> Self {
        Self {
            course_id: course_id.into(),
            category,
            candidates,
        }
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn candidates(&self) -> &[Arc<Meeting>] {
        &self.candidates
    }

    pub fn key(&self) -> GroupKey {
        GroupKey::new(self.course_id.clone(), self.category)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Whether `meeting` conflicts with anything already selected in `schedule`.
///
/// Checks every slot of `meeting` against every slot of every selection,
/// not just the most recent one.
pub fn conflicts_with_schedule(meeting: &Meeting, schedule: &Schedule) -> bool {
    schedule.meetings().any(|selected| meeting.conflicts_with(selected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeSlot;

    fn meeting(course: &str, id: &str, category: Category, slots: &[(&str, &str, &str)]) -> Arc<Meeting> {
        let slots = slots
            .iter()
            .map(|(d, s, e)| TimeSlot::parse(d, s, e).unwrap())
            .collect();
        Arc::new(Meeting::new(id, course, category).with_slots(slots))
    }

    #[test]
    fn test_group_accessors() {
        let group = MeetingGroup::new(
            "CSC148",
            Category::Tutorial,
            vec![
                meeting("CSC148", "TUT-0101", Category::Tutorial, &[("MO", "09:00", "10:00")]),
                meeting("CSC148", "TUT-0201", Category::Tutorial, &[("TU", "09:00", "10:00")]),
            ],
        );
        assert_eq!(group.course_id(), "CSC148");
        assert_eq!(group.category(), Category::Tutorial);
        assert_eq!(group.len(), 2);
        assert!(!group.is_empty());
        assert_eq!(group.key(), GroupKey::new("CSC148", Category::Tutorial));
        assert_eq!(group.candidates()[1].id, "TUT-0201");
    }

    #[test]
    fn test_conflict_with_empty_schedule() {
        let m = meeting("A", "LEC-1", Category::Lecture, &[("MO", "10:00", "11:00")]);
        assert!(!conflicts_with_schedule(&m, &Schedule::new()));
    }

    #[test]
    fn test_conflict_checks_earlier_selections() {
        // The first selection conflicts with the candidate; the newest does not.
        let schedule = Schedule::new()
            .with_selection(meeting("A", "LEC-1", Category::Lecture, &[("MO", "10:00", "11:00")]))
            .with_selection(meeting("B", "LEC-1", Category::Lecture, &[("TU", "10:00", "11:00")]));

        let candidate = meeting("C", "LEC-1", Category::Lecture, &[("MO", "10:30", "11:30")]);
        assert!(conflicts_with_schedule(&candidate, &schedule));
    }

    #[test]
    fn test_conflict_checks_all_slots() {
        let schedule = Schedule::new().with_selection(meeting(
            "A",
            "LEC-1",
            Category::Lecture,
            &[("MO", "10:00", "11:00"), ("WE", "10:00", "11:00")],
        ));

        let clear = meeting("B", "TUT-1", Category::Tutorial, &[("MO", "11:00", "12:00"), ("WE", "09:00", "10:00")]);
        let clash = meeting("B", "TUT-2", Category::Tutorial, &[("MO", "12:00", "13:00"), ("WE", "09:30", "10:30")]);

        assert!(!conflicts_with_schedule(&clear, &schedule));
        assert!(conflicts_with_schedule(&clash, &schedule));
    }
}
