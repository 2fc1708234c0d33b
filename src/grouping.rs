//! Grouping of raw catalog records into meeting groups.
//!
//! Turns per-course meeting records (strings straight from a catalog) into
//! [`Course`]s and the ordered [`MeetingGroup`] list the search consumes.
//! Data problems are collected, not raised:
//!
//! | Problem | Effect |
//! |---------|--------|
//! | Unknown category tag | Whole course excluded |
//! | Unparseable slot | That meeting excluded |
//! | Repeated meeting id | Later record excluded |
//! | Repeated course | Later request ignored |
//! | Category emptied by the above | Whole course excluded, notice recorded |
//!
//! A category with no records at all is not a requirement of the course and
//! produces no group.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, warn};

use crate::error::{CatalogError, TimeParseError};
use crate::models::{Category, Course, MeetingGroup, TimeSlot};

/// One weekly occurrence as catalog strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    pub day: String,
    pub start: String,
    pub end: String,
}

impl SlotRecord {
    pub fn new(day: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            start: start.into(),
            end: end.into(),
        }
    }
}

/// One meeting as catalog strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRecord {
    pub id: String,
    /// Category tag, e.g. `LEC`, `TUT`, `PRA`.
    pub category: String,
    #[serde(default)]
    pub slots: Vec<SlotRecord>,
}

impl MeetingRecord {
    pub fn new(id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            slots: Vec::new(),
        }
    }

    /// Adds a slot.
    pub fn with_slot(mut self, day: &str, start: &str, end: &str) -> Self {
        self.slots.push(SlotRecord::new(day, start, end));
        self
    }
}

/// A requested course and its raw meetings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRequest {
    pub id: String,
    #[serde(default)]
    pub meetings: Vec<MeetingRecord>,
}

impl CourseRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            meetings: Vec::new(),
        }
    }

    /// Adds a meeting record.
    pub fn with_meeting(mut self, meeting: MeetingRecord) -> Self {
        self.meetings.push(meeting);
        self
    }
}

/// Output of [`build_groups`].
#[derive(Debug, Clone, Default)]
pub struct GroupingReport {
    /// Courses that survived, in request order.
    pub courses: Vec<Course>,
    /// Search input: per course in request order, categories in
    /// Lecture, Tutorial, Practical order.
    pub groups: Vec<MeetingGroup>,
    /// Every problem found, in discovery order.
    pub errors: Vec<CatalogError>,
}

impl GroupingReport {
    /// Errors other than informational notices.
    pub fn data_errors(&self) -> impl Iterator<Item = &CatalogError> {
        self.errors.iter().filter(|e| !e.is_informational())
    }

    /// Ids of courses removed from the search entirely.
    pub fn excluded_courses(&self) -> BTreeSet<&str> {
        self.errors
            .iter()
            .filter(|e| e.excludes_course())
            .map(CatalogError::course_id)
            .collect()
    }

    /// Whether any group has no candidates (so no schedule can exist).
    pub fn has_empty_group(&self) -> bool {
        self.groups.iter().any(MeetingGroup::is_empty)
    }
}

/// Builds meeting groups from raw course requests.
///
/// Never fails: every problem lands in [`GroupingReport::errors`].
/// Deterministic for a given input.
pub fn build_groups(requests: &[CourseRequest]) -> GroupingReport {
    let mut report = GroupingReport::default();
    let mut seen_courses = HashSet::new();

    for request in requests {
        if !seen_courses.insert(request.id.as_str()) {
            warn!(course = %request.id, "course requested twice, ignoring repeat");
            report.errors.push(CatalogError::DuplicateCourse {
                course_id: request.id.clone(),
            });
            continue;
        }

        match build_course(request, &mut report.errors) {
            Some(course) => {
                debug!(
                    course = %course.id(),
                    meetings = course.meeting_count(),
                    "course grouped"
                );
                report.groups.extend(course.groups());
                report.courses.push(course);
            }
            None => warn!(course = %request.id, "course excluded from search"),
        }
    }

    report
}

/// Builds one course, or `None` if it must be excluded.
fn build_course(request: &CourseRequest, errors: &mut Vec<CatalogError>) -> Option<Course> {
    // Categories are checked up front: an unknown tag anywhere voids the
    // course, so nothing else about it is reported.
    let mut categorized = Vec::with_capacity(request.meetings.len());
    let mut unknown = Vec::new();
    for record in &request.meetings {
        match Category::from_tag(&record.category) {
            Some(category) => categorized.push((record, category)),
            None => unknown.push(CatalogError::UnknownCategory {
                course_id: request.id.clone(),
                meeting_id: record.id.clone(),
                tag: record.category.clone(),
            }),
        }
    }
    if !unknown.is_empty() {
        errors.extend(unknown);
        return None;
    }

    let mut course = Course::new(request.id.clone());
    let mut requested = BTreeSet::new();
    let mut seen_meetings = HashSet::new();

    for (record, category) in categorized {
        requested.insert(category);

        if !seen_meetings.insert(record.id.as_str()) {
            errors.push(CatalogError::DuplicateMeeting {
                course_id: request.id.clone(),
                meeting_id: record.id.clone(),
            });
            continue;
        }

        match parse_slots(&record.slots) {
            Ok(slots) => course = course.with_meeting(record.id.clone(), category, slots),
            Err(source) => {
                debug!(course = %request.id, meeting = %record.id, error = %source, "meeting dropped");
                errors.push(CatalogError::MalformedTime {
                    course_id: request.id.clone(),
                    meeting_id: record.id.clone(),
                    source,
                });
            }
        }
    }

    // A category the catalog offers but that lost every candidate can never
    // be satisfied, so no schedule can include the course.
    let emptied: Vec<Category> = requested
        .into_iter()
        .filter(|&category| course.candidates(category).is_none())
        .collect();
    if !emptied.is_empty() {
        errors.extend(emptied.into_iter().map(|category| CatalogError::EmptyCandidateSet {
            course_id: request.id.clone(),
            category,
        }));
        return None;
    }

    Some(course)
}

fn parse_slots(records: &[SlotRecord]) -> Result<Vec<TimeSlot>, TimeParseError> {
    records
        .iter()
        .map(|r| TimeSlot::parse(&r.day, &r.start, &r.end))
        .collect()
}
