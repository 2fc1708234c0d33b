//! Error types.
//!
//! Catalog data problems are reported as values, never as panics. The
//! grouping step collects [`CatalogError`]s and keeps going; the search
//! itself has no error path.

use thiserror::Error;

use crate::models::{Category, TimeOfDay};

/// A meeting time that cannot be turned into a [`TimeSlot`](crate::models::TimeSlot).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    /// Not a 24-hour `H:MM` / `HH:MM` string.
    #[error("invalid time format: {0:?}")]
    InvalidFormat(String),

    /// Hour or minute outside the clock range.
    #[error("time out of range: {hour}:{minute:02}")]
    OutOfRange { hour: u16, minute: u16 },

    /// Day code not recognised.
    #[error("unknown day: {0:?}")]
    UnknownDay(String),

    /// End is not after start.
    #[error("empty interval: {start}-{end}")]
    EmptyInterval { start: TimeOfDay, end: TimeOfDay },
}

/// A problem found while turning catalog records into meeting groups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A slot of the meeting could not be parsed; the meeting is dropped.
    #[error("malformed time in {course_id}/{meeting_id}: {source}")]
    MalformedTime {
        course_id: String,
        meeting_id: String,
        #[source]
        source: TimeParseError,
    },

    /// Category tag not recognised; the whole course is dropped.
    #[error("unknown category {tag:?} for meeting {course_id}/{meeting_id}")]
    UnknownCategory {
        course_id: String,
        meeting_id: String,
        tag: String,
    },

    /// Every candidate of a category was filtered out. Informational: no
    /// schedule can include the course, so it is dropped from the search.
    #[error("no usable {category} candidates remain for {course_id}")]
    EmptyCandidateSet { course_id: String, category: Category },

    /// Meeting id repeated within a course; the later record is dropped.
    #[error("duplicate meeting id {meeting_id} in {course_id}")]
    DuplicateMeeting {
        course_id: String,
        meeting_id: String,
    },

    /// Course requested more than once; the later request is ignored.
    #[error("course {course_id} requested more than once")]
    DuplicateCourse { course_id: String },
}

impl CatalogError {
    /// Course the error belongs to.
    pub fn course_id(&self) -> &str {
        match self {
            CatalogError::MalformedTime { course_id, .. }
            | CatalogError::UnknownCategory { course_id, .. }
            | CatalogError::EmptyCandidateSet { course_id, .. }
            | CatalogError::DuplicateMeeting { course_id, .. }
            | CatalogError::DuplicateCourse { course_id } => course_id,
        }
    }

    /// Whether this is a notice rather than a data error.
    pub fn is_informational(&self) -> bool {
        matches!(self, CatalogError::EmptyCandidateSet { .. })
    }

    /// Whether the error removed the whole course from the search.
    pub fn excludes_course(&self) -> bool {
        matches!(
            self,
            CatalogError::UnknownCategory { .. } | CatalogError::EmptyCandidateSet { .. }
        )
    }
}

/// Errors from the JSON catalog adapter.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// Session code other than `F`, `S` or `Y`.
    #[error("unknown session: {0:?}")]
    UnknownSession(String),

    #[error("course not found: {0}")]
    CourseNotFound(String),
}
