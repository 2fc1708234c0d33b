//! One-call planning: grouping plus search.
//!
//! [`plan`] takes raw course requests, builds meeting groups, runs the
//! search, and reports both catalog errors and schedules. [`PlanStatus`]
//! tells apart the ways a plan can end up with nothing useful.

use serde::Serialize;
use tracing::info;

use crate::error::CatalogError;
use crate::grouping::{build_groups, CourseRequest};
use crate::models::Schedule;
use crate::search::{CancelToken, ScheduleSearch, SearchConfig, SearchStats};

/// How a plan turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlanStatus {
    /// No courses were requested; the only schedule is the empty one.
    NothingRequested,
    /// Courses were requested but catalog errors excluded all of them.
    AllCoursesExcluded,
    /// The search finished and every combination conflicted.
    NoConflictFreeSchedule,
    /// The search was cancelled; schedules are partial results.
    Cancelled,
    /// This many schedules were found.
    Found(usize),
}

/// Everything a caller needs to render a plan.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    /// Catalog problems found while grouping, including notices.
    #[serde(serialize_with = "serialize_errors")]
    pub errors: Vec<CatalogError>,
    /// Conflict-free schedules.
    pub schedules: Vec<Schedule>,
    status: PlanStatus,
    #[serde(skip)]
    stats: SearchStats,
}

impl PlanReport {
    pub fn status(&self) -> PlanStatus {
        self.status
    }

    /// Search counters; all zero when the search was skipped.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

#[allow(clippy::ptr_arg)]
fn serialize_errors<S: serde::Serializer>(errors: &Vec<CatalogError>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(errors.iter().map(ToString::to_string))
}

/// Builder-style planner holding search settings.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: SearchConfig,
    cancel: CancelToken,
}

impl Planner {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            cancel: CancelToken::new(),
        }
    }

    /// Uses an externally held cancel token.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Groups the requests and enumerates schedules.
    pub fn plan(&self, requests: &[CourseRequest]) -> PlanReport {
        let grouping = build_groups(requests);

        if !requests.is_empty() && grouping.courses.is_empty() {
            info!(errors = grouping.errors.len(), "every requested course was excluded");
            return PlanReport {
                errors: grouping.errors,
                schedules: Vec::new(),
                status: PlanStatus::AllCoursesExcluded,
                stats: SearchStats::default(),
            };
        }

        let outcome = ScheduleSearch::new(self.config.clone())
            .with_cancel_token(self.cancel.clone())
            .run(&grouping.groups);

        let status = if !outcome.completed {
            PlanStatus::Cancelled
        } else if requests.is_empty() {
            PlanStatus::NothingRequested
        } else if outcome.schedules.is_empty() {
            PlanStatus::NoConflictFreeSchedule
        } else {
            PlanStatus::Found(outcome.schedules.len())
        };

        PlanReport {
            errors: grouping.errors,
            schedules: outcome.schedules,
            status,
            stats: outcome.stats,
        }
    }
}

/// Plans with the given settings. See [`Planner::plan`].
///
/// # Example
/// ```
/// use u_timetable::grouping::{CourseRequest, MeetingRecord};
/// use u_timetable::planner::{plan, PlanStatus};
/// use u_timetable::search::SearchConfig;
///
/// let requests = vec![
///     CourseRequest::new("A")
///         .with_meeting(MeetingRecord::new("LEC-1", "LEC").with_slot("MO", "10:00", "11:00")),
///     CourseRequest::new("B")
///         .with_meeting(MeetingRecord::new("LEC-1", "LEC").with_slot("MO", "10:30", "11:30"))
///         .with_meeting(MeetingRecord::new("LEC-2", "LEC").with_slot("TU", "10:00", "11:00")),
/// ];
///
/// let report = plan(&requests, &SearchConfig::default());
/// assert_eq!(report.status(), PlanStatus::Found(1));
/// assert!(report.errors.is_empty());
/// ```
pub fn plan(requests: &[CourseRequest], config: &SearchConfig) -> PlanReport {
    Planner::new(config.clone()).plan(requests)
}
