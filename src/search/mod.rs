//! Exhaustive conflict-free schedule search.
//!
//! Given an ordered list of [`MeetingGroup`](crate::models::MeetingGroup)s,
//! the engine picks one candidate per group in every way that leaves no two
//! picks overlapping, pruning a branch as soon as a pick conflicts.
//!
//! # Usage
//!
//! ```
//! use u_timetable::search::{enumerate, CancelToken, ScheduleSearch, SearchConfig};
//!
//! // No groups: exactly one (empty) schedule.
//! assert_eq!(enumerate(&[]).len(), 1);
//!
//! let cancel = CancelToken::new();
//! let search = ScheduleSearch::new(SearchConfig::parallel()).with_cancel_token(cancel.clone());
//! let outcome = search.run(&[]);
//! assert!(outcome.completed);
//! ```
//!
//! Sequential and parallel strategies return the same set of schedules;
//! only the order may differ.

mod cancel;
mod config;
mod engine;
mod result_set;

pub use cancel::CancelToken;
pub use config::{SearchConfig, Strategy};
pub use engine::{enumerate, ScheduleSearch, SearchOutcome, SearchStats};
pub use result_set::ResultSet;
