//! Course timetable enumeration for the U-Engine ecosystem.
//!
//! Given the courses a student wants and the catalog's meeting times,
//! enumerates every combination of lectures, tutorials and practicals that
//! can be attended without two meetings overlapping.
//!
//! # Modules
//!
//! - **`models`**: Domain types (`TimeSlot`, `Meeting`, `Course`,
//!   `MeetingGroup`, `Schedule`)
//! - **`grouping`**: Raw catalog records → meeting groups, with error collection
//! - **`search`**: Exhaustive branch-and-prune search (sequential or parallel)
//! - **`planner`**: Grouping and search in one call, with an outcome status
//! - **`catalog`**: JSON timetable export reader
//! - **`error`**: Error types
//!
//! # Example
//!
//! ```
//! use u_timetable::grouping::{CourseRequest, MeetingRecord};
//! use u_timetable::planner::{plan, PlanStatus};
//! use u_timetable::search::SearchConfig;
//!
//! let requests = vec![CourseRequest::new("CSC148")
//!     .with_meeting(MeetingRecord::new("LEC-0101", "LEC").with_slot("MO", "10:00", "11:00"))
//!     .with_meeting(MeetingRecord::new("TUT-0101", "TUT").with_slot("MO", "10:30", "11:30"))
//!     .with_meeting(MeetingRecord::new("TUT-0201", "TUT").with_slot("TH", "09:00", "10:00"))];
//!
//! let report = plan(&requests, &SearchConfig::default());
//! assert_eq!(report.status(), PlanStatus::Found(1));
//! ```

pub mod catalog;
pub mod error;
pub mod grouping;
pub mod models;
pub mod planner;
pub mod search;

pub use error::{CatalogError, CatalogLoadError, TimeParseError};
