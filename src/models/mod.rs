//! Timetable domain models.
//!
//! Provides the data types the schedule search works on, from a single
//! weekly time slot up to a complete schedule.
//!
//! # Layers
//!
//! | Type | Role |
//! |------|------|
//! | `TimeSlot` | One weekly occurrence (day + `[start, end)`) |
//! | `Meeting` | One enrollable section with its slots |
//! | `Course` | Meetings filed by `Category` |
//! | `MeetingGroup` | Candidates for one (course, category) pair |
//! | `Schedule` | One chosen meeting per group |

mod course;
mod group;
mod meeting;
mod schedule;
mod time_slot;

pub use course::Course;
pub use group::{conflicts_with_schedule, MeetingGroup};
pub use meeting::{Category, Meeting};
pub use schedule::{GroupKey, Schedule};
pub use time_slot::{overlaps, TimeOfDay, TimeSlot, Weekday};
