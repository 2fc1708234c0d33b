//! Weekly time slot model.
//!
//! A time slot is one recurring weekly occurrence of a meeting: a weekday
//! plus a time-of-day interval with minute precision.
//!
//! # Time Model
//! Times are minutes since midnight. Intervals are half-open `[start, end)`,
//! so a slot ending at 11:00 does not collide with one starting at 11:00.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TimeParseError;

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Two-letter catalog code (`MO`, `TU`, ...).
    pub fn code(self) -> &'static str {
        match self {
            Weekday::Monday => "MO",
            Weekday::Tuesday => "TU",
            Weekday::Wednesday => "WE",
            Weekday::Thursday => "TH",
            Weekday::Friday => "FR",
            Weekday::Saturday => "SA",
            Weekday::Sunday => "SU",
        }
    }
}

impl FromStr for Weekday {
    type Err = TimeParseError;

    /// Accepts two-letter codes, three-letter abbreviations and full names,
    /// in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let day = match upper.as_str() {
            "MO" | "MON" | "MONDAY" => Weekday::Monday,
            "TU" | "TUE" | "TUESDAY" => Weekday::Tuesday,
            "WE" | "WED" | "WEDNESDAY" => Weekday::Wednesday,
            "TH" | "THU" | "THURSDAY" => Weekday::Thursday,
            "FR" | "FRI" | "FRIDAY" => Weekday::Friday,
            "SA" | "SAT" | "SATURDAY" => Weekday::Saturday,
            "SU" | "SUN" | "SUNDAY" => Weekday::Sunday,
            _ => return Err(TimeParseError::UnknownDay(s.to_string())),
        };
        Ok(day)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    /// Creates a time from hour (0-23) and minute (0-59).
    pub fn new(hour: u16, minute: u16) -> Result<Self, TimeParseError> {
        if hour > 23 || minute > 59 {
            return Err(TimeParseError::OutOfRange { hour, minute });
        }
        Ok(Self {
            minutes: hour * 60 + minute,
        })
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(self) -> u16 {
        self.minutes
    }

    pub fn hour(self) -> u16 {
        self.minutes / 60
    }

    pub fn minute(self) -> u16 {
        self.minutes % 60
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    /// Parses 24-hour `H:MM` or `HH:MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TimeParseError::InvalidFormat(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;

        let digits = |part: &str, max_len: usize| {
            !part.is_empty() && part.len() <= max_len && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !digits(h, 2) || !digits(m, 2) || m.len() != 2 {
            return Err(invalid());
        }

        let hour: u16 = h.parse().map_err(|_| invalid())?;
        let minute: u16 = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// One weekly occurrence `[start, end)` on a given day.
///
/// Invariant: `start < end`. Fields are private and there is no
/// `Deserialize`; raw input goes through [`TimeSlot::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimeSlot {
    day: Weekday,
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeSlot {
    /// Creates a slot, rejecting empty or inverted intervals.
    pub fn new(day: Weekday, start: TimeOfDay, end: TimeOfDay) -> Result<Self, TimeParseError> {
        if start >= end {
            return Err(TimeParseError::EmptyInterval { start, end });
        }
        Ok(Self { day, start, end })
    }

    /// Parses a slot from catalog strings, e.g. `("MO", "10:00", "11:00")`.
    pub fn parse(day: &str, start: &str, end: &str) -> Result<Self, TimeParseError> {
        Self::new(day.parse()?, start.parse()?, end.parse()?)
    }

    #[inline]
    pub fn day(&self) -> Weekday {
        self.day
    }

    #[inline]
    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    #[inline]
    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Length of the slot in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }

    /// Whether two slots collide: same day and intersecting half-open intervals.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.day, self.start, self.end)
    }
}

/// Free-function form of [`TimeSlot::overlaps`].
#[inline]
pub fn overlaps(a: &TimeSlot, b: &TimeSlot) -> bool {
    a.overlaps(b)
}
