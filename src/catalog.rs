//! JSON course catalog adapter.
//!
//! Reads the timetable export format: one file per session
//! (`coursesF.json`, `coursesS.json`, `coursesY.json`), an object keyed by
//! section code, each course holding its meetings keyed by meeting name and
//! each meeting holding its weekly slots keyed by slot id.
//!
//! ```json
//! {
//!   "CSC148H1-F-20189": {
//!     "courseId": "12345", "code": "CSC148H1", "courseTitle": "Intro",
//!     "section": "F",
//!     "meetings": {
//!       "LEC-0101": {
//!         "teachingMethod": "LEC", "sectionNumber": "0101",
//!         "schedule": {
//!           "MO-1": { "meetingDay": "MO", "meetingStartTime": "10:00",
//!                     "meetingEndTime": "11:00" }
//!         }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Only the fields needed to build [`CourseRequest`]s (plus a few for
//! display) are read; everything else is ignored. Maps are kept sorted so
//! meeting order is stable across loads.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, info};

use crate::error::CatalogLoadError;
use crate::grouping::{CourseRequest, MeetingRecord, SlotRecord};

/// Academic session a catalog file covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Session {
    /// `F`: first term.
    Fall,
    /// `S`: second term.
    Spring,
    /// `Y`: full year.
    Year,
}

impl Session {
    pub fn code(self) -> &'static str {
        match self {
            Session::Fall => "F",
            Session::Spring => "S",
            Session::Year => "Y",
        }
    }

    /// Catalog file name for this session.
    pub fn file_name(self) -> String {
        format!("courses{}.json", self.code())
    }
}

impl FromStr for Session {
    type Err = CatalogLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "F" => Ok(Session::Fall),
            "S" => Ok(Session::Spring),
            "Y" => Ok(Session::Year),
            _ => Err(CatalogLoadError::UnknownSession(s.to_string())),
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One weekly slot as exported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogSlot {
    pub meeting_day: Option<String>,
    pub meeting_start_time: Option<String>,
    pub meeting_end_time: Option<String>,
    pub assigned_room1: Option<String>,
    pub assigned_room2: Option<String>,
}

/// An instructor entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogInstructor {
    pub first_name: String,
    pub last_name: String,
}

/// One meeting (section) as exported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogMeeting {
    /// `LEC`, `TUT` or `PRA`.
    pub teaching_method: String,
    pub section_number: String,
    #[serde(deserialize_with = "map_or_list")]
    pub schedule: BTreeMap<String, CatalogSlot>,
    #[serde(deserialize_with = "map_or_list")]
    pub instructors: BTreeMap<String, CatalogInstructor>,
}

impl CatalogMeeting {
    /// Converts to a raw meeting record. Missing day or time strings become
    /// empty strings, which grouping reports as malformed.
    pub fn to_record(&self, meeting_id: &str) -> MeetingRecord {
        let mut record = MeetingRecord::new(meeting_id, self.teaching_method.clone());
        record.slots = self
            .schedule
            .values()
            .map(|slot| {
                SlotRecord::new(
                    slot.meeting_day.clone().unwrap_or_default(),
                    slot.meeting_start_time.clone().unwrap_or_default(),
                    slot.meeting_end_time.clone().unwrap_or_default(),
                )
            })
            .collect();
        record
    }
}

/// One course section as exported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogCourse {
    pub course_id: String,
    pub code: String,
    pub course_title: String,
    /// Session code of this offering (`F`, `S`, `Y`).
    pub section: String,
    #[serde(deserialize_with = "map_or_list")]
    pub meetings: BTreeMap<String, CatalogMeeting>,
}

impl CatalogCourse {
    /// Converts to a course request identified by `key`.
    pub fn to_request(&self, key: &str) -> CourseRequest {
        CourseRequest {
            id: key.to_string(),
            meetings: self
                .meetings
                .iter()
                .map(|(name, meeting)| meeting.to_record(name))
                .collect(),
        }
    }
}

/// A loaded catalog, keyed by section code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    courses: BTreeMap<String, CatalogCourse>,
}

impl Catalog {
    /// Parses a catalog from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogLoadError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        debug!(courses = catalog.len(), "catalog parsed");
        Ok(catalog)
    }

    /// Reads a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogLoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&text)?;
        info!(path = %path.display(), courses = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Reads the catalog file for `session` from `dir`.
    pub fn load_session(dir: impl AsRef<Path>, session: Session) -> Result<Self, CatalogLoadError> {
        Self::load(dir.as_ref().join(session.file_name()))
    }

    /// First course, in key order, whose key contains `code`.
    pub fn find(&self, code: &str) -> Option<(&str, &CatalogCourse)> {
        self.courses
            .iter()
            .find(|(key, _)| key.contains(code))
            .map(|(key, course)| (key.as_str(), course))
    }

    /// Course request for the first course matching `code`.
    pub fn request(&self, code: &str) -> Result<CourseRequest, CatalogLoadError> {
        self.find(code)
            .map(|(key, course)| course.to_request(key))
            .ok_or_else(|| CatalogLoadError::CourseNotFound(code.to_string()))
    }

    /// Requests for several codes, failing on the first unknown code.
    pub fn requests<S: AsRef<str>>(&self, codes: &[S]) -> Result<Vec<CourseRequest>, CatalogLoadError> {
        codes.iter().map(|code| self.request(code.as_ref())).collect()
    }

    pub fn get(&self, key: &str) -> Option<&CatalogCourse> {
        self.courses.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.courses.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

/// Exports write empty collections as `[]` and sometimes `null`; accept
/// those alongside the usual object form.
fn map_or_list<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MapOrList<T> {
        Map(BTreeMap<String, T>),
        List(Vec<T>),
    }

    Ok(match Option::<MapOrList<T>>::deserialize(deserializer)? {
        None => BTreeMap::new(),
        Some(MapOrList::Map(map)) => map,
        Some(MapOrList::List(list)) => list
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::build_groups;
    use crate::models::Category;
    use crate::planner::{plan, PlanStatus};
    use crate::search::SearchConfig;

    const SAMPLE: &str = r#"{
        "CSC148H1-F-20189": {
            "courseId": "47001", "code": "CSC148H1", "courseTitle": "Introduction to Computer Science",
            "section": "F", "prerequisite": "CSC108H1",
            "meetings": {
                "LEC-0101": {
                    "teachingMethod": "LEC", "sectionNumber": "0101", "cancel": "",
                    "instructors": {"1": {"instructorId": "1", "firstName": "Ada", "lastName": "Byron"}},
                    "schedule": {
                        "MO-1": {"meetingDay": "MO", "meetingStartTime": "10:00", "meetingEndTime": "11:00",
                                 "meetingScheduleId": "1", "assignedRoom1": "BA1160", "assignedRoom2": null},
                        "WE-2": {"meetingDay": "WE", "meetingStartTime": "10:00", "meetingEndTime": "11:00"}
                    }
                },
                "LEC-0201": {
                    "teachingMethod": "LEC", "sectionNumber": "0201", "instructors": [],
                    "schedule": {
                        "TU-1": {"meetingDay": "TU", "meetingStartTime": "13:00", "meetingEndTime": "14:00"}
                    }
                },
                "TUT-0101": {
                    "teachingMethod": "TUT", "sectionNumber": "0101", "instructors": [],
                    "schedule": {
                        "MO-1": {"meetingDay": "MO", "meetingStartTime": "10:30", "meetingEndTime": "11:30"}
                    }
                }
            }
        },
        "MAT137Y1-Y-20189": {
            "courseId": "48002", "code": "MAT137Y1", "courseTitle": "Calculus", "section": "Y",
            "meetings": {
                "LEC-0101": {
                    "teachingMethod": "LEC", "sectionNumber": "0101",
                    "schedule": {
                        "FR-1": {"meetingDay": "FR", "meetingStartTime": null, "meetingEndTime": null}
                    }
                }
            }
        }
    }"#;

    #[test]
    fn test_session_codes() {
        assert_eq!("F".parse::<Session>().unwrap(), Session::Fall);
        assert_eq!("s".parse::<Session>().unwrap(), Session::Spring);
        assert_eq!("Y".parse::<Session>().unwrap(), Session::Year);
        assert!(matches!(
            "W".parse::<Session>(),
            Err(CatalogLoadError::UnknownSession(s)) if s == "W"
        ));
        assert_eq!(Session::Fall.file_name(), "coursesF.json");
        assert_eq!(Session::Year.to_string(), "Y");
    }

    #[test]
    fn test_parse_sample() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.keys().collect::<Vec<_>>(),
            vec!["CSC148H1-F-20189", "MAT137Y1-Y-20189"]
        );

        let csc = catalog.get("CSC148H1-F-20189").unwrap();
        assert_eq!(csc.code, "CSC148H1");
        assert_eq!(csc.meetings.len(), 3);
        let lec = &csc.meetings["LEC-0101"];
        assert_eq!(lec.schedule.len(), 2);
        assert_eq!(lec.instructors["1"].last_name, "Byron");
        assert!(csc.meetings["LEC-0201"].instructors.is_empty());
    }

    #[test]
    fn test_find_by_partial_code() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();
        let (key, course) = catalog.find("CSC148").unwrap();
        assert_eq!(key, "CSC148H1-F-20189");
        assert_eq!(course.course_title, "Introduction to Computer Science");
        assert!(catalog.find("PHL100").is_none());
        assert!(matches!(
            catalog.request("PHL100"),
            Err(CatalogLoadError::CourseNotFound(code)) if code == "PHL100"
        ));
    }

    #[test]
    fn test_request_conversion() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();
        let request = catalog.request("CSC148").unwrap();
        assert_eq!(request.id, "CSC148H1-F-20189");
        let ids: Vec<&str> = request.meetings.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["LEC-0101", "LEC-0201", "TUT-0101"]);
        assert_eq!(request.meetings[0].slots[0], SlotRecord::new("MO", "10:00", "11:00"));
        assert_eq!(request.meetings[2].category, "TUT");
    }

    #[test]
    fn test_missing_times_surface_as_malformed() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();
        let requests = catalog.requests(&["MAT137"]).unwrap();
        let report = build_groups(&requests);
        assert_eq!(report.groups.len(), 1);
        assert!(report.groups[0].is_empty());
        assert_eq!(report.data_errors().count(), 1);
    }

    #[test]
    fn test_catalog_to_schedules() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();
        let requests = catalog.requests(&["CSC148"]).unwrap();
        let report = plan(&requests, &SearchConfig::default());

        // TUT-0101 clashes with LEC-0101 on Monday, leaving LEC-0201.
        assert_eq!(report.status(), PlanStatus::Found(1));
        let s = &report.schedules[0];
        assert_eq!(s.meeting_for("CSC148H1-F-20189", Category::Lecture).unwrap().id, "LEC-0201");
        assert_eq!(s.meeting_for("CSC148H1-F-20189", Category::Tutorial).unwrap().id, "TUT-0101");
    }

    #[test]
    fn test_load_session_file() {
        let dir = std::env::temp_dir().join(format!("u-timetable-catalog-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(Session::Fall.file_name()), SAMPLE).unwrap();

        let catalog = Catalog::load_session(&dir, Session::Fall).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(matches!(
            Catalog::load_session(&dir, Session::Spring),
            Err(CatalogLoadError::Io(_))
        ));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Catalog::from_json_str("{not json"),
            Err(CatalogLoadError::Json(_))
        ));
    }
}
