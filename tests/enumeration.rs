//! End-to-end checks over randomly generated catalogs.

use std::collections::HashSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use u_timetable::grouping::{build_groups, CourseRequest, MeetingRecord};
use u_timetable::models::{MeetingGroup, Schedule};
use u_timetable::planner::{plan, PlanStatus};
use u_timetable::search::{ScheduleSearch, SearchConfig};

const DAYS: [&str; 5] = ["MO", "TU", "WE", "TH", "FR"];
const TAGS: [&str; 3] = ["LEC", "TUT", "PRA"];

/// Random catalog: every course has a lecture and at least one more
/// category; every group has 2 to `max_candidates` candidates with 1-2
/// slots each.
fn random_requests(rng: &mut StdRng, courses: usize, max_candidates: usize) -> Vec<CourseRequest> {
    (0..courses)
        .map(|c| {
            let mut request = CourseRequest::new(format!("C{c:02}"));
            let categories = rng.random_range(2..=3);
            for tag in &TAGS[..categories] {
                let candidates = rng.random_range(2..=max_candidates);
                for i in 0..candidates {
                    let mut record = MeetingRecord::new(format!("{tag}-{i:02}01"), *tag);
                    for _ in 0..rng.random_range(1..=2) {
                        let day = DAYS[rng.random_range(0..DAYS.len())];
                        let hour: u16 = rng.random_range(8..=18);
                        let length: u16 = rng.random_range(1..=2);
                        record = record.with_slot(
                            day,
                            &format!("{hour}:00"),
                            &format!("{}:00", hour + length),
                        );
                    }
                    request = request.with_meeting(record);
                }
            }
            request
        })
        .collect()
}

fn brute_force(groups: &[MeetingGroup]) -> HashSet<Schedule> {
    let mut all = vec![Schedule::new()];
    for group in groups {
        all = all
            .iter()
            .flat_map(|s| {
                group
                    .candidates()
                    .iter()
                    .map(move |m| s.with_selection(Arc::clone(m)))
            })
            .collect();
    }
    all.into_iter().filter(|s| !s.has_internal_conflict()).collect()
}

#[test]
fn test_random_catalogs_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..10 {
        let requests = random_requests(&mut rng, 3, 3);
        let report = build_groups(&requests);
        assert!(report.errors.is_empty());

        let found = ScheduleSearch::new(SearchConfig::sequential()).run(&report.groups);
        let expected = brute_force(&report.groups);

        let found_set: HashSet<Schedule> = found.schedules.iter().cloned().collect();
        assert_eq!(found_set.len(), found.schedules.len(), "duplicate schedules");
        assert_eq!(found_set, expected);
    }
}

#[test]
fn test_random_catalogs_parallel_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(42);
    for round in 0..6 {
        let requests = random_requests(&mut rng, 4, 3);
        let groups = build_groups(&requests).groups;
        assert!(groups.len() >= 8);

        let sequential = ScheduleSearch::new(SearchConfig::sequential()).run(&groups);
        let parallel = ScheduleSearch::new(
            SearchConfig::parallel()
                .with_max_workers(1 + round % 4)
                .with_split_depth(1 + round % 3),
        )
        .run(&groups);

        assert!(parallel.completed);
        assert_eq!(parallel.stats, sequential.stats);
        let a: HashSet<&Schedule> = sequential.schedules.iter().collect();
        let b: HashSet<&Schedule> = parallel.schedules.iter().collect();
        assert_eq!(a, b);
    }
}

#[test]
fn test_every_result_is_pairwise_conflict_free() {
    let mut rng = StdRng::seed_from_u64(7);
    let requests = random_requests(&mut rng, 4, 3);
    let report = plan(&requests, &SearchConfig::parallel().with_max_workers(3));

    for schedule in &report.schedules {
        let meetings: Vec<_> = schedule.meetings().collect();
        assert_eq!(meetings.len(), build_groups(&requests).groups.len());
        for (i, a) in meetings.iter().enumerate() {
            for b in &meetings[i + 1..] {
                for x in &a.slots {
                    for y in &b.slots {
                        assert!(!x.overlaps(y), "{} {x} overlaps {} {y}", a.id, b.id);
                    }
                }
            }
        }
    }
    match report.status() {
        PlanStatus::Found(n) => assert_eq!(n, report.schedules.len()),
        PlanStatus::NoConflictFreeSchedule => assert!(report.schedules.is_empty()),
        other => panic!("unexpected status {other:?}"),
    }
}
