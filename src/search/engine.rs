//! Branch-and-prune schedule enumeration.
//!
//! # Algorithm
//!
//! 1. State: a partial schedule and the index of the next group.
//! 2. No groups left: the schedule is complete; publish it.
//! 3. Otherwise, for each candidate of the next group (catalog order):
//!    skip it if it conflicts with any current selection, else recurse
//!    with the extended schedule.
//!
//! Conflicting candidates are pruned before any deeper combination is
//! materialized. An empty group yields no branches below it.
//!
//! # Parallel Traversal
//!
//! The tree is expanded level by level on the calling thread until the
//! frontier is large enough (or `split_depth` is reached), then a fixed pool
//! of scoped workers claims frontier entries through an atomic cursor and
//! finishes each subtree depth-first. Thread count never exceeds
//! `max_workers`.
//!
//! # Complexity
//! Worst case O(∏ |group|) leaves. Completeness is the contract, so there
//! is no result cap; callers bound input size or cancel.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::{CancelToken, ResultSet, SearchConfig, Strategy};
use crate::models::{conflicts_with_schedule, MeetingGroup, Schedule};

/// Counters from one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Candidates tested against a partial schedule.
    pub candidates_tested: u64,
    /// Candidates rejected for conflicting with the partial schedule.
    pub candidates_pruned: u64,
    /// Complete schedules published.
    pub schedules_found: usize,
}

/// Result of [`ScheduleSearch::run`].
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Complete conflict-free schedules. Order is discovery order for the
    /// sequential strategy and unspecified for the parallel one.
    pub schedules: Vec<Schedule>,
    /// `false` if cancellation cut the run short. A cancel that lands after
    /// the tree is exhausted leaves this `true`.
    pub completed: bool,
    pub stats: SearchStats,
}

/// Schedule search engine.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Category, Course, TimeSlot};
/// use u_timetable::search::{ScheduleSearch, SearchConfig};
///
/// let a = Course::new("A").with_meeting(
///     "LEC-1",
///     Category::Lecture,
///     vec![TimeSlot::parse("MO", "10:00", "11:00").unwrap()],
/// );
/// let b = Course::new("B")
///     .with_meeting("LEC-1", Category::Lecture, vec![TimeSlot::parse("MO", "10:30", "11:30").unwrap()])
///     .with_meeting("LEC-2", Category::Lecture, vec![TimeSlot::parse("TU", "10:00", "11:00").unwrap()]);
///
/// let mut groups = a.groups();
/// groups.extend(b.groups());
///
/// let outcome = ScheduleSearch::new(SearchConfig::sequential()).run(&groups);
/// assert!(outcome.completed);
/// assert_eq!(outcome.schedules.len(), 1);
/// assert_eq!(outcome.schedules[0].meeting_for("B", Category::Lecture).unwrap().id, "LEC-2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleSearch {
    config: SearchConfig,
    cancel: CancelToken,
    stop_after: Option<usize>,
}

impl ScheduleSearch {
    /// Creates an engine with its own cancel token.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            cancel: CancelToken::new(),
            stop_after: None,
        }
    }

    /// Trips the cancel token once `count` schedules have been published.
    #[cfg(test)]
    fn stop_after(mut self, count: usize) -> Self {
        self.stop_after = Some(count);
        self
    }

    /// Uses an externally held cancel token.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Token that aborts runs of this engine.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Enumerates every conflict-free schedule choosing one candidate per
    /// group.
    ///
    /// With no groups the result is a single empty schedule. Never fails.
    pub fn run(&self, groups: &[MeetingGroup]) -> SearchOutcome {
        let started = Instant::now();
        info!(
            groups = groups.len(),
            strategy = ?self.config.strategy,
            "schedule search started"
        );

        let run = Run {
            groups,
            cancel: &self.cancel,
            stop_after: self.stop_after,
            results: ResultSet::new(),
            tested: AtomicU64::new(0),
            pruned: AtomicU64::new(0),
            aborted: AtomicBool::new(false),
        };

        match self.config.strategy {
            Strategy::Sequential => run.descend(Schedule::new(), 0),
            Strategy::Parallel => run.fan_out(&self.config),
        }

        let completed = !run.aborted.load(Ordering::Relaxed);
        let stats = SearchStats {
            candidates_tested: run.tested.load(Ordering::Relaxed),
            candidates_pruned: run.pruned.load(Ordering::Relaxed),
            schedules_found: run.results.len(),
        };
        let schedules = run.results.into_schedules();

        if completed {
            info!(
                found = stats.schedules_found,
                tested = stats.candidates_tested,
                pruned = stats.candidates_pruned,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "schedule search finished"
            );
        } else {
            warn!(found = stats.schedules_found, "schedule search cancelled");
        }

        SearchOutcome {
            schedules,
            completed,
            stats,
        }
    }
}

/// Enumerates all conflict-free schedules sequentially.
///
/// Shorthand for a sequential [`ScheduleSearch`] run.
pub fn enumerate(groups: &[MeetingGroup]) -> Vec<Schedule> {
    ScheduleSearch::new(SearchConfig::sequential())
        .run(groups)
        .schedules
}

/// State shared by all branches of one run.
struct Run<'a> {
    groups: &'a [MeetingGroup],
    cancel: &'a CancelToken,
    stop_after: Option<usize>,
    results: ResultSet,
    tested: AtomicU64,
    pruned: AtomicU64,
    /// Set when a branch returns early because of cancellation.
    aborted: AtomicBool,
}

impl Run<'_> {
    /// Depth-first search below `partial`, which covers `groups[..depth]`.
    fn descend(&self, partial: Schedule, depth: usize) {
        if self.stopped() {
            return;
        }
        let Some(group) = self.groups.get(depth) else {
            self.publish(partial);
            return;
        };

        let key = group.key();
        for candidate in group.candidates() {
            if self.stopped() {
                return;
            }
            self.tested.fetch_add(1, Ordering::Relaxed);
            if conflicts_with_schedule(candidate, &partial) {
                self.pruned.fetch_add(1, Ordering::Relaxed);
                continue;
            }
            self.descend(
                partial.with_selection_for(key.clone(), Arc::clone(candidate)),
                depth + 1,
            );
        }
    }

    /// Non-conflicting one-step extensions of `partial` with `groups[depth]`.
    fn children(&self, partial: &Schedule, depth: usize) -> Vec<Schedule> {
        let Some(group) = self.groups.get(depth) else {
            // Already complete; it stands for itself in the frontier.
            return vec![partial.clone()];
        };

        let key = group.key();
        let mut out = Vec::with_capacity(group.len());
        for candidate in group.candidates() {
            self.tested.fetch_add(1, Ordering::Relaxed);
            if conflicts_with_schedule(candidate, partial) {
                self.pruned.fetch_add(1, Ordering::Relaxed);
            } else {
                out.push(partial.with_selection_for(key.clone(), Arc::clone(candidate)));
            }
        }
        out
    }

    /// Whether the run must stop. Records the early exit so the outcome
    /// reports an incomplete run.
    fn stopped(&self) -> bool {
        let cancelled = self.cancel.is_cancelled();
        if cancelled {
            self.aborted.store(true, Ordering::Relaxed);
        }
        cancelled
    }

    fn publish(&self, schedule: Schedule) {
        let found = self.results.publish(schedule);
        if self.stop_after.is_some_and(|limit| found >= limit) {
            self.cancel.cancel();
        }
    }

    fn fan_out(&self, config: &SearchConfig) {
        let target = config.frontier_target();
        let mut frontier = vec![Schedule::new()];
        let mut depth = 0;

        while depth < self.groups.len()
            && depth < config.split_depth
            && frontier.len() < target
            && !frontier.is_empty()
        {
            if self.stopped() {
                return;
            }
            frontier = frontier
                .iter()
                .flat_map(|partial| self.children(partial, depth))
                .collect();
            depth += 1;
        }

        let workers = config.max_workers.max(1).min(frontier.len());
        debug!(frontier = frontier.len(), depth, workers, "frontier ready");

        if workers <= 1 {
            for partial in frontier {
                self.descend(partial, depth);
            }
            return;
        }

        let cursor = AtomicUsize::new(0);
        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| {
                    while let Some(partial) = frontier.get(cursor.fetch_add(1, Ordering::Relaxed)) {
                        self.descend(partial.clone(), depth);
                    }
                });
            }
        });
    }
}
