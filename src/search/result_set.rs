//! Thread-safe accumulator for complete schedules.

use std::sync::{Mutex, PoisonError};

use crate::models::Schedule;

/// Collects every complete schedule found during one search run.
///
/// Created empty per run, written by any number of branches, drained once
/// the run has finished. Appends are serialized by a mutex.
#[derive(Debug, Default)]
pub struct ResultSet {
    schedules: Mutex<Vec<Schedule>>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a complete schedule and returns how many are now held.
    pub fn publish(&self, schedule: Schedule) -> usize {
        let mut schedules = self.schedules.lock().unwrap_or_else(PoisonError::into_inner);
        schedules.push(schedule);
        schedules.len()
    }

    pub fn len(&self) -> usize {
        self.schedules
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the set, returning schedules in publication order.
    pub fn into_schedules(self) -> Vec<Schedule> {
        self.schedules
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_publish_and_drain() {
        let results = ResultSet::new();
        assert!(results.is_empty());
        assert_eq!(results.publish(Schedule::new()), 1);
        assert_eq!(results.publish(Schedule::new()), 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results.into_schedules().len(), 2);
    }

    #[test]
    fn test_concurrent_publish_loses_nothing() {
        let results = ResultSet::new();
        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..500 {
                        results.publish(Schedule::new());
                    }
                });
            }
        });
        assert_eq!(results.len(), 4000);
    }
}
