//! Search configuration.

use serde::{Deserialize, Serialize};

/// How the search tree is traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Single-threaded depth-first search.
    Sequential,
    /// Bounded worker pool over a breadth-first frontier.
    Parallel,
}

/// Search engine settings.
///
/// # Example
/// ```
/// use u_timetable::search::{SearchConfig, Strategy};
///
/// let config = SearchConfig::parallel().with_max_workers(4);
/// assert_eq!(config.strategy, Strategy::Parallel);
/// assert_eq!(config.max_workers, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Traversal strategy.
    pub strategy: Strategy,
    /// Worker threads for [`Strategy::Parallel`] (minimum 1).
    pub max_workers: usize,
    /// Deepest level the frontier is expanded to before workers take over.
    pub split_depth: usize,
}

impl SearchConfig {
    /// Frontier entries wanted per worker before fan-out stops.
    pub const FRONTIER_PER_WORKER: usize = 4;

    /// Sequential search.
    pub fn sequential() -> Self {
        Self {
            strategy: Strategy::Sequential,
            ..Self::default()
        }
    }

    /// Parallel search with one worker per available core.
    pub fn parallel() -> Self {
        Self {
            strategy: Strategy::Parallel,
            ..Self::default()
        }
    }

    /// Sets the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the worker count (clamped to at least 1).
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    /// Sets the frontier split depth.
    pub fn with_split_depth(mut self, split_depth: usize) -> Self {
        self.split_depth = split_depth;
        self
    }

    /// Frontier size at which fan-out stops.
    pub fn frontier_target(&self) -> usize {
        self.max_workers.max(1) * Self::FRONTIER_PER_WORKER
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        let max_workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            strategy: Strategy::Sequential,
            max_workers,
            split_depth: 3,
        }
    }
}
