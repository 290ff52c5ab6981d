//! Search control: cooperative stop flag and an advisory time budget.
//!
//! The core search is depth-bounded; nothing here interrupts it. The stop
//! flag is the designated cancellation point (polled every 2048 nodes),
//! and the time budget is advisory only: callers may inspect it after
//! the fact, but the search never aborts on the clock.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Shared control handle passed into a search.
pub struct SearchControl {
    stopped: Arc<AtomicBool>,
    budget: Option<Duration>,
    started: Instant,
}

impl SearchControl {
    /// Control with an external stop flag and an optional advisory budget.
    pub fn new(stopped: Arc<AtomicBool>, budget: Option<Duration>) -> Self {
        Self {
            stopped,
            budget,
            started: Instant::now(),
        }
    }

    /// Control that never stops: pure depth-bounded search.
    pub fn unbounded() -> Self {
        Self::new(Arc::new(AtomicBool::new(false)), None)
    }

    /// Cancellation point. Polled by the search every 2048 nodes; returns
    /// `true` only when the external stop flag has been raised.
    pub fn should_stop(&self, nodes: u64) -> bool {
        if nodes & 2047 != 0 {
            return false;
        }
        self.stopped.load(Ordering::Relaxed)
    }

    /// Whether the advisory budget has elapsed. Informational only.
    pub fn budget_elapsed(&self) -> bool {
        self.budget
            .is_some_and(|budget| self.started.elapsed() >= budget)
    }
}

impl Default for SearchControl {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl std::fmt::Debug for SearchControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchControl")
            .field("stopped", &self.stopped.load(Ordering::Relaxed))
            .field("budget", &self.budget)
            .finish()
    }
}
