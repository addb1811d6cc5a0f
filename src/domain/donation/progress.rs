//! Session progress arithmetic.
//!
//! Each source is worth two steps: the prompt phase and the review phase.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Progress;

/// Steps counted per source.
pub const STEPS_PER_SOURCE: usize = 2;

/// Percentage complete after `completed_steps` steps over `sources_total`
/// sources. Zero sources counts as complete.
pub fn progress(sources_total: usize, completed_steps: usize) -> Progress {
    if sources_total == 0 {
        return Progress::HUNDRED;
    }
    let total_steps = (sources_total * STEPS_PER_SOURCE) as f64;
    Progress::new(completed_steps as f64 * 100.0 / total_steps)
}

/// Monotonic step counter for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressTracker {
    sources_total: usize,
    completed_steps: usize,
}

impl ProgressTracker {
    pub fn new(sources_total: usize) -> Self {
        Self {
            sources_total,
            completed_steps: 0,
        }
    }

    /// Current percentage.
    pub fn current(&self) -> Progress {
        progress(self.sources_total, self.completed_steps)
    }

    pub fn sources_total(&self) -> usize {
        self.sources_total
    }

    pub fn completed_steps(&self) -> usize {
        self.completed_steps
    }

    /// Completes one step, never past the session total.
    pub fn complete_step(&mut self) {
        let max = self.sources_total * STEPS_PER_SOURCE;
        self.completed_steps = (self.completed_steps + 1).min(max);
    }

    /// Marks every step of the source at `index` as done.
    ///
    /// Used when a source ends early; never moves progress backwards.
    pub fn complete_source(&mut self, index: usize) {
        let max = self.sources_total * STEPS_PER_SOURCE;
        let target = ((index + 1) * STEPS_PER_SOURCE).min(max);
        self.completed_steps = self.completed_steps.max(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_source_steps_are_half() {
        assert_eq!(progress(1, 0), Progress::ZERO);
        assert_eq!(progress(1, 1), Progress::new(50.0));
        assert_eq!(progress(1, 2), Progress::HUNDRED);
    }

    #[test]
    fn three_sources_reach_exactly_hundred() {
        assert!((progress(3, 1).value() - 100.0 / 6.0).abs() < 1e-9);
        assert_eq!(progress(3, 6).value(), 100.0);
    }

    #[test]
    fn zero_sources_is_complete() {
        assert_eq!(progress(0, 0), Progress::HUNDRED);
    }

    #[test]
    fn tracker_complete_source_fills_remaining_steps() {
        let mut tracker = ProgressTracker::new(2);
        tracker.complete_source(0);
        assert_eq!(tracker.completed_steps(), 2);
        assert_eq!(tracker.current(), Progress::new(50.0));

        tracker.complete_step();
        tracker.complete_source(1);
        assert_eq!(tracker.current(), Progress::HUNDRED);
    }

    #[test]
    fn tracker_complete_source_never_moves_backwards() {
        let mut tracker = ProgressTracker::new(2);
        tracker.complete_source(1);
        tracker.complete_source(0);
        assert_eq!(tracker.completed_steps(), 4);
    }

    #[test]
    fn tracker_caps_at_total() {
        let mut tracker = ProgressTracker::new(1);
        for _ in 0..5 {
            tracker.complete_step();
        }
        assert_eq!(tracker.current(), Progress::HUNDRED);
    }

    proptest! {
        #[test]
        fn progress_is_monotonic_and_bounded(total in 1usize..20, steps in 0usize..60) {
            let capped = steps.min(total * STEPS_PER_SOURCE);
            let here = progress(total, capped);
            let next = progress(total, (capped + 1).min(total * STEPS_PER_SOURCE));
            prop_assert!(here <= next);
            prop_assert!(here.value() >= 0.0 && here.value() <= 100.0);
        }

        #[test]
        fn all_steps_done_is_exactly_hundred(total in 1usize..50) {
            prop_assert_eq!(progress(total, total * STEPS_PER_SOURCE).value(), 100.0);
        }
    }
}
