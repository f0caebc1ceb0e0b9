//! SuccessTracker: the population's recent communication outcomes.
//!
//! A FIFO window of the last `capacity` scored outcomes, shared by the
//! whole population. The metric is the mean of the window.

use parlance_core::retention::mean;
use serde::Serialize;
use std::collections::VecDeque;

/// Fixed-capacity sliding window of outcomes.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessTracker {
    capacity: usize,
    outcomes: VecDeque<f64>,
}

impl SuccessTracker {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            outcomes: VecDeque::with_capacity(capacity),
        }
    }

    /// Push an outcome, evicting the oldest first when full.
    pub fn record(&mut self, value: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.outcomes.len() == self.capacity {
            self.outcomes.pop_front();
        }
        self.outcomes.push_back(value);
    }

    /// Mean of the current window, 0.0 when empty.
    pub fn metric(&self) -> f64 {
        let (front, back) = self.outcomes.as_slices();
        if back.is_empty() {
            return mean(front);
        }
        let total: f64 = front.iter().chain(back).sum();
        total / self.outcomes.len() as f64
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Outcomes from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.outcomes.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_metric_is_zero() {
        let tracker = SuccessTracker::new(4);
        assert_eq!(tracker.metric(), 0.0);
        assert!(tracker.is_empty());
    }

    #[test]
    fn window_evicts_oldest_first() {
        let mut tracker = SuccessTracker::new(3);
        tracker.record(0.0);
        tracker.record(1.0);
        tracker.record(1.0);
        assert!((tracker.metric() - 2.0 / 3.0).abs() < 1e-12);

        tracker.record(1.0);
        assert_eq!(tracker.len(), 3, "size never exceeds capacity");
        assert_eq!(tracker.iter().collect::<Vec<_>>(), vec![1.0, 1.0, 1.0]);
        assert_eq!(tracker.metric(), 1.0);
    }

    #[test]
    fn wrapped_buffer_still_averages_everything() {
        let mut tracker = SuccessTracker::new(4);
        for value in [1.0, 1.0, 0.0, 0.0, 1.0, 0.0] {
            tracker.record(value);
            assert!(tracker.len() <= tracker.capacity());
        }
        // window: 0, 0, 1, 0
        assert!((tracker.metric() - 0.25).abs() < 1e-12);
    }
}
