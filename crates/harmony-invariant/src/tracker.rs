//! Tracking how long the invariant has held across consecutive windows

use crate::continuous::{ContinuousReport, WindowRecord};
use crate::types::{InvariantRecord, Verdict};

/// Counts consecutive held windows of a continuous run
///
/// The tracker is owned by the caller and fed one record at a time. A
/// violated or inconclusive window resets the streak.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsecutiveHoldTracker {
    min_consecutive: usize,
    consecutive_held: usize,
    window_count: usize,
    sustained_at: Option<usize>,
    current: Option<Verdict>,
}

impl ConsecutiveHoldTracker {
    /// Tracker that reports a sustained hold after `min_consecutive` held
    /// windows in a row
    pub fn new(min_consecutive: usize) -> Self {
        Self {
            min_consecutive: min_consecutive.max(1),
            consecutive_held: 0,
            window_count: 0,
            sustained_at: None,
            current: None,
        }
    }

    pub fn update(&mut self, record: &InvariantRecord) {
        self.window_count += 1;
        self.current = Some(record.verdict);

        if record.holds {
            self.consecutive_held += 1;
            if self.consecutive_held >= self.min_consecutive && self.sustained_at.is_none() {
                self.sustained_at = Some(self.window_count);
            }
        } else {
            self.consecutive_held = 0;
            self.sustained_at = None;
        }
    }

    pub fn update_window(&mut self, window: &WindowRecord) {
        self.update(&window.record);
    }

    /// Feed every window of a report in order
    pub fn extend(&mut self, report: &ContinuousReport) {
        for window in report {
            self.update_window(window);
        }
    }

    /// Verdict of the most recent window
    pub fn current_verdict(&self) -> Option<Verdict> {
        self.current
    }

    pub fn consecutive_held(&self) -> usize {
        self.consecutive_held
    }

    pub fn window_count(&self) -> usize {
        self.window_count
    }

    /// Whether the current streak has reached `min_consecutive`
    pub fn is_sustained(&self) -> bool {
        self.sustained_at.is_some()
    }

    /// One-based window count at which the current streak became sustained
    pub fn sustained_since(&self) -> Option<usize> {
        self.sustained_at
    }

    /// Fraction of the required streak reached so far, in [0, 1]
    pub fn progress(&self) -> f64 {
        (self.consecutive_held as f64 / self.min_consecutive as f64).min(1.0)
    }

    pub fn reset(&mut self) {
        self.consecutive_held = 0;
        self.window_count = 0;
        self.sustained_at = None;
        self.current = None;
    }
}
