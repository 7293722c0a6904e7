//! Two-way growth check: recent coherence gain positive, stress falling
//!
//! A lighter relative of the full kernel that ignores the forcing signal. The
//! coherence gain is averaged over only the most recent gradient samples, so
//! the check follows the latest dynamics rather than the whole span.

use crate::continuous::to_samples;
use crate::params::ContinuousParameters;
use crate::traits::InvariantProperties;
use crate::types::{violation_text, Verdict, Violation, HELD_REASON, INSUFFICIENT_DATA_REASON};
use harmony_core::utils::{gradient, linear_slope, mean, tail};
use harmony_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of one non-coercion evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonCoercionRecord {
    pub verdict: Verdict,
    pub holds: bool,
    /// Mean gain of `log(C + ε)` over the most recent `window_size` samples
    pub coherence_gain_rate: f64,
    pub stress_slope: f64,
    /// `None` when inconclusive
    pub stress_decreasing: Option<bool>,
    pub window_size: usize,
    pub reason: String,
}

impl NonCoercionRecord {
    /// The reason text of a violated record
    pub fn violation_reason(&self) -> Option<&str> {
        (self.verdict == Verdict::Violated).then_some(self.reason.as_str())
    }
}

/// Non-coercion invariant over coherence and stress alone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonCoercionInvariant {
    window_size: usize,
    epsilon: f64,
}

impl Default for NonCoercionInvariant {
    fn default() -> Self {
        Self {
            window_size: 10,
            epsilon: 1e-6,
        }
    }
}

impl NonCoercionInvariant {
    pub fn new(window_size: usize, epsilon: f64) -> Result<Self> {
        if window_size == 0 {
            return Err(Error::InvalidParameter(
                "window_size must be at least 1".to_string(),
            ));
        }
        if !(epsilon.is_finite() && epsilon >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "epsilon must be finite and non-negative, got {epsilon}"
            )));
        }
        Ok(Self {
            window_size,
            epsilon,
        })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    fn insufficient_data(&self) -> NonCoercionRecord {
        NonCoercionRecord {
            verdict: Verdict::Inconclusive,
            holds: false,
            coherence_gain_rate: 0.0,
            stress_slope: 0.0,
            stress_decreasing: None,
            window_size: self.window_size,
            reason: INSUFFICIENT_DATA_REASON.to_string(),
        }
    }

    /// Evaluate over the common leading length of the inputs
    ///
    /// `time_points` defaults to the sample index.
    pub fn check(
        &self,
        coherence: &[f64],
        stress: &[f64],
        time_points: Option<&[f64]>,
    ) -> NonCoercionRecord {
        let mut n = coherence.len().min(stress.len());
        if let Some(t) = time_points {
            n = n.min(t.len());
        }
        if n < self.minimum_samples() {
            return self.insufficient_data();
        }

        let index: Vec<f64>;
        let t = match time_points {
            Some(t) => &t[..n],
            None => {
                index = (0..n).map(|i| i as f64).collect();
                &index
            }
        };

        let log_coherence: Vec<f64> = coherence[..n]
            .iter()
            .map(|&c| (c + self.epsilon).ln())
            .collect();
        let gain = gradient(&log_coherence, t);
        let recent_gain = mean(tail(&gain, self.window_size));

        let stress_slope = linear_slope(t, &stress[..n]);
        let coherence_growing = recent_gain > 0.0;
        let stress_decreasing = stress_slope < 0.0;

        // NaN diagnostics fail both comparisons and so count as violations
        let violations: Vec<Violation> = [
            (!coherence_growing).then_some(Violation::CoherenceNotGrowing),
            (!stress_decreasing).then_some(Violation::StressNotDecreasing),
        ]
        .into_iter()
        .flatten()
        .collect();

        let holds = violations.is_empty();
        let (verdict, reason) = if holds {
            (Verdict::Held, HELD_REASON.to_string())
        } else {
            (Verdict::Violated, violation_text(&violations, " and "))
        };

        NonCoercionRecord {
            verdict,
            holds,
            coherence_gain_rate: recent_gain,
            stress_slope,
            stress_decreasing: Some(stress_decreasing),
            window_size: self.window_size,
            reason,
        }
    }

    /// Evaluate over sliding windows of series sampled at `fs` Hz
    ///
    /// Each window uses its own local time axis `i / fs`. Returns `(window
    /// start in seconds, record)` pairs.
    pub fn check_continuous(
        &self,
        coherence: &[f64],
        stress: &[f64],
        window_sec: f64,
        step_sec: f64,
        fs: f64,
    ) -> Result<Vec<(f64, NonCoercionRecord)>> {
        ContinuousParameters::new(window_sec, step_sec)?;
        if !(fs.is_finite() && fs > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "Sampling rate must be positive and finite, got {fs}"
            )));
        }

        let n = coherence.len().min(stress.len());
        let window = to_samples(window_sec, fs);
        let step = to_samples(step_sec, fs);
        if n < window {
            return Ok(Vec::new());
        }

        let local_time: Vec<f64> = (0..window).map(|i| i as f64 / fs).collect();
        let results: Vec<(f64, NonCoercionRecord)> = (0..=n - window)
            .step_by(step)
            .map(|start| {
                let end = start + window;
                let record = self.check(&coherence[start..end], &stress[start..end], Some(&local_time));
                (start as f64 / fs, record)
            })
            .collect();

        debug!(windows = results.len(), window, step, "Non-coercion continuous check");
        Ok(results)
    }
}

impl InvariantProperties for NonCoercionInvariant {
    fn minimum_samples(&self) -> usize {
        2
    }

    fn method_name(&self) -> &str {
        "Non-coercion"
    }
}
