//! Sliding-window monitoring of the growth invariant

use crate::kernel::InvariantKernel;
use crate::params::ContinuousParameters;
use crate::types::{InvariantRecord, Verdict};
use harmony_core::utils::mean_spacing;
use harmony_core::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One evaluated window of a continuous run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    /// Timestamp of the window's first sample
    pub start: f64,
    pub record: InvariantRecord,
}

/// Records of every window of a continuous run, in start-time order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContinuousReport {
    /// Sampling rate inferred from the mean timestamp spacing
    pub sampling_rate: f64,
    pub window_samples: usize,
    pub step_samples: usize,
    pub windows: Vec<WindowRecord>,
}

impl ContinuousReport {
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.iter()
    }

    /// Window start timestamps
    pub fn timestamps(&self) -> Vec<f64> {
        self.windows.iter().map(|w| w.start).collect()
    }

    pub fn verdicts(&self) -> Vec<Verdict> {
        self.windows.iter().map(|w| w.record.verdict).collect()
    }

    /// Share of conclusive windows that held, `None` when none were conclusive
    pub fn hold_fraction(&self) -> Option<f64> {
        let conclusive = self
            .windows
            .iter()
            .filter(|w| w.record.verdict.is_conclusive())
            .count();
        let held = self.windows.iter().filter(|w| w.record.holds).count();
        (conclusive > 0).then(|| held as f64 / conclusive as f64)
    }

    /// Whether every window held; false for an empty report
    pub fn all_hold(&self) -> bool {
        !self.windows.is_empty() && self.windows.iter().all(|w| w.record.holds)
    }
}

impl<'a> IntoIterator for &'a ContinuousReport {
    type Item = &'a WindowRecord;
    type IntoIter = std::slice::Iter<'a, WindowRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.windows.iter()
    }
}

/// Convert a duration to a whole number of samples, truncating, at least one
pub(crate) fn to_samples(seconds: f64, fs: f64) -> usize {
    ((seconds * fs) as usize).max(1)
}

impl InvariantKernel {
    /// Evaluate the invariant over sliding windows
    ///
    /// The sampling rate is the reciprocal of the mean timestamp spacing (1.0
    /// with fewer than two timestamps). `window_sec` and `step_sec` are
    /// converted to sample counts by truncation (at least one sample). Windows start at sample 0 and
    /// advance by the step while a whole window still fits in the common
    /// length of the four series.
    ///
    /// Fails only for a non-positive or non-finite `window_sec`/`step_sec`.
    /// Timestamps whose spacing gives no usable sampling rate produce an
    /// empty report.
    #[instrument(skip(self, t, coherence, stress, forcing), fields(n = t.len()))]
    pub fn check_continuous(
        &self,
        t: &[f64],
        coherence: &[f64],
        stress: &[f64],
        forcing: &[f64],
        window_sec: f64,
        step_sec: f64,
    ) -> Result<ContinuousReport> {
        ContinuousParameters::new(window_sec, step_sec)?;

        let n = t.len().min(coherence.len()).min(stress.len()).min(forcing.len());
        let fs = match mean_spacing(&t[..n]) {
            Some(spacing) => 1.0 / spacing,
            None => 1.0,
        };
        if !(fs.is_finite() && fs > 0.0) {
            debug!(fs, "Timestamps give no usable sampling rate");
            return Ok(ContinuousReport {
                sampling_rate: fs,
                ..ContinuousReport::default()
            });
        }

        let window = to_samples(window_sec, fs);
        let step = to_samples(step_sec, fs);
        let starts: Vec<usize> = if n >= window {
            (0..=n - window).step_by(step).collect()
        } else {
            Vec::new()
        };

        let evaluate = |&start: &usize| {
            let end = start + window;
            let record = self.check(
                &t[start..end],
                &coherence[start..end],
                &stress[start..end],
                &forcing[start..end],
            );
            trace!(start = t[start], verdict = %record.verdict, "Window evaluated");
            WindowRecord {
                start: t[start],
                record,
            }
        };

        #[cfg(feature = "parallel")]
        let windows: Vec<WindowRecord> = starts.par_iter().map(evaluate).collect();
        #[cfg(not(feature = "parallel"))]
        let windows: Vec<WindowRecord> = starts.iter().map(evaluate).collect();

        debug!(
            fs,
            window,
            step,
            windows = windows.len(),
            held = windows.iter().filter(|w| w.record.holds).count(),
            "Continuous check complete"
        );

        Ok(ContinuousReport {
            sampling_rate: fs,
            window_samples: window,
            step_samples: step,
            windows,
        })
    }

    /// [`check_continuous`](Self::check_continuous) with a window layout value
    pub fn check_continuous_with(
        &self,
        t: &[f64],
        coherence: &[f64],
        stress: &[f64],
        forcing: &[f64],
        layout: &ContinuousParameters,
    ) -> Result<ContinuousReport> {
        self.check_continuous(t, coherence, stress, forcing, layout.window_sec, layout.step_sec)
    }
}
