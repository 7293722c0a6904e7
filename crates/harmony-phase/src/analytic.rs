//! Instantaneous amplitude and phase extraction

use harmony_core::utils::{gradient, linear_fit};
use harmony_core::{Error, Result};
use hilbert_tf::HilbertTransform;
use std::f64::consts::PI;

/// Instantaneous amplitude envelope and wrapped phase of a real series
///
/// Both outputs have the input's length. The phase is left wrapped to
/// [-π, π]; pass it through [`unwrap`] for a continuous trajectory.
///
/// # Examples
///
/// ```rust
/// use harmony_phase::analytic_phase;
///
/// let x: Vec<f64> = (0..100)
///     .map(|i| (2.0 * std::f64::consts::PI * 5.0 * i as f64 / 100.0).sin())
///     .collect();
/// let (envelope, phase) = analytic_phase(&x).unwrap();
/// assert_eq!(envelope.len(), x.len());
/// assert_eq!(phase.len(), x.len());
/// ```
pub fn analytic_phase(series: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    HilbertTransform::new(series.len())
        .envelope_and_phase(series)
        .map_err(|e| Error::Computation(format!("Hilbert transform failed: {e}")))
}

/// Remove 2π discontinuities from a wrapped phase series
pub fn unwrap(phase: &[f64]) -> Vec<f64> {
    hilbert_tf::unwrap_phase(phase)
}

/// Subtract the least-squares line of `phase` against `timestamps`
///
/// Works over the common leading length of the two slices. Empty input gives
/// an empty result and a single sample gives `[0.0]`.
pub fn detrend_linear(phase: &[f64], timestamps: &[f64]) -> Vec<f64> {
    let n = phase.len().min(timestamps.len());
    match n {
        0 => return Vec::new(),
        1 => return vec![0.0],
        _ => {}
    }

    let (slope, intercept) = linear_fit(&timestamps[..n], &phase[..n]);
    phase[..n]
        .iter()
        .zip(&timestamps[..n])
        .map(|(&p, &t)| p - (intercept + slope * t))
        .collect()
}

/// Analytic-signal helper bound to a sampling rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticSignal {
    fs: f64,
}

impl Default for AnalyticSignal {
    fn default() -> Self {
        Self { fs: 250.0 }
    }
}

impl AnalyticSignal {
    /// Create a helper for series sampled at `fs` Hz
    pub fn new(fs: f64) -> Result<Self> {
        if !(fs.is_finite() && fs > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "Sampling rate must be positive and finite, got {fs}"
            )));
        }
        Ok(Self { fs })
    }

    pub fn fs(&self) -> f64 {
        self.fs
    }

    /// Envelope and wrapped phase, see [`analytic_phase`]
    pub fn compute(&self, series: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
        analytic_phase(series)
    }

    pub fn unwrap_phase(&self, phase: &[f64]) -> Vec<f64> {
        unwrap(phase)
    }

    /// Remove the linear phase trend; sample times default to `i / fs`
    pub fn remove_linear_trend(&self, phase: &[f64], timestamps: Option<&[f64]>) -> Vec<f64> {
        match timestamps {
            Some(t) => detrend_linear(phase, t),
            None => detrend_linear(phase, &self.sample_times(phase.len())),
        }
    }

    /// Instantaneous frequency in Hz from an unwrapped phase
    pub fn instantaneous_frequency(&self, phase: &[f64]) -> Vec<f64> {
        let index: Vec<f64> = (0..phase.len()).map(|i| i as f64).collect();
        gradient(phase, &index)
            .into_iter()
            .map(|dphi| dphi * self.fs / (2.0 * PI))
            .collect()
    }

    pub(crate) fn sample_times(&self, n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64 / self.fs).collect()
    }
}
