//! Windowed phase coherence and spectral concentration

use crate::analytic::{detrend_linear, AnalyticSignal};
use crate::concentration::phase_concentration;
use harmony_core::{Error, Result};
use num_complex::Complex;
use rustfft::FftPlanner;
use tracing::trace;

/// Shortest signal with a usable power spectrum
pub const MIN_SPECTRAL_SAMPLES: usize = 8;

/// Total spectral power treated as silence
pub const SPECTRAL_POWER_FLOOR: f64 = 1e-12;

/// Phase coherence over fixed-length windows of a phase series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseCoherence {
    window_sec: f64,
    fs: f64,
}

impl Default for PhaseCoherence {
    fn default() -> Self {
        Self {
            window_sec: 30.0,
            fs: 250.0,
        }
    }
}

impl PhaseCoherence {
    pub fn new(window_sec: f64, fs: f64) -> Result<Self> {
        if !(window_sec.is_finite() && window_sec > 0.0) {
            return Err(Error::non_positive_duration("window_sec", window_sec));
        }
        AnalyticSignal::new(fs)?;
        Ok(Self { window_sec, fs })
    }

    pub fn window_sec(&self) -> f64 {
        self.window_sec
    }

    pub fn fs(&self) -> f64 {
        self.fs
    }

    /// Window length in samples, truncated and at least one
    pub fn window_samples(&self) -> usize {
        ((self.window_sec * self.fs) as usize).max(1)
    }

    /// Phase concentration of `phase`, optionally after removing its linear
    /// trend against `i / fs`
    pub fn phase_concentration(&self, phase: &[f64], detrend: bool) -> f64 {
        if detrend {
            let t: Vec<f64> = (0..phase.len()).map(|i| i as f64 / self.fs).collect();
            phase_concentration(&detrend_linear(phase, &t))
        } else {
            phase_concentration(phase)
        }
    }

    /// Share of spectral power within `[f0 − bandwidth, f0 + bandwidth]`
    ///
    /// Uses the one-sided power spectrum. Returns 0.0 for fewer than
    /// [`MIN_SPECTRAL_SAMPLES`] samples, a band containing no frequency bins,
    /// or a total power at or below [`SPECTRAL_POWER_FLOOR`].
    pub fn spectral_concentration(&self, signal: &[f64], f0: f64, bandwidth: f64) -> f64 {
        let n = signal.len();
        if n < MIN_SPECTRAL_SAMPLES {
            return 0.0;
        }

        let mut spectrum: Vec<Complex<f64>> =
            signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
        FftPlanner::<f64>::new()
            .plan_fft_forward(n)
            .process(&mut spectrum);

        let resolution = self.fs / n as f64;
        let (lo, hi) = (f0 - bandwidth, f0 + bandwidth);

        let mut total = 0.0;
        let mut in_band = 0.0;
        let mut any_bin = false;
        for (k, bin) in spectrum.iter().take(n / 2 + 1).enumerate() {
            let power = bin.norm_sqr();
            let freq = k as f64 * resolution;
            total += power;
            if freq >= lo && freq <= hi {
                in_band += power;
                any_bin = true;
            }
        }

        if !any_bin || total <= SPECTRAL_POWER_FLOOR {
            return 0.0;
        }
        (in_band / total).clamp(0.0, 1.0)
    }

    /// Detrended phase concentration per sliding window
    ///
    /// Returns `(window start in seconds, concentration)` pairs; empty when
    /// the series is shorter than one window.
    pub fn sliding_coherence(&self, phase: &[f64], step_sec: f64) -> Result<Vec<(f64, f64)>> {
        if !(step_sec.is_finite() && step_sec > 0.0) {
            return Err(Error::non_positive_duration("step_sec", step_sec));
        }
        let window = self.window_samples();
        let step = ((step_sec * self.fs) as usize).max(1);

        if phase.len() < window {
            return Ok(Vec::new());
        }

        let windows: Vec<(f64, f64)> = (0..=phase.len() - window)
            .step_by(step)
            .map(|start| {
                let coherence = self.phase_concentration(&phase[start..start + window], true);
                (start as f64 / self.fs, coherence)
            })
            .collect();

        trace!(windows = windows.len(), window, step, "Sliding phase coherence");
        Ok(windows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_detrended_linear_phase_is_concentrated() {
        let coherence = PhaseCoherence::new(2.0, 50.0).unwrap();
        let phase: Vec<f64> = (0..100).map(|i| 2.0 * PI * 3.0 * i as f64 / 50.0).collect();
        assert_abs_diff_eq!(coherence.phase_concentration(&phase, true), 1.0, epsilon = 1e-9);
        assert!(coherence.phase_concentration(&phase, false) < 0.1);
    }

    #[test]
    fn test_spectral_concentration_pure_tone() {
        let fs = 100.0;
        let coherence = PhaseCoherence::new(1.0, fs).unwrap();
        let tone: Vec<f64> = (0..200).map(|i| (2.0 * PI * 5.0 * i as f64 / fs).sin()).collect();

        assert_abs_diff_eq!(coherence.spectral_concentration(&tone, 5.0, 0.1), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(coherence.spectral_concentration(&tone, 20.0, 0.1), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_spectral_concentration_degenerate() {
        let coherence = PhaseCoherence::new(1.0, 100.0).unwrap();
        assert_eq!(coherence.spectral_concentration(&[], 1.0, 0.1), 0.0);
        assert_eq!(coherence.spectral_concentration(&[0.0; 64], 1.0, 0.5), 0.0);
        // Band between bins
        assert_eq!(coherence.spectral_concentration(&[1.0; 10], 5.0, 0.1), 0.0);

        // Too short for a spectrum, even with all power at DC
        assert_eq!(coherence.spectral_concentration(&[1.0; 7], 0.0, 0.1), 0.0);
        assert_eq!(coherence.spectral_concentration(&[1.0; 8], 0.0, 0.1), 1.0);

        // Power at the floor counts as silence
        let faint: Vec<f64> = (0..64).map(|i| 1e-8 * (2.0 * PI * 5.0 * i as f64 / 100.0).sin()).collect();
        assert_eq!(coherence.spectral_concentration(&faint, 5.0, 1.0), 0.0);
    }

    #[test]
    fn test_sliding_coherence_layout() {
        let coherence = PhaseCoherence::new(1.0, 10.0).unwrap();
        let phase: Vec<f64> = (0..50).map(|i| 0.2 * i as f64).collect();
        let windows = coherence.sliding_coherence(&phase, 1.0).unwrap();

        // 10-sample windows every 10 samples over 50 samples
        assert_eq!(windows.len(), 5);
        assert_abs_diff_eq!(windows[4].0, 4.0);
        for (_, c) in &windows {
            assert_abs_diff_eq!(*c, 1.0, epsilon = 1e-9);
        }

        assert!(coherence.sliding_coherence(&phase[..5], 1.0).unwrap().is_empty());
        assert!(coherence.sliding_coherence(&phase, 0.0).is_err());
    }

    #[test]
    fn test_invalid_construction() {
        assert!(PhaseCoherence::new(0.0, 100.0).is_err());
        assert!(PhaseCoherence::new(1.0, -1.0).is_err());
    }
}
