//! Entrainment between two oscillators
//!
//! Windowed phase locking over time, the Arnold tongue locking condition and
//! the effective coupling strength that feeds it.

use crate::analytic::AnalyticSignal;
use crate::locking::{phase_lock_value_with_rng, BiasCorrection};
use harmony_core::{Error, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::f64::consts::PI;
use tracing::{debug, instrument};

/// Phase-locking measurements for series sampled at `fs` Hz
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entrainment {
    fs: f64,
    correction: BiasCorrection,
}

impl Default for Entrainment {
    fn default() -> Self {
        Self {
            fs: 250.0,
            correction: BiasCorrection::seeded(0),
        }
    }
}

impl Entrainment {
    pub fn new(fs: f64, correction: BiasCorrection) -> Result<Self> {
        AnalyticSignal::new(fs)?;
        Ok(Self { fs, correction })
    }

    pub fn fs(&self) -> f64 {
        self.fs
    }

    pub fn correction(&self) -> BiasCorrection {
        self.correction
    }

    /// Phase-locking value per sliding window
    ///
    /// Window and step lengths are truncated to whole samples (at least one).
    /// Returns `(window start in seconds, PLV)` pairs over the common length of
    /// both series; empty when that is shorter than one window. With
    /// `corrected`, every window draws its surrogate shifts from one generator
    /// seeded by the bias-correction settings.
    #[instrument(skip(self, phase_a, phase_b))]
    pub fn sliding_plv(
        &self,
        phase_a: &[f64],
        phase_b: &[f64],
        window_sec: f64,
        step_sec: f64,
        corrected: bool,
    ) -> Result<Vec<(f64, f64)>> {
        if !(window_sec.is_finite() && window_sec > 0.0) {
            return Err(Error::non_positive_duration("window_sec", window_sec));
        }
        if !(step_sec.is_finite() && step_sec > 0.0) {
            return Err(Error::non_positive_duration("step_sec", step_sec));
        }

        let window = ((window_sec * self.fs) as usize).max(1);
        let step = ((step_sec * self.fs) as usize).max(1);
        let n = phase_a.len().min(phase_b.len());
        if n < window {
            return Ok(Vec::new());
        }

        let shuffle_count = if corrected {
            self.correction.shuffle_count
        } else {
            0
        };
        let mut rng = match self.correction.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let windows: Vec<(f64, f64)> = (0..=n - window)
            .step_by(step)
            .map(|start| {
                let end = start + window;
                let plv = phase_lock_value_with_rng(
                    &phase_a[start..end],
                    &phase_b[start..end],
                    shuffle_count,
                    &mut rng,
                );
                (start as f64 / self.fs, plv)
            })
            .collect();

        debug!(windows = windows.len(), window, step, corrected, "Sliding PLV");
        Ok(windows)
    }
}

/// Arnold tongue locking condition for two frequencies in Hz
///
/// Returns whether the angular frequency mismatch `|2π(f1 − f2)|` lies below
/// `k_eff`, together with that mismatch.
///
/// # Examples
///
/// ```rust
/// use harmony_phase::arnold_tongue_boundary;
///
/// let (locks, delta_omega) = arnold_tongue_boundary(1.0, 1.05, 0.5);
/// assert!(locks);
/// assert!((delta_omega - 0.1 * std::f64::consts::PI).abs() < 1e-9);
/// ```
pub fn arnold_tongue_boundary(f1: f64, f2: f64, k_eff: f64) -> (bool, f64) {
    let delta_omega = (2.0 * PI * f1 - 2.0 * PI * f2).abs();
    (delta_omega < k_eff, delta_omega)
}

/// Coupling strength `k0 · coherence`, attenuated by `(r0 / distance)^falloff_exp`
/// when a positive distance is given
pub fn effective_coupling(
    k0: f64,
    coherence: f64,
    distance: Option<f64>,
    r0: f64,
    falloff_exp: f64,
) -> f64 {
    let k_eff = k0 * coherence;
    match distance {
        Some(d) if d > 0.0 => k_eff * (r0 / d).powf(falloff_exp),
        _ => k_eff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ramp(n: usize, rate: f64, offset: f64) -> Vec<f64> {
        (0..n).map(|i| i as f64 * rate + offset).collect()
    }

    #[test]
    fn test_sliding_plv_locked_offset() {
        let entrainment = Entrainment::new(10.0, BiasCorrection::seeded(1)).unwrap();
        let a = ramp(600, 0.3, 0.0);
        let b = ramp(600, 0.3, 1.1);

        let windows = entrainment.sliding_plv(&a, &b, 30.0, 10.0, false).unwrap();
        assert_eq!(windows.len(), 4);
        let starts: Vec<f64> = windows.iter().map(|&(s, _)| s).collect();
        assert_eq!(starts, vec![0.0, 10.0, 20.0, 30.0]);
        for &(_, plv) in &windows {
            assert_abs_diff_eq!(plv, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sliding_plv_truncates_window_sizes() {
        // 2.5 s and 1.5 s at 3 Hz are 7 and 4 samples
        let entrainment = Entrainment::new(3.0, BiasCorrection::seeded(1)).unwrap();
        let a = ramp(20, 0.2, 0.0);
        let b = ramp(25, 0.2, 0.5);

        let windows = entrainment.sliding_plv(&a, &b, 2.5, 1.5, false).unwrap();
        assert_eq!(windows.len(), 4);
        assert_abs_diff_eq!(windows[1].0, 4.0 / 3.0);
        assert_abs_diff_eq!(windows[3].0, 4.0);
    }

    #[test]
    fn test_sliding_plv_seeded_correction() {
        let entrainment =
            Entrainment::new(10.0, BiasCorrection::seeded(7).with_shuffle_count(30)).unwrap();
        let a: Vec<f64> = (0..400).map(|i| (i as f64 * 0.731).sin() * 4.0).collect();
        let b: Vec<f64> = (0..400).map(|i| (i as f64 * 0.417).cos() * 4.0).collect();

        let first = entrainment.sliding_plv(&a, &b, 15.0, 5.0, true).unwrap();
        let second = entrainment.sliding_plv(&a, &b, 15.0, 5.0, true).unwrap();
        assert_eq!(first, second);

        let raw = entrainment.sliding_plv(&a, &b, 15.0, 5.0, false).unwrap();
        assert_eq!(first.len(), raw.len());
        for (&(_, corrected), &(_, plain)) in first.iter().zip(&raw) {
            assert!((0.0..=plain).contains(&corrected));
        }
    }

    #[test]
    fn test_sliding_plv_short_and_invalid() {
        let entrainment = Entrainment::default();
        let a = ramp(100, 0.1, 0.0);
        assert!(entrainment.sliding_plv(&a, &a, 1.0, 0.5, true).unwrap().is_empty());
        assert!(entrainment.sliding_plv(&a, &[], 0.001, 0.5, false).unwrap().is_empty());

        assert!(matches!(
            entrainment.sliding_plv(&a, &a, 0.0, 1.0, false),
            Err(Error::InvalidParameter(_))
        ));
        assert!(entrainment.sliding_plv(&a, &a, 1.0, f64::NAN, false).is_err());
        assert!(Entrainment::new(-4.0, BiasCorrection::default()).is_err());
    }

    #[test]
    fn test_arnold_tongue_boundary() {
        let (locks, delta_omega) = arnold_tongue_boundary(1.0, 1.1, 1.0);
        assert!(locks);
        assert_abs_diff_eq!(delta_omega, 0.2 * PI, epsilon = 1e-12);

        let (locks, _) = arnold_tongue_boundary(1.1, 1.0, 0.5);
        assert!(!locks);

        // The boundary itself does not lock
        let (locks, delta_omega) = arnold_tongue_boundary(2.0, 2.0, 0.0);
        assert!(!locks);
        assert_eq!(delta_omega, 0.0);
    }

    #[test]
    fn test_effective_coupling() {
        assert_abs_diff_eq!(effective_coupling(2.0, 0.5, None, 1.0, 3.0), 1.0);
        assert_abs_diff_eq!(effective_coupling(2.0, 0.5, Some(2.0), 1.0, 3.0), 0.125);
        assert_abs_diff_eq!(effective_coupling(2.0, 0.5, Some(0.5), 1.0, 2.0), 4.0);
        // Non-positive distances leave the coupling unattenuated
        assert_abs_diff_eq!(effective_coupling(2.0, 0.5, Some(0.0), 1.0, 3.0), 1.0);
        assert_abs_diff_eq!(effective_coupling(2.0, 0.5, Some(-1.0), 1.0, 3.0), 1.0);
    }
}
