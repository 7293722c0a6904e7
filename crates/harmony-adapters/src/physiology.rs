//! Heart-field adapter: physiological coherence, stress and influence series

use harmony_core::Result;
use harmony_invariant::{
    ContinuousParameters, ContinuousReport, InvariantKernel, InvariantParameters, InvariantRecord,
};
use harmony_phase::{AnalyticSignal, PhaseCoherence};
use tracing::debug;

/// Guard added to the amplitude range when normalising a derived influence proxy
pub const AMPLITUDE_RANGE_GUARD: f64 = 1e-6;

/// Applies the growth invariant to heart coherence, a stress index and an
/// influence carrier sampled at `fs` Hz
#[derive(Debug, Clone, Copy)]
pub struct PhysiologyAdapter {
    fs: f64,
    kernel: InvariantKernel,
}

impl Default for PhysiologyAdapter {
    fn default() -> Self {
        Self {
            fs: 250.0,
            kernel: InvariantKernel::default(),
        }
    }
}

impl PhysiologyAdapter {
    pub fn new(fs: f64, params: InvariantParameters) -> Result<Self> {
        AnalyticSignal::new(fs)?;
        Ok(Self {
            fs,
            kernel: InvariantKernel::new(params)?,
        })
    }

    /// Adapter around an already configured kernel
    pub fn with_kernel(fs: f64, kernel: InvariantKernel) -> Result<Self> {
        AnalyticSignal::new(fs)?;
        Ok(Self { fs, kernel })
    }

    pub fn fs(&self) -> f64 {
        self.fs
    }

    pub fn kernel(&self) -> &InvariantKernel {
        &self.kernel
    }

    /// Timestamps `i / fs` for `n` samples
    pub fn sample_times(&self, n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64 / self.fs).collect()
    }

    /// Windowed phase coherence at this adapter's sampling rate
    pub fn phase_coherence(&self, window_sec: f64) -> Result<PhaseCoherence> {
        PhaseCoherence::new(window_sec, self.fs)
    }

    /// Check one heart-field window
    ///
    /// Without an explicit `influence` series the forcing proxy is derived from
    /// `amplitude`, min-max normalised, or else taken to be `stress` itself.
    pub fn check_heart_field(
        &self,
        t: &[f64],
        coherence: &[f64],
        stress: &[f64],
        influence: Option<&[f64]>,
        amplitude: Option<&[f64]>,
    ) -> InvariantRecord {
        match (influence, amplitude) {
            (Some(influence), _) => self.kernel.check(t, coherence, stress, influence),
            (None, Some(amplitude)) => {
                debug!(n = amplitude.len(), "Deriving influence proxy from heart amplitude");
                let derived = normalized_amplitude(amplitude);
                self.kernel.check(t, coherence, stress, &derived)
            }
            (None, None) => {
                debug!("No influence carrier supplied, using stress as forcing proxy");
                self.kernel.check(t, coherence, stress, stress)
            }
        }
    }

    /// Sliding-window heart-field check with stress doubling as the forcing proxy
    pub fn check_continuous_heart_field(
        &self,
        t: &[f64],
        coherence: &[f64],
        stress: &[f64],
        window_sec: f64,
        step_sec: f64,
    ) -> Result<ContinuousReport> {
        self.kernel
            .check_continuous(t, coherence, stress, stress, window_sec, step_sec)
    }

    /// [`check_continuous_heart_field`](Self::check_continuous_heart_field)
    /// with stored window parameters
    pub fn check_continuous_heart_field_with(
        &self,
        t: &[f64],
        coherence: &[f64],
        stress: &[f64],
        params: &ContinuousParameters,
    ) -> Result<ContinuousReport> {
        self.check_continuous_heart_field(t, coherence, stress, params.window_sec, params.step_sec)
    }
}

/// `(a − min) / (max − min + 1e-6)`; empty input stays empty
pub fn normalized_amplitude(amplitude: &[f64]) -> Vec<f64> {
    if amplitude.is_empty() {
        return Vec::new();
    }
    let (min, max) = amplitude
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &a| (lo.min(a), hi.max(a)));
    let range = max - min + AMPLITUDE_RANGE_GUARD;
    amplitude.iter().map(|a| (a - min) / range).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use harmony_invariant::Verdict;

    fn session(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let t: Vec<f64> = (0..n).map(|i| i as f64 * 0.2).collect();
        let coherence = t.iter().map(|x| 0.3 + 0.4 * (1.0 - (-x / 10.0).exp())).collect();
        let stress = t.iter().map(|x| 0.9 - 0.005 * x).collect();
        (t, coherence, stress)
    }

    #[test]
    fn test_normalized_amplitude() {
        let norm = normalized_amplitude(&[2.0, 4.0, 6.0]);
        assert_eq!(norm[0], 0.0);
        assert_abs_diff_eq!(norm[1], 0.5, epsilon = 1e-6);
        assert!(norm[2] < 1.0);
        assert!(normalized_amplitude(&[]).is_empty());
        // Flat amplitude maps to zeros rather than dividing by zero
        assert_eq!(normalized_amplitude(&[3.0; 4]), vec![0.0; 4]);
    }

    #[test]
    fn test_explicit_influence_wins_over_amplitude() {
        let adapter = PhysiologyAdapter::default();
        let (t, c, s) = session(200);
        let steady = vec![0.1; 200];
        let volatile: Vec<f64> = (0..200)
            .map(|i| (i as f64 / 200.0) * if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();

        let explicit = adapter.check_heart_field(&t, &c, &s, Some(&steady), Some(&volatile));
        assert_eq!(explicit.verdict, Verdict::Held);

        let derived = adapter.check_heart_field(&t, &c, &s, None, Some(&volatile));
        assert_eq!(derived.verdict, Verdict::Violated);
        assert!(!derived.fluctuation_not_increasing);
    }

    #[test]
    fn test_stress_fallback_matches_kernel() {
        let adapter = PhysiologyAdapter::default();
        let (t, c, s) = session(200);
        let record = adapter.check_heart_field(&t, &c, &s, None, None);
        assert_eq!(record, adapter.kernel().check(&t, &c, &s, &s));
    }

    #[test]
    fn test_sampling_rate_helpers() {
        let adapter = PhysiologyAdapter::new(4.0, InvariantParameters::default()).unwrap();
        assert_eq!(adapter.sample_times(3), vec![0.0, 0.25, 0.5]);
        assert_eq!(adapter.phase_coherence(2.0).unwrap().window_samples(), 8);
        assert!(PhysiologyAdapter::new(0.0, InvariantParameters::default()).is_err());
        assert!(PhysiologyAdapter::new(4.0, InvariantParameters::default().with_eps(-1.0)).is_err());
    }

    #[test]
    fn test_continuous_uses_stress_as_forcing() {
        let adapter = PhysiologyAdapter::default();
        let (t, c, s) = session(600);
        let report = adapter.check_continuous_heart_field(&t, &c, &s, 30.0, 10.0).unwrap();
        let direct = adapter
            .kernel()
            .check_continuous(&t, &c, &s, &s, 30.0, 10.0)
            .unwrap();
        assert_eq!(report, direct);
        assert!(!report.is_empty());

        let params = ContinuousParameters::new(30.0, 10.0).unwrap();
        assert_eq!(adapter.check_continuous_heart_field_with(&t, &c, &s, &params).unwrap(), report);
        assert!(adapter.check_continuous_heart_field(&t, &c, &s, 0.0, 10.0).is_err());
    }
}
