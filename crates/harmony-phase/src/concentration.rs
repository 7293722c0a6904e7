//! Circular statistics over phase series

use harmony_core::utils::gradient;
use num_complex::Complex;

/// Log-singularity guard for [`coherence_gain_rate`]
pub const GAIN_RATE_EPSILON: f64 = 1e-6;

/// Mean unit phasor `mean(exp(i·phase))`, `None` when empty
pub(crate) fn mean_phasor<I>(phases: I) -> Option<Complex<f64>>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = phases
        .into_iter()
        .fold((Complex::new(0.0, 0.0), 0usize), |(sum, count), phi| {
            (sum + Complex::from_polar(1.0, phi), count + 1)
        });
    (count > 0).then(|| sum / count as f64)
}

/// Magnitude of the circular mean, `|mean(exp(i·phase))|`
///
/// 1.0 for identical phases, near 0 for phases spread uniformly around the
/// circle. NaN for an empty series.
///
/// # Examples
///
/// ```rust
/// use harmony_phase::phase_concentration;
///
/// assert_eq!(phase_concentration(&[0.0; 100]), 1.0);
/// assert!((phase_concentration(&[0.3; 100]) - 1.0).abs() < 1e-12);
/// assert!(phase_concentration(&[]).is_nan());
/// ```
pub fn phase_concentration(phase: &[f64]) -> f64 {
    mean_phasor(phase.iter().copied()).map_or(f64::NAN, |z| z.norm().min(1.0))
}

/// Time derivative of `log(C + ε)`
///
/// A single sample gives `[0.0]`. Uses the common leading length of the two
/// slices.
pub fn coherence_gain_rate(coherence: &[f64], timestamps: &[f64]) -> Vec<f64> {
    let log_coherence: Vec<f64> = coherence
        .iter()
        .map(|&c| (c + GAIN_RATE_EPSILON).ln())
        .collect();
    gradient(&log_coherence, timestamps)
}

/// Kuramoto order parameter `R(t) = |mean_k exp(i·φ_k(t))|` across oscillators
///
/// Each entry of `phases` is one oscillator's phase series; the result covers
/// the shortest of them. A single oscillator is fully concentrated and yields
/// ones.
pub fn kuramoto_order_parameter(phases: &[Vec<f64>]) -> Vec<f64> {
    let steps = phases.iter().map(Vec::len).min().unwrap_or(0);
    if phases.len() == 1 {
        return vec![1.0; steps];
    }

    (0..steps)
        .map(|i| {
            mean_phasor(phases.iter().map(|oscillator| oscillator[i]))
                .map_or(0.0, |z| z.norm().clamp(0.0, 1.0))
        })
        .collect()
}
