//! Coherence and stress proxy builders
//!
//! Map raw measurements onto the unit-interval series the invariant kernel
//! consumes. Stress proxies rise with strain; coherence proxies rise with
//! internal order.

use harmony_core::{Error, Result};

/// Ranges at or below this are treated as flat
const FLAT_RANGE: f64 = 1e-12;

/// Heart-rate range, in bpm, mapped onto [0, 1] stress
pub const HEART_RATE_RANGE: (f64, f64) = (40.0, 180.0);

fn min_max(data: &[f64]) -> (f64, f64) {
    data.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// Min-max scaling onto [0, 1]; a flat series maps to zeros
fn rescale(data: &[f64]) -> Vec<f64> {
    let (lo, hi) = min_max(data);
    if hi - lo > FLAT_RANGE {
        data.iter().map(|v| (v - lo) / (hi - lo)).collect()
    } else {
        vec![0.0; data.len()]
    }
}

fn ensure_same_len(expected: &[f64], actual: &[f64], context: &str) -> Result<()> {
    if expected.len() != actual.len() {
        return Err(Error::size_mismatch(expected.len(), actual.len(), context));
    }
    Ok(())
}

/// Composite physiological stress in [0, 1]
///
/// Averages heart-rate elevation over [`HEART_RATE_RANGE`] with the optional
/// min-max scaled electrodermal activity and inverted heart-rate
/// variability, so lower variability reads as higher stress.
///
/// # Examples
///
/// ```rust
/// use harmony_adapters::proxies::stress_composite_physio;
///
/// let stress = stress_composite_physio(&[40.0, 110.0, 180.0], None, None).unwrap();
/// assert_eq!(stress, vec![0.0, 0.5, 1.0]);
/// ```
pub fn stress_composite_physio(
    heart_rate: &[f64],
    eda: Option<&[f64]>,
    hrv: Option<&[f64]>,
) -> Result<Vec<f64>> {
    let (hr_min, hr_max) = HEART_RATE_RANGE;
    let mut components = vec![heart_rate
        .iter()
        .map(|hr| ((hr - hr_min) / (hr_max - hr_min)).clamp(0.0, 1.0))
        .collect::<Vec<f64>>()];

    if let Some(eda) = eda {
        ensure_same_len(heart_rate, eda, "electrodermal activity")?;
        components.push(rescale(eda));
    }
    if let Some(hrv) = hrv {
        ensure_same_len(heart_rate, hrv, "heart rate variability")?;
        components.push(rescale(hrv).into_iter().map(|v| 1.0 - v).collect());
    }

    let count = components.len() as f64;
    Ok((0..heart_rate.len())
        .map(|i| {
            let sum: f64 = components.iter().map(|c| c[i]).sum();
            (sum / count).clamp(0.0, 1.0)
        })
        .collect())
}

/// Surprise-based stress: absolute prediction error scaled to [0, 1]
///
/// Errors are divided by `baseline_error`, or by the largest error when no
/// baseline is given. A baseline at or below 1e-12 yields zeros.
pub fn stress_prediction_error(
    predictions: &[f64],
    targets: &[f64],
    baseline_error: Option<f64>,
) -> Result<Vec<f64>> {
    ensure_same_len(predictions, targets, "prediction targets")?;

    let errors: Vec<f64> = predictions
        .iter()
        .zip(targets)
        .map(|(p, t)| (p - t).abs())
        .collect();
    let baseline = baseline_error.unwrap_or_else(|| min_max(&errors).1);

    Ok(if baseline > FLAT_RANGE {
        errors.iter().map(|e| (e / baseline).clamp(0.0, 1.0)).collect()
    } else {
        vec![0.0; errors.len()]
    })
}

/// Kinetic stress: locally averaged squared velocity, scaled by its maximum
///
/// Velocity is the first difference with the first sample repeated, so the
/// leading velocity is zero. A centred moving average of `window_size`
/// samples smooths the energy; windows of one or zero leave it unsmoothed.
/// The output always has the input's length.
pub fn stress_velocity_energy(signal: &[f64], window_size: usize) -> Vec<f64> {
    let n = signal.len();
    if n < 2 {
        return vec![0.0; n];
    }

    let velocity_sq: Vec<f64> = std::iter::once(0.0)
        .chain(signal.windows(2).map(|w| (w[1] - w[0]).powi(2)))
        .collect();

    let energy = if window_size <= 1 {
        velocity_sq
    } else {
        // Same-length centred convolution with a uniform kernel; samples past
        // either edge count as zero
        let offset = (window_size - 1) / 2;
        (0..n)
            .map(|i| {
                let hi = (i + offset).min(n - 1);
                let lo = (i + offset + 1).saturating_sub(window_size);
                velocity_sq[lo..=hi].iter().sum::<f64>() / window_size as f64
            })
            .collect()
    };

    let max_energy = min_max(&energy).1;
    if max_energy > FLAT_RANGE {
        energy.iter().map(|e| (e / max_energy).clamp(0.0, 1.0)).collect()
    } else {
        vec![0.0; n]
    }
}

/// Predictive compression gain `1 − L_model / (L_baseline + eps)`, clipped to [0, 1]
///
/// # Examples
///
/// ```rust
/// use harmony_adapters::proxies::coherence_compression_gain;
///
/// let gain = coherence_compression_gain(&[1.0, 2.0, 5.0], &[4.0, 4.0, 4.0], 0.0).unwrap();
/// assert_eq!(gain, vec![0.75, 0.5, 0.0]);
/// assert!(coherence_compression_gain(&[1.0], &[1.0, 2.0], 1e-12).is_err());
/// ```
pub fn coherence_compression_gain(
    loss_model: &[f64],
    loss_baseline: &[f64],
    eps: f64,
) -> Result<Vec<f64>> {
    ensure_same_len(loss_model, loss_baseline, "loss baseline")?;
    Ok(loss_model
        .iter()
        .zip(loss_baseline)
        .map(|(model, baseline)| (1.0 - model / (baseline + eps)).clamp(0.0, 1.0))
        .collect())
}
