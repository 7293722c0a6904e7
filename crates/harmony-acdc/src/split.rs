//! Trend/fluctuation decomposition and fluctuation power statistics
//!
//! The slow ("DC") component of a series is its exponential low-pass trend;
//! the fast ("AC") component is the residual `series − trend`. Because the
//! residual is defined by subtraction, `trend + residual` reconstructs the
//! input to floating-point rounding.

use crate::kernel::EmaKernel;
use harmony_core::utils::{linear_slope, mean};
use harmony_core::Result;
use serde::Serialize;

/// Minimum sub-window length for the fluctuation power profile
pub const MIN_POWER_WINDOW: usize = 4;

/// Trend and residual of a decomposed series, aligned with the input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decomposition {
    /// Slow low-pass component
    pub trend: Vec<f64>,
    /// Fast component, `input − trend`
    pub residual: Vec<f64>,
}

impl Decomposition {
    /// Number of samples in each component
    pub fn len(&self) -> usize {
        self.trend.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trend.is_empty()
    }

    /// `trend + residual`
    pub fn reconstruct(&self) -> Vec<f64> {
        self.trend
            .iter()
            .zip(&self.residual)
            .map(|(&dc, &ac)| dc + ac)
            .collect()
    }

    /// Mean squared residual
    pub fn fluctuation_power(&self) -> f64 {
        fluctuation_power(&self.residual)
    }
}

impl EmaKernel {
    /// Split `series` into its low-pass trend and residual
    pub fn split(&self, series: &[f64]) -> Decomposition {
        let trend = self.compute_ema(series);
        let residual = self.compute_residual(series, &trend);
        Decomposition { trend, residual }
    }
}

/// Split `series` into trend and residual with the given smoothing factor
///
/// Fails only when `smoothing_factor` is outside (0, 1]. An empty series gives
/// an empty decomposition.
///
/// # Examples
///
/// ```rust
/// use harmony_acdc::split;
///
/// let series = [1.0, 2.0, 4.0, 3.0];
/// let parts = split(&series, 0.5).unwrap();
/// for (i, value) in parts.reconstruct().iter().enumerate() {
///     assert!((value - series[i]).abs() < 1e-12);
/// }
/// ```
pub fn split(series: &[f64], smoothing_factor: f64) -> Result<Decomposition> {
    Ok(EmaKernel::new(smoothing_factor)?.split(series))
}

/// Mean of the squared residual, 0.0 for an empty residual
pub fn fluctuation_power(residual: &[f64]) -> f64 {
    if residual.is_empty() {
        return 0.0;
    }
    residual.iter().map(|&r| r * r).sum::<f64>() / residual.len() as f64
}

/// Least-squares slope of the trend against time
///
/// 0.0 with fewer than two points or zero timestamp variance.
pub fn trend_slope(trend: &[f64], timestamps: &[f64]) -> f64 {
    linear_slope(timestamps, trend)
}

/// Fluctuation power over overlapping sub-windows of the residual
///
/// Sub-windows are `max(4, len / 10)` samples long and advance by half a
/// window. Each entry is `(mean timestamp of the window, window power)`.
/// Residuals shorter than 4 samples give an empty profile.
pub fn fluctuation_power_profile(residual: &[f64], timestamps: &[f64]) -> Vec<(f64, f64)> {
    let n = residual.len().min(timestamps.len());
    if n < MIN_POWER_WINDOW {
        return Vec::new();
    }

    let window = MIN_POWER_WINDOW.max(n / 10);
    let step = (window / 2).max(1);

    (0..=n - window)
        .step_by(step)
        .map(|start| {
            let end = start + window;
            (
                mean(&timestamps[start..end]),
                fluctuation_power(&residual[start..end]),
            )
        })
        .collect()
}

/// Trend of the fluctuation power across the whole span
///
/// Positive when short-term variability is itself growing. 0.0 when fewer than
/// two sub-windows fit.
pub fn fluctuation_power_trend(residual: &[f64], timestamps: &[f64]) -> f64 {
    let profile = fluctuation_power_profile(residual, timestamps);
    if profile.len() < 2 {
        return 0.0;
    }

    let (times, powers): (Vec<f64>, Vec<f64>) = profile.into_iter().unzip();
    linear_slope(&times, &powers)
}
