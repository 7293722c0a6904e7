//! Exponential recursive low-pass kernel

use harmony_core::{Error, Result};

/// Smoothing factor used when none is given
pub const DEFAULT_SMOOTHING_FACTOR: f64 = 0.02;

/// First-order exponential low-pass filter
///
/// `y[0] = x[0]`, `y[i] = α·x[i] + (1 − α)·y[i−1]`. Larger `α` tracks new
/// samples faster; smaller `α` gives a smoother output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmaKernel {
    alpha: f64,
}

impl Default for EmaKernel {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_SMOOTHING_FACTOR,
        }
    }
}

impl EmaKernel {
    /// Create a kernel, rejecting smoothing factors outside (0, 1]
    pub fn new(alpha: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(Error::invalid_smoothing_factor(alpha));
        }
        Ok(Self { alpha })
    }

    /// The smoothing factor α
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Low-pass filter `data`, seeding the recursion with the first sample
    pub fn compute_ema(&self, data: &[f64]) -> Vec<f64> {
        let Some(&first) = data.first() else {
            return vec![];
        };

        let mut ema = Vec::with_capacity(data.len());
        let mut current = first;
        ema.push(current);

        // EMA formula: S_t = α * X_t + (1 - α) * S_{t-1}
        let one_minus_alpha = 1.0 - self.alpha;

        for &value in &data[1..] {
            current = self.alpha * value + one_minus_alpha * current;
            ema.push(current);
        }

        ema
    }

    /// Pointwise `data − ema`
    pub fn compute_residual(&self, data: &[f64], ema: &[f64]) -> Vec<f64> {
        data.iter().zip(ema).map(|(&d, &e)| d - e).collect()
    }
}
