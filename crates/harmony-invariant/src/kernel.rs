//! Growth-without-coercion kernel
//!
//! A window holds when coherence grows, stress falls and the forcing signal's
//! short-term fluctuation power is not rising. Optionally the slow trend of
//! stress must fall as well.

use crate::params::InvariantParameters;
use crate::traits::InvariantProperties;
use crate::types::{violation_text, InvariantRecord, Verdict, Violation, HELD_REASON};
use harmony_acdc::{fluctuation_power_trend, trend_slope, EmaKernel};
use harmony_core::utils::{gradient, linear_slope, mean, tail};
use harmony_core::Result;
use tracing::{debug, instrument};

/// Evaluates the growth invariant over aligned `(t, C, S, x)` series
///
/// Holds only read-only configuration, so one kernel can serve any number of
/// concurrent callers.
///
/// # Examples
///
/// ```rust
/// use harmony_core::utils::linspace;
/// use harmony_invariant::{InvariantKernel, Verdict};
///
/// let kernel = InvariantKernel::default();
/// let t = linspace(0.0, 60.0, 300);
/// let coherence: Vec<f64> = t.iter().map(|x| 0.2 + 0.6 * (1.0 - (-x / 20.0).exp())).collect();
/// let stress: Vec<f64> = t.iter().map(|x| 1.0 - 0.5 * x / 60.0).collect();
/// let forcing = vec![0.2; t.len()];
///
/// let record = kernel.check(&t, &coherence, &stress, &forcing);
/// assert_eq!(record.verdict, Verdict::Held);
/// assert_eq!(record.reason, "All conditions satisfied");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvariantKernel {
    params: InvariantParameters,
    splitter: EmaKernel,
}

impl Default for InvariantKernel {
    fn default() -> Self {
        Self {
            params: InvariantParameters::default(),
            splitter: EmaKernel::default(),
        }
    }
}

impl InvariantKernel {
    /// Create a kernel after validating `params`
    pub fn new(params: InvariantParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            splitter: EmaKernel::new(params.smoothing_factor)?,
        })
    }

    pub fn params(&self) -> &InvariantParameters {
        &self.params
    }

    /// Copy of this kernel with the slow stress-trend check switched on or off
    pub fn with_slow_stress_trend(&self, required: bool) -> Self {
        Self {
            params: self.params.with_slow_stress_trend(required),
            ..*self
        }
    }

    /// Evaluate the invariant over one window
    ///
    /// The four series are aligned on their common trailing length. Fewer
    /// samples than [`minimum_samples`](InvariantProperties::minimum_samples)
    /// give an inconclusive record. Non-finite samples never cause a failure;
    /// they surface as non-finite diagnostics in the record.
    #[instrument(skip_all, fields(n = t.len().min(coherence.len()).min(stress.len()).min(forcing.len())))]
    pub fn check(
        &self,
        t: &[f64],
        coherence: &[f64],
        stress: &[f64],
        forcing: &[f64],
    ) -> InvariantRecord {
        let n = t.len().min(coherence.len()).min(stress.len()).min(forcing.len());
        if n < self.minimum_samples() {
            debug!(n, required = self.minimum_samples(), "Insufficient data for invariant check");
            return InvariantRecord::insufficient_data(self.params.require_slow_stress_trend);
        }

        let t = tail(t, n);
        let stress = tail(stress, n);
        let forcing = tail(forcing, n);

        let mut coherence_clamped = false;
        let log_coherence: Vec<f64> = tail(coherence, n)
            .iter()
            .map(|&c| {
                let c = if c <= 0.0 {
                    coherence_clamped = true;
                    self.params.coherence_floor
                } else {
                    c
                };
                (c + self.params.eps).ln()
            })
            .collect();
        if coherence_clamped {
            debug!(floor = self.params.coherence_floor, "Clamped non-positive coherence");
        }

        let coherence_gain_mean = mean(&gradient(&log_coherence, t));
        let stress_slope = linear_slope(t, stress);
        let fluctuation_trend = fluctuation_power_trend(&self.splitter.split(forcing).residual, t);

        let coherence_growing = coherence_gain_mean > 0.0;
        let stress_decreasing = stress_slope < 0.0;
        let fluctuation_not_increasing = fluctuation_trend <= 0.0;

        let (slow_stress_slope, slow_stress_decreasing) = if self.params.require_slow_stress_trend {
            let slope = trend_slope(&self.splitter.split(stress).trend, t);
            (slope, Some(slope < 0.0))
        } else {
            (0.0, None)
        };

        let violations: Vec<Violation> = [
            (!coherence_growing).then_some(Violation::CoherenceNotGrowing),
            (!stress_decreasing).then_some(Violation::StressNotDecreasing),
            (!fluctuation_not_increasing).then_some(Violation::FluctuationPowerIncreasing),
            (slow_stress_decreasing == Some(false)).then_some(Violation::SlowStressNotDecreasing),
        ]
        .into_iter()
        .flatten()
        .collect();

        let (verdict, reason) = if violations.is_empty() {
            (Verdict::Held, HELD_REASON.to_string())
        } else {
            (Verdict::Violated, violation_text(&violations, "; "))
        };

        debug!(
            coherence_gain_mean,
            stress_slope,
            fluctuation_trend,
            %verdict,
            "Invariant evaluated"
        );

        InvariantRecord {
            coherence_gain_mean,
            stress_slope,
            fluctuation_power_trend: fluctuation_trend,
            slow_stress_slope,
            coherence_growing,
            stress_decreasing,
            fluctuation_not_increasing,
            slow_stress_decreasing,
            holds: verdict.holds(),
            verdict,
            violations,
            window_samples: n,
            coherence_clamped,
            reason,
        }
    }
}

impl InvariantProperties for InvariantKernel {
    /// Slopes and gradients need at least two samples
    fn minimum_samples(&self) -> usize {
        self.params.min_window.max(2)
    }

    fn method_name(&self) -> &str {
        "Non-coercive growth"
    }
}
