//! Bounded-growth invariant: growth must stay self-limiting

use crate::traits::InvariantProperties;
use crate::types::{Verdict, HELD_REASON, INSUFFICIENT_DATA_REASON};
use serde::{Deserialize, Serialize};

/// Mean of the trailing samples above which a series counts as saturated
pub const SATURATION_THRESHOLD: f64 = 0.9;

/// Number of trailing samples averaged into the saturation level
pub const SATURATION_WINDOW: usize = 10;

/// Reason text when some step exceeds the growth-rate bound
pub const EXPLOSIVE_GROWTH_REASON: &str = "Growth rate exceeds maximum bound";

/// Self-limiting growth law `dx/dt = f(x)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GrowthLaw {
    /// `α·x·(1 − x)`
    #[default]
    Logistic,
    /// `α·x·ln(1/x)`
    Gompertz,
}

impl GrowthLaw {
    /// Instantaneous growth rate at level `x`
    pub fn rate(self, x: f64, alpha: f64) -> f64 {
        match self {
            GrowthLaw::Logistic => alpha * x * (1.0 - x),
            GrowthLaw::Gompertz => alpha * x * (1.0 / x.clamp(1e-6, 1.0)).ln(),
        }
    }
}

/// Result of a boundedness check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundednessRecord {
    pub verdict: Verdict,
    pub holds: bool,
    /// Whether any step's |Δx/Δt| exceeded the bound
    pub explosive_growth: bool,
    pub max_growth_rate_observed: f64,
    /// Mean of the last ten samples; 0.0 for ten samples or fewer
    pub saturation_level: f64,
    pub near_saturation: bool,
    pub reason: String,
}

/// Checks that a series grows no faster than a fixed bound
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GrowthBoundsInvariant {
    law: GrowthLaw,
}

impl GrowthBoundsInvariant {
    pub fn new(law: GrowthLaw) -> Self {
        Self { law }
    }

    pub fn law(&self) -> GrowthLaw {
        self.law
    }

    /// Flag steps whose rate of change exceeds `max_growth_rate`
    ///
    /// Uses the common leading length of `x` and `t`. Zero time steps give
    /// an infinite rate and so count as explosive.
    pub fn check_boundedness(&self, x: &[f64], t: &[f64], max_growth_rate: f64) -> BoundednessRecord {
        let n = x.len().min(t.len());
        if n < self.minimum_samples() {
            return BoundednessRecord {
                verdict: Verdict::Inconclusive,
                holds: false,
                explosive_growth: false,
                max_growth_rate_observed: 0.0,
                saturation_level: 0.0,
                near_saturation: false,
                reason: INSUFFICIENT_DATA_REASON.to_string(),
            };
        }

        let rates: Vec<f64> = x[..n]
            .windows(2)
            .zip(t[..n].windows(2))
            .map(|(dx, dt)| ((dx[1] - dx[0]) / (dt[1] - dt[0])).abs())
            .collect();

        let explosive_growth = rates.iter().any(|&r| r > max_growth_rate);
        let max_growth_rate_observed = rates.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let (saturation_level, near_saturation) = if n > SATURATION_WINDOW {
            let recent = &x[n - SATURATION_WINDOW..n];
            let level = recent.iter().sum::<f64>() / SATURATION_WINDOW as f64;
            (level, level > SATURATION_THRESHOLD)
        } else {
            (0.0, false)
        };

        let holds = !explosive_growth;
        BoundednessRecord {
            verdict: if holds { Verdict::Held } else { Verdict::Violated },
            holds,
            explosive_growth,
            max_growth_rate_observed,
            saturation_level,
            near_saturation,
            reason: if holds {
                HELD_REASON.to_string()
            } else {
                EXPLOSIVE_GROWTH_REASON.to_string()
            },
        }
    }

    /// Euler integration of `law` from `x0`, clamped to [0, 1]
    ///
    /// The starting value is clamped to [0.01, 0.99].
    pub fn simulate_bounded_growth(
        &self,
        x0: f64,
        alpha: f64,
        n_steps: usize,
        dt: f64,
        law: GrowthLaw,
    ) -> Vec<f64> {
        if n_steps == 0 {
            return Vec::new();
        }

        let mut x = Vec::with_capacity(n_steps);
        let mut current = x0.clamp(0.01, 0.99);
        x.push(current);
        for _ in 1..n_steps {
            current = (current + law.rate(current, alpha) * dt).clamp(0.0, 1.0);
            x.push(current);
        }
        x
    }

    /// [`simulate_bounded_growth`](Self::simulate_bounded_growth) with this
    /// invariant's own law
    pub fn simulate(&self, x0: f64, alpha: f64, n_steps: usize, dt: f64) -> Vec<f64> {
        self.simulate_bounded_growth(x0, alpha, n_steps, dt, self.law)
    }
}

impl InvariantProperties for GrowthBoundsInvariant {
    fn minimum_samples(&self) -> usize {
        2
    }

    fn method_name(&self) -> &str {
        "Growth bounds"
    }
}
