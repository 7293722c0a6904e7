//! Kernel and monitoring configuration

use harmony_acdc::DEFAULT_SMOOTHING_FACTOR;
use harmony_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Read-only configuration of an [`InvariantKernel`](crate::InvariantKernel)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvariantParameters {
    /// Guard added to coherence before taking its logarithm
    pub eps: f64,

    /// Smoothing factor of the trend/fluctuation split, in (0, 1]
    pub smoothing_factor: f64,

    /// Minimum number of aligned samples needed to evaluate
    pub min_window: usize,

    /// Whether the trend component of stress must also be falling
    pub require_slow_stress_trend: bool,

    /// Positive value substituted for non-positive coherence samples
    pub coherence_floor: f64,
}

impl Default for InvariantParameters {
    fn default() -> Self {
        Self {
            eps: 1e-6,
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
            min_window: 30,
            require_slow_stress_trend: true,
            coherence_floor: 1e-12,
        }
    }
}

impl InvariantParameters {
    /// Default parameters with the slow stress-trend check disabled
    pub fn without_slow_stress_trend() -> Self {
        Self {
            require_slow_stress_trend: false,
            ..Self::default()
        }
    }

    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    pub fn with_smoothing_factor(mut self, smoothing_factor: f64) -> Self {
        self.smoothing_factor = smoothing_factor;
        self
    }

    pub fn with_min_window(mut self, min_window: usize) -> Self {
        self.min_window = min_window;
        self
    }

    pub fn with_slow_stress_trend(mut self, required: bool) -> Self {
        self.require_slow_stress_trend = required;
        self
    }

    pub fn with_coherence_floor(mut self, floor: f64) -> Self {
        self.coherence_floor = floor;
        self
    }

    /// Check every field is in its valid range
    pub fn validate(&self) -> Result<()> {
        if !(self.eps.is_finite() && self.eps >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "eps must be finite and non-negative, got {}",
                self.eps
            )));
        }
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(Error::invalid_smoothing_factor(self.smoothing_factor));
        }
        if !(self.coherence_floor.is_finite() && self.coherence_floor > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "coherence_floor must be positive and finite, got {}",
                self.coherence_floor
            )));
        }
        Ok(())
    }

    /// Parse and validate parameters from JSON; missing fields take defaults
    ///
    /// # Examples
    ///
    /// ```rust
    /// use harmony_invariant::InvariantParameters;
    ///
    /// let params = InvariantParameters::from_json(r#"{ "min_window": 50 }"#).unwrap();
    /// assert_eq!(params.min_window, 50);
    /// assert_eq!(params.smoothing_factor, 0.02);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidInput(format!("Invalid parameter JSON: {e}")))?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::Computation(format!("Failed to serialize parameters: {e}")))
    }
}

/// Sliding-window layout for continuous monitoring, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinuousParameters {
    pub window_sec: f64,
    pub step_sec: f64,
}

impl Default for ContinuousParameters {
    fn default() -> Self {
        Self {
            window_sec: 30.0,
            step_sec: 5.0,
        }
    }
}

impl ContinuousParameters {
    pub fn new(window_sec: f64, step_sec: f64) -> Result<Self> {
        let params = Self {
            window_sec,
            step_sec,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.window_sec.is_finite() && self.window_sec > 0.0) {
            return Err(Error::non_positive_duration("window_sec", self.window_sec));
        }
        if !(self.step_sec.is_finite() && self.step_sec > 0.0) {
            return Err(Error::non_positive_duration("step_sec", self.step_sec));
        }
        Ok(())
    }
}
