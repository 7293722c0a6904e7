//! Result types shared by the invariant checks

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason text of a record whose window held
pub const HELD_REASON: &str = "All conditions satisfied";

/// Reason text of a record that could not be evaluated
pub const INSUFFICIENT_DATA_REASON: &str = "Insufficient data";

/// Outcome of one invariant evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Every active condition was satisfied
    Held,
    /// At least one active condition failed
    Violated,
    /// Too few samples to evaluate
    Inconclusive,
}

impl Verdict {
    pub fn holds(self) -> bool {
        self == Verdict::Held
    }

    pub fn is_conclusive(self) -> bool {
        self != Verdict::Inconclusive
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Held => write!(f, "Held"),
            Verdict::Violated => write!(f, "Violated"),
            Verdict::Inconclusive => write!(f, "Inconclusive"),
        }
    }
}

/// A failed sub-check of the growth invariant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Violation {
    CoherenceNotGrowing,
    StressNotDecreasing,
    FluctuationPowerIncreasing,
    SlowStressNotDecreasing,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Violation::CoherenceNotGrowing => "coherence not growing",
            Violation::StressNotDecreasing => "stress not decreasing",
            Violation::FluctuationPowerIncreasing => "AC power increasing",
            Violation::SlowStressNotDecreasing => "DC stress not decreasing",
        };
        f.write_str(text)
    }
}

/// `"Violation: a; b"` for the given sub-checks
pub(crate) fn violation_text<T: fmt::Display>(violations: &[T], separator: &str) -> String {
    let parts: Vec<String> = violations.iter().map(ToString::to_string).collect();
    format!("Violation: {}", parts.join(separator))
}

/// Diagnostic record of one growth-invariant evaluation
///
/// Built once per call and never modified. Numeric fields may be NaN or
/// infinite when the input contained non-finite samples; check
/// [`InvariantRecord::is_finite`] before trusting the verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvariantRecord {
    /// Mean time derivative of `log(C + eps)`
    pub coherence_gain_mean: f64,

    /// Least-squares slope of stress against time
    pub stress_slope: f64,

    /// Slope of the forcing signal's windowed fluctuation power
    pub fluctuation_power_trend: f64,

    /// Slope of the stress trend component, 0.0 when that check is off
    pub slow_stress_slope: f64,

    pub coherence_growing: bool,
    pub stress_decreasing: bool,
    pub fluctuation_not_increasing: bool,

    /// `None` when the slow stress-trend check is disabled
    pub slow_stress_decreasing: Option<bool>,

    /// True only when the verdict is [`Verdict::Held`]
    pub holds: bool,
    pub verdict: Verdict,

    /// Failed sub-checks in evaluation order
    pub violations: Vec<Violation>,

    /// Number of aligned samples the evaluation used, 0 when inconclusive
    pub window_samples: usize,

    /// Whether non-positive coherence samples were raised to the floor
    pub coherence_clamped: bool,

    /// Human-readable summary of the verdict
    pub reason: String,
}

impl InvariantRecord {
    pub(crate) fn insufficient_data(require_slow_stress_trend: bool) -> Self {
        Self {
            coherence_gain_mean: 0.0,
            stress_slope: 0.0,
            fluctuation_power_trend: 0.0,
            slow_stress_slope: 0.0,
            coherence_growing: false,
            stress_decreasing: false,
            fluctuation_not_increasing: false,
            slow_stress_decreasing: require_slow_stress_trend.then_some(false),
            holds: false,
            verdict: Verdict::Inconclusive,
            violations: Vec::new(),
            window_samples: 0,
            coherence_clamped: false,
            reason: INSUFFICIENT_DATA_REASON.to_string(),
        }
    }

    pub fn is_inconclusive(&self) -> bool {
        self.verdict == Verdict::Inconclusive
    }

    /// The reason text of a violated record; `None` when it held or was
    /// inconclusive
    pub fn violation_reason(&self) -> Option<&str> {
        (self.verdict == Verdict::Violated).then_some(self.reason.as_str())
    }

    /// Whether every numeric diagnostic is finite
    pub fn is_finite(&self) -> bool {
        [
            self.coherence_gain_mean,
            self.stress_slope,
            self.fluctuation_power_trend,
            self.slow_stress_slope,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

impl fmt::Display for InvariantRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (G={:.3e}, dS/dt={:.3e}, dPac/dt={:.3e}, n={}): {}",
            self.verdict,
            self.coherence_gain_mean,
            self.stress_slope,
            self.fluctuation_power_trend,
            self.window_samples,
            self.reason
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_text() {
        assert_eq!(Violation::FluctuationPowerIncreasing.to_string(), "AC power increasing");
        assert_eq!(
            violation_text(
                &[Violation::CoherenceNotGrowing, Violation::SlowStressNotDecreasing],
                "; "
            ),
            "Violation: coherence not growing; DC stress not decreasing"
        );
    }

    #[test]
    fn test_insufficient_record() {
        let record = InvariantRecord::insufficient_data(true);
        assert!(record.is_inconclusive());
        assert!(!record.holds);
        assert_eq!(record.reason, "Insufficient data");
        assert_eq!(record.violation_reason(), None);
        assert_eq!(record.slow_stress_decreasing, Some(false));
        assert!(record.is_finite());

        assert_eq!(InvariantRecord::insufficient_data(false).slow_stress_decreasing, None);
    }

    #[test]
    fn test_verdict() {
        assert!(Verdict::Held.holds());
        assert!(!Verdict::Violated.holds());
        assert!(!Verdict::Inconclusive.is_conclusive());
        assert_eq!(Verdict::Inconclusive.to_string(), "Inconclusive");
    }
}
