//! End-to-end scenarios for the growth invariant kernel

use approx::assert_relative_eq;
use harmony_core::utils::linspace;
use harmony_invariant::{
    ConsecutiveHoldTracker, InvariantKernel, InvariantParameters, InvariantProperties, Verdict,
    Violation,
};
use std::f64::consts::PI;

struct Scenario {
    t: Vec<f64>,
    coherence: Vec<f64>,
    stress: Vec<f64>,
    forcing: Vec<f64>,
}

/// Saturating coherence, linearly falling stress and a small forcing
/// oscillation whose amplitude slowly decays
fn healthy() -> Scenario {
    let t = linspace(0.0, 60.0, 300);
    let coherence = t.iter().map(|x| 0.2 + 0.6 * (1.0 - (-x / 20.0).exp())).collect();
    let stress = t.iter().map(|x| 1.0 - 0.5 * (x / 60.0)).collect();
    let forcing = t
        .iter()
        .map(|x| 0.2 + 0.02 * (1.0 - 0.5 * x / 60.0) * (2.0 * PI * x / 5.0).sin())
        .collect();
    Scenario {
        t,
        coherence,
        stress,
        forcing,
    }
}

fn check(kernel: &InvariantKernel, s: &Scenario) -> harmony_invariant::InvariantRecord {
    kernel.check(&s.t, &s.coherence, &s.stress, &s.forcing)
}

#[test]
fn test_healthy_growth_holds() {
    let record = check(&InvariantKernel::default(), &healthy());

    assert_eq!(record.verdict, Verdict::Held);
    assert!(record.holds);
    assert!(record.coherence_growing);
    assert!(record.stress_decreasing);
    assert!(record.fluctuation_not_increasing);
    assert_eq!(record.slow_stress_decreasing, Some(true));
    assert_eq!(record.window_samples, 300);
    assert_eq!(record.reason, "All conditions satisfied");
    assert_eq!(record.violation_reason(), None);
    assert!(record.violations.is_empty());

    assert_relative_eq!(record.coherence_gain_mean, 0.022644, max_relative = 1e-4);
    assert_relative_eq!(record.stress_slope, -0.5 / 60.0, max_relative = 1e-9);
    assert_relative_eq!(record.slow_stress_slope, -0.007417, max_relative = 1e-3);
}

#[test]
fn test_rising_stress_is_coercive() {
    let mut scenario = healthy();
    scenario.stress = scenario.t.iter().map(|x| 0.2 + 0.8 * (x / 60.0)).collect();

    let record = check(&InvariantKernel::default(), &scenario);
    assert_eq!(record.verdict, Verdict::Violated);
    assert!(!record.holds);
    assert!(record.coherence_growing);
    assert!(!record.stress_decreasing);
    assert!(record.reason.contains("stress not decreasing"));
    assert!(record.violations.contains(&Violation::StressNotDecreasing));
    assert!(record.violations.contains(&Violation::SlowStressNotDecreasing));
    assert_eq!(
        record.violation_reason(),
        Some("Violation: stress not decreasing; DC stress not decreasing")
    );
}

#[test]
fn test_growing_forcing_volatility_is_coercive() {
    let mut scenario = healthy();
    scenario.forcing = scenario
        .t
        .iter()
        .map(|x| 0.2 + (0.01 + 0.2 * x / 60.0) * (2.0 * PI * x / 5.0).sin())
        .collect();

    let record = check(&InvariantKernel::default(), &scenario);
    assert_eq!(record.verdict, Verdict::Violated);
    assert!(!record.fluctuation_not_increasing);
    assert!(record.fluctuation_power_trend > 0.0);
    assert!(record.reason.contains("AC power increasing"));
    assert_eq!(record.violations, vec![Violation::FluctuationPowerIncreasing]);
}

#[test]
fn test_insufficient_data_is_inconclusive() {
    let kernel = InvariantKernel::new(InvariantParameters::default().with_min_window(10)).unwrap();
    let record = kernel.check(&[0.0, 1.0], &[0.5, 0.6], &[1.0, 0.9], &[0.2, 0.2]);

    assert_eq!(record.verdict, Verdict::Inconclusive);
    assert!(!record.holds);
    assert_eq!(record.reason, "Insufficient data");
    assert_eq!(record.violation_reason(), None);
    assert_eq!(record.coherence_gain_mean, 0.0);
    assert_eq!(record.stress_slope, 0.0);
    assert_eq!(record.fluctuation_power_trend, 0.0);
    assert!(!record.coherence_growing && !record.stress_decreasing && !record.fluctuation_not_increasing);
    assert_eq!(record.window_samples, 0);
}

#[test]
fn test_time_translation_invariance() {
    let kernel = InvariantKernel::default();
    let base = healthy();
    let reference = check(&kernel, &base);

    for shift in [-500.0, 1000.0] {
        let shifted = Scenario {
            t: base.t.iter().map(|x| x + shift).collect(),
            ..healthy()
        };
        let record = check(&kernel, &shifted);
        assert_eq!(record.verdict, reference.verdict);
        assert_relative_eq!(record.coherence_gain_mean, reference.coherence_gain_mean, max_relative = 1e-6);
        assert_relative_eq!(record.stress_slope, reference.stress_slope, max_relative = 1e-6);
    }
}

#[test]
fn test_non_finite_input_is_well_formed() {
    let kernel = InvariantKernel::default();

    let mut scenario = healthy();
    scenario.coherence[150] = f64::NAN;
    let record = check(&kernel, &scenario);
    assert!(record.coherence_gain_mean.is_nan());
    assert!(!record.is_finite());
    assert_eq!(record.verdict, Verdict::Violated);
    assert_eq!(record.window_samples, 300);

    let mut scenario = healthy();
    scenario.forcing[10] = f64::INFINITY;
    let record = check(&kernel, &scenario);
    assert!(!record.is_finite());
    assert!(!record.reason.is_empty());

    let mut scenario = healthy();
    scenario.stress[0] = f64::NEG_INFINITY;
    let record = check(&kernel, &scenario);
    assert!(!record.is_finite());
}

#[test]
fn test_slow_stress_toggle_changes_only_that_check() {
    let mut scenario = healthy();
    // Slowly rising stress fails both stress checks
    scenario.stress = scenario.t.iter().map(|x| 0.5 + 0.001 * x).collect();

    let with = check(&InvariantKernel::default(), &scenario);
    let without = check(&InvariantKernel::default().with_slow_stress_trend(false), &scenario);

    assert!(with.violations.contains(&Violation::SlowStressNotDecreasing));
    assert!(!without.violations.contains(&Violation::SlowStressNotDecreasing));
    assert_eq!(without.violation_reason(), Some("Violation: stress not decreasing"));
}

#[test]
fn test_continuous_monitoring_healthy_run() {
    let t = linspace(0.0, 120.0, 601);
    let coherence: Vec<f64> = t.iter().map(|x| 0.2 + 0.6 * (1.0 - (-x / 40.0).exp())).collect();
    let stress: Vec<f64> = t.iter().map(|x| 1.0 - 0.5 * x / 120.0).collect();
    let forcing: Vec<f64> = t
        .iter()
        .map(|x| 0.2 + 0.02 * (1.0 - 0.5 * x / 120.0) * (2.0 * PI * x / 5.0).sin())
        .collect();

    let kernel = InvariantKernel::default();
    let report = kernel
        .check_continuous(&t, &coherence, &stress, &forcing, 30.0, 10.0)
        .unwrap();

    assert_relative_eq!(report.sampling_rate, 5.0, max_relative = 1e-9);
    assert_eq!(report.window_samples, 150);
    assert_eq!(report.step_samples, 50);
    assert_eq!(report.len(), 10);

    let starts = report.timestamps();
    for (i, start) in starts.iter().enumerate() {
        assert_relative_eq!(*start, 10.0 * i as f64, epsilon = 1e-9);
    }
    assert!(report.all_hold());
    assert_eq!(report.hold_fraction(), Some(1.0));

    let mut tracker = ConsecutiveHoldTracker::new(3);
    tracker.extend(&report);
    assert!(tracker.is_sustained());
    assert_eq!(tracker.sustained_since(), Some(3));
    assert_eq!(tracker.window_count(), 10);
}

#[test]
fn test_continuous_detects_onset_of_coercion() {
    let t = linspace(0.0, 120.0, 601);
    let coherence: Vec<f64> = t.iter().map(|x| 0.2 + 0.6 * (1.0 - (-x / 40.0).exp())).collect();
    // Stress falls for a minute, then climbs
    let stress: Vec<f64> = t
        .iter()
        .map(|&x| if x < 60.0 { 1.0 - 0.005 * x } else { 0.7 + 0.01 * (x - 60.0) })
        .collect();
    let forcing = vec![0.2; t.len()];

    let report = InvariantKernel::default()
        .check_continuous(&t, &coherence, &stress, &forcing, 30.0, 10.0)
        .unwrap();

    let verdicts = report.verdicts();
    assert_eq!(verdicts.first(), Some(&Verdict::Held));
    assert_eq!(verdicts.last(), Some(&Verdict::Violated));
    assert!(report.hold_fraction().unwrap() < 1.0);
}

#[test]
fn test_window_shorter_than_min_window_is_inconclusive() {
    let t = linspace(0.0, 59.8, 300);
    let ones = vec![1.0; 300];
    // 1 s windows at 5 Hz hold 5 samples, below the default minimum of 30
    let report = InvariantKernel::default()
        .check_continuous(&t, &ones, &ones, &ones, 1.0, 10.0)
        .unwrap();

    assert!(!report.is_empty());
    assert!(report.iter().all(|w| w.record.verdict == Verdict::Inconclusive));
    assert_eq!(report.hold_fraction(), None);
    assert!(!InvariantKernel::default().can_handle_size(report.window_samples));
}
