//! Property-based tests for the trend/fluctuation splitter

use approx::assert_abs_diff_eq;
use harmony_acdc::{fluctuation_power, split};
use proptest::prelude::*;

fn series() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-10.0..10.0f64, 0..256)
}

fn smoothing_factor() -> impl Strategy<Value = f64> {
    0.001..=1.0f64
}

proptest! {
    // Property: trend + residual reconstructs the input
    #[test]
    fn prop_reconstruction(x in series(), alpha in smoothing_factor()) {
        let parts = split(&x, alpha).unwrap();
        prop_assert_eq!(parts.trend.len(), x.len());
        prop_assert_eq!(parts.residual.len(), x.len());
        for (rebuilt, original) in parts.reconstruct().iter().zip(&x) {
            prop_assert!((rebuilt - original).abs() <= 1e-10);
        }
    }

    // Property: a constant offset is absorbed by the trend
    #[test]
    fn prop_dc_shift_invariance(
        x in series(),
        alpha in smoothing_factor(),
        offset in -100.0..100.0f64,
    ) {
        let shifted: Vec<f64> = x.iter().map(|v| v + offset).collect();
        let base = fluctuation_power(&split(&x, alpha).unwrap().residual);
        let moved = fluctuation_power(&split(&shifted, alpha).unwrap().residual);
        prop_assert!((base - moved).abs() <= 1e-10 * base.max(1.0), "{} vs {}", base, moved);
    }

    // Property: the split is linear in its input
    #[test]
    fn prop_linearity(
        pair in (1usize..128).prop_flat_map(|n| (
            prop::collection::vec(-10.0..10.0f64, n),
            prop::collection::vec(-10.0..10.0f64, n),
        )),
        a in -5.0..5.0f64,
        b in -5.0..5.0f64,
        alpha in smoothing_factor(),
    ) {
        let (x, y) = pair;
        let combined: Vec<f64> = x.iter().zip(&y).map(|(xi, yi)| a * xi + b * yi).collect();

        let sx = split(&x, alpha).unwrap();
        let sy = split(&y, alpha).unwrap();
        let sc = split(&combined, alpha).unwrap();

        for i in 0..x.len() {
            let trend = a * sx.trend[i] + b * sy.trend[i];
            let residual = a * sx.residual[i] + b * sy.residual[i];
            prop_assert!((sc.trend[i] - trend).abs() <= 1e-10);
            prop_assert!((sc.residual[i] - residual).abs() <= 1e-10);
        }
    }
}

#[test]
fn test_impulse_response_closed_form() {
    for &alpha in &[0.02, 0.1, 0.5, 0.9] {
        let mut impulse = vec![0.0; 64];
        impulse[0] = 1.0;

        let parts = split(&impulse, alpha).unwrap();
        for (i, &dc) in parts.trend.iter().enumerate() {
            assert_abs_diff_eq!(dc, (1.0 - alpha).powi(i as i32), epsilon = 1e-8);
        }
    }
}

#[test]
fn test_non_finite_values_propagate() {
    let parts = split(&[1.0, f64::NAN, 2.0], 0.5).unwrap();
    assert_eq!(parts.trend[0], 1.0);
    assert!(parts.trend[1].is_nan());
    assert!(parts.trend[2].is_nan());
    assert!(fluctuation_power(&parts.residual).is_nan());

    let parts = split(&[1.0, f64::INFINITY], 0.5).unwrap();
    assert!(parts.trend[1].is_infinite());
    assert!(parts.residual[1].is_nan());
}
