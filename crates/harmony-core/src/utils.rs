//! Utility functions for working with sample series
//!
//! A sample series is a pair of aligned slices: timestamps and values. None of
//! these helpers reject NaN or infinite input; non-finite values flow through
//! the arithmetic into the returned numbers.

/// Calculate the mean of a slice
///
/// Returns 0.0 for empty slices.
///
/// # Examples
///
/// ```rust
/// use harmony_core::utils::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
/// assert_eq!(mean(&[]), 0.0);
/// ```
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Ordinary least-squares slope of `y` against `t`
///
/// Only the common leading length of the two slices is used. Returns 0.0 when
/// fewer than two points are available or the timestamps have zero variance.
///
/// # Examples
///
/// ```rust
/// use harmony_core::utils::linear_slope;
///
/// let t = [0.0, 1.0, 2.0, 3.0];
/// let y = [1.0, 3.0, 5.0, 7.0];
/// assert!((linear_slope(&t, &y) - 2.0).abs() < 1e-12);
/// assert_eq!(linear_slope(&[1.0], &[4.0]), 0.0);
/// ```
pub fn linear_slope(t: &[f64], y: &[f64]) -> f64 {
    let n = t.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    let (t, y) = (&t[..n], &y[..n]);

    let t_mean = mean(t);
    let y_mean = mean(y);

    let (numerator, denominator) = t.iter().zip(y).fold((0.0, 0.0), |(num, den), (&ti, &yi)| {
        let dt = ti - t_mean;
        (num + dt * (yi - y_mean), den + dt * dt)
    });

    if denominator != 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Least-squares line `(slope, intercept)` of `y` against `t`
///
/// Degenerate inputs give a zero slope and the mean of `y` as intercept.
pub fn linear_fit(t: &[f64], y: &[f64]) -> (f64, f64) {
    let n = t.len().min(y.len());
    let slope = linear_slope(t, y);
    let intercept = mean(&y[..n]) - slope * mean(&t[..n]);
    (slope, intercept)
}

/// Numerical gradient of `values` with respect to the sample coordinates `coords`
///
/// Interior points use second-order accurate central differences that account
/// for non-uniform spacing; the two end points use one-sided first-order
/// differences. A single sample yields `[0.0]`, an empty input yields an empty
/// vector.
///
/// # Examples
///
/// ```rust
/// use harmony_core::utils::gradient;
///
/// // d/dt of t^2 at t = 1 with uneven spacing is exact for a quadratic
/// let t = [0.0, 1.0, 3.0];
/// let y: Vec<f64> = t.iter().map(|x| x * x).collect();
/// let g = gradient(&y, &t);
/// assert!((g[1] - 2.0).abs() < 1e-12);
/// ```
pub fn gradient(values: &[f64], coords: &[f64]) -> Vec<f64> {
    let n = values.len().min(coords.len());
    match n {
        0 => return Vec::new(),
        1 => return vec![0.0],
        _ => {}
    }
    let (f, x) = (&values[..n], &coords[..n]);

    let mut grad = Vec::with_capacity(n);
    grad.push((f[1] - f[0]) / (x[1] - x[0]));

    for i in 1..n - 1 {
        let hs = x[i] - x[i - 1];
        let hd = x[i + 1] - x[i];
        let num = hs * hs * f[i + 1] + (hd * hd - hs * hs) * f[i] - hd * hd * f[i - 1];
        grad.push(num / (hs * hd * (hd + hs)));
    }

    grad.push((f[n - 1] - f[n - 2]) / (x[n - 1] - x[n - 2]));
    grad
}

/// `n` evenly spaced points over `[start, end]`, both ends included
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Mean spacing between consecutive timestamps, `None` with fewer than two
pub fn mean_spacing(t: &[f64]) -> Option<f64> {
    if t.len() < 2 {
        return None;
    }
    Some((t[t.len() - 1] - t[0]) / (t.len() - 1) as f64)
}

/// Trailing `n` samples of `data`, or all of it when shorter
#[inline]
pub fn tail(data: &[f64], n: usize) -> &[f64] {
    &data[data.len().saturating_sub(n)..]
}
