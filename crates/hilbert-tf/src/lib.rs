//! # Hilbert Transform Library
//!
//! FFT-based quadrature transform for real-valued signals, built on RustFFT.
//!
//! The analytic signal `z(t) = x(t) + j·H[x(t)]` keeps only the non-negative
//! frequencies of `x`. Its magnitude is the instantaneous amplitude envelope
//! and its argument is the instantaneous phase, which is what the phase
//! primitives downstream consume.
//!
//! ## Mathematical Background
//!
//! In the frequency domain the analytic signal is obtained by weighting the
//! spectrum of `x`:
//! - DC bin: weight 1
//! - positive frequencies: weight 2
//! - Nyquist bin (even lengths only): weight 1
//! - negative frequencies: weight 0
//!
//! The Hilbert transform itself is the imaginary part of the result.
//!
//! ## Basic Usage
//!
//! ```rust
//! use hilbert_tf::HilbertTransform;
//!
//! let signal: Vec<f64> = (0..256)
//!     .map(|i| (2.0 * std::f64::consts::PI * 5.0 * i as f64 / 256.0).cos())
//!     .collect();
//!
//! // Plans are built once and reused for every signal of this length
//! let transformer = HilbertTransform::new(signal.len());
//!
//! let (envelope, phase) = transformer.envelope_and_phase(&signal).unwrap();
//! assert_eq!(envelope.len(), phase.len());
//! ```

use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error types for Hilbert transform operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HilbertError {
    /// Signal length doesn't match the transformer's expected length
    #[error("Signal length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Result type for Hilbert transform operations
pub type HilbertResult<T> = Result<T, HilbertError>;

/// Forward and inverse plans for one signal length
#[derive(Clone)]
struct FftPlans {
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

/// Hilbert transform processor for signals of a fixed length
///
/// Construction plans the forward and inverse FFTs and precomputes the
/// one-sided spectral weights, so repeated calls on signals of the same
/// length only pay for the two transforms.
#[derive(Clone)]
pub struct HilbertTransform {
    length: usize,
    plans: Option<FftPlans>,
    /// Spectral weights that keep DC, double positive frequencies and drop
    /// negative ones
    analytic_gain: Vec<f64>,
}

impl fmt::Debug for HilbertTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HilbertTransform")
            .field("length", &self.length)
            .finish()
    }
}

impl HilbertTransform {
    /// Create a transformer for signals of `length` samples
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hilbert_tf::HilbertTransform;
    ///
    /// let transformer = HilbertTransform::new(1024);
    /// let a = transformer.analytic_signal(&vec![0.0; 1024]);
    /// let b = transformer.analytic_signal(&vec![1.0; 1024]);
    /// assert!(a.is_ok() && b.is_ok());
    /// ```
    pub fn new(length: usize) -> Self {
        let plans = (length > 0).then(|| {
            let mut planner = FftPlanner::<f64>::new();
            FftPlans {
                forward: planner.plan_fft_forward(length),
                inverse: planner.plan_fft_inverse(length),
            }
        });

        let half = length / 2;
        let analytic_gain = (0..length)
            .map(|k| {
                if k == 0 || (length % 2 == 0 && k == half) {
                    1.0
                } else if k <= half {
                    // For odd lengths bin `half` is still a positive frequency
                    2.0
                } else {
                    0.0
                }
            })
            .collect();

        Self {
            length,
            plans,
            analytic_gain,
        }
    }

    /// Get the signal length this transformer handles
    pub fn length(&self) -> usize {
        self.length
    }

    fn check_length(&self, signal: &[f64]) -> HilbertResult<()> {
        if signal.len() != self.length {
            return Err(HilbertError::LengthMismatch {
                expected: self.length,
                actual: signal.len(),
            });
        }
        Ok(())
    }

    /// Compute the analytic signal `x + j·H[x]`
    ///
    /// The real part reproduces the input; the imaginary part is the Hilbert
    /// transform. An empty transformer returns an empty vector.
    pub fn analytic_signal(&self, signal: &[f64]) -> HilbertResult<Vec<Complex<f64>>> {
        self.check_length(signal)?;

        let Some(plans) = &self.plans else {
            return Ok(Vec::new());
        };

        let mut spectrum: Vec<Complex<f64>> =
            signal.iter().map(|&x| Complex::new(x, 0.0)).collect();

        plans.forward.process(&mut spectrum);

        for (bin, &gain) in spectrum.iter_mut().zip(&self.analytic_gain) {
            *bin *= gain;
        }

        plans.inverse.process(&mut spectrum);

        // RustFFT does not normalise the inverse transform
        let norm_factor = 1.0 / self.length as f64;
        Ok(spectrum.into_iter().map(|c| c * norm_factor).collect())
    }

    /// Compute the Hilbert transform `H[x]`
    ///
    /// `H[cos(ωt)] = sin(ωt)` for frequencies that fit a whole number of
    /// periods in the signal.
    pub fn transform(&self, signal: &[f64]) -> HilbertResult<Vec<f64>> {
        Ok(self
            .analytic_signal(signal)?
            .into_iter()
            .map(|z| z.im)
            .collect())
    }

    /// Instantaneous amplitude `|z(t)|`
    pub fn envelope(&self, signal: &[f64]) -> HilbertResult<Vec<f64>> {
        Ok(self
            .analytic_signal(signal)?
            .into_iter()
            .map(|z| z.norm())
            .collect())
    }

    /// Instantaneous phase `arg z(t)`, wrapped to [-π, π]
    pub fn instantaneous_phase(&self, signal: &[f64]) -> HilbertResult<Vec<f64>> {
        Ok(self
            .analytic_signal(signal)?
            .into_iter()
            .map(|z| z.arg())
            .collect())
    }

    /// Envelope and wrapped phase from a single transform
    pub fn envelope_and_phase(&self, signal: &[f64]) -> HilbertResult<(Vec<f64>, Vec<f64>)> {
        Ok(self
            .analytic_signal(signal)?
            .into_iter()
            .map(|z| (z.norm(), z.arg()))
            .unzip())
    }
}

/// Unwrap phase to remove artificial 2π jumps
///
/// Whenever consecutive samples differ by more than π, a multiple of 2π is
/// added so the trajectory becomes continuous.
///
/// # Examples
///
/// ```rust
/// use hilbert_tf::unwrap_phase;
///
/// let wrapped = [3.0, -3.0];
/// let unwrapped = unwrap_phase(&wrapped);
/// assert!((unwrapped[1] - (2.0 * std::f64::consts::PI - 3.0)).abs() < 1e-12);
/// ```
pub fn unwrap_phase(phase: &[f64]) -> Vec<f64> {
    let Some(&first) = phase.first() else {
        return vec![];
    };

    let two_pi = 2.0 * PI;
    let mut unwrapped = Vec::with_capacity(phase.len());
    unwrapped.push(first);

    let mut offset = 0.0;
    for pair in phase.windows(2) {
        let diff = pair[1] - pair[0];
        if diff.abs() > PI {
            offset -= two_pi * (diff / two_pi).round();
        }
        unwrapped.push(pair[1] + offset);
    }

    unwrapped
}

/// One-off Hilbert transform
pub fn hilbert_transform(signal: &[f64]) -> HilbertResult<Vec<f64>> {
    HilbertTransform::new(signal.len()).transform(signal)
}

/// One-off analytic signal
pub fn analytic_signal(signal: &[f64]) -> HilbertResult<Vec<Complex<f64>>> {
    HilbertTransform::new(signal.len()).analytic_signal(signal)
}

/// One-off envelope extraction
pub fn envelope(signal: &[f64]) -> HilbertResult<Vec<f64>> {
    HilbertTransform::new(signal.len()).envelope(signal)
}

/// One-off phase extraction
pub fn instantaneous_phase(signal: &[f64]) -> HilbertResult<Vec<f64>> {
    HilbertTransform::new(signal.len()).instantaneous_phase(signal)
}
