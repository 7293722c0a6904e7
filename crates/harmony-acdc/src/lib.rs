//! Trend/fluctuation (DC/AC) decomposition
//!
//! Any scalar time series can be separated into a slow trend, produced by a
//! first-order exponential low-pass filter, and the fast residual left over.
//! The residual's power, and whether that power is itself rising over time,
//! is how the invariant kernel judges whether an external forcing signal is
//! escalating.
//!
//! ## Usage
//!
//! ```rust
//! use harmony_acdc::{fluctuation_power_trend, split};
//! use harmony_core::utils::linspace;
//!
//! let t = linspace(0.0, 60.0, 300);
//! let forcing: Vec<f64> = t.iter().map(|x| 0.2 + 0.01 * x.sin()).collect();
//!
//! let parts = split(&forcing, 0.02).unwrap();
//! let trend = fluctuation_power_trend(&parts.residual, &t);
//! println!("AC power trend: {trend:e}");
//! ```

pub mod kernel;
pub mod split;

pub use kernel::{EmaKernel, DEFAULT_SMOOTHING_FACTOR};
pub use split::{
    fluctuation_power, fluctuation_power_profile, fluctuation_power_trend, split, trend_slope,
    Decomposition,
};
