//! Core types for non-coercive growth analysis
//!
//! This crate holds what every other harmony crate shares: the unified error
//! type and the small numeric helpers (means, least-squares slopes, gradients
//! over non-uniform timestamps) that the splitter, the phase primitives and the
//! invariant kernel are built from.
//!
//! # Example
//!
//! ```rust
//! use harmony_core::utils::{gradient, linear_slope, linspace};
//!
//! let t = linspace(0.0, 10.0, 101);
//! let stress: Vec<f64> = t.iter().map(|x| 1.0 - 0.05 * x).collect();
//!
//! assert!(linear_slope(&t, &stress) < 0.0);
//! assert_eq!(gradient(&stress, &t).len(), t.len());
//! ```

pub mod error;
pub mod utils;

// Re-export core types
pub use error::{Error, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::utils::{gradient, linear_fit, linear_slope, linspace, mean, mean_spacing};
}
