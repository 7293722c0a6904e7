//! # Harmony Invariant
//!
//! Judges whether a process grows in internal order without being driven by
//! escalating external force.
//!
//! The kernel takes four aligned series: timestamps `t`, a coherence proxy
//! `C`, a stress proxy `S` and a forcing proxy `x`. A window holds when
//!
//! - the mean time derivative of `log(C + eps)` is positive,
//! - the least-squares slope of `S` is negative,
//! - the windowed fluctuation power of `x` is not trending upward, and
//! - (optionally) the low-pass trend of `S` is falling.
//!
//! Every evaluation returns an immutable [`InvariantRecord`] with a tri-state
//! [`Verdict`], so "could not be evaluated" is never confused with "failed".
//!
//! ## Quick Start
//!
//! ```rust
//! use harmony_core::utils::linspace;
//! use harmony_invariant::{InvariantKernel, Verdict};
//!
//! let kernel = InvariantKernel::default();
//!
//! let t = linspace(0.0, 60.0, 300);
//! let coherence: Vec<f64> = t.iter().map(|x| 0.2 + 0.6 * (1.0 - (-x / 20.0).exp())).collect();
//! // Rising stress: growth is being forced
//! let stress: Vec<f64> = t.iter().map(|x| 0.2 + 0.8 * x / 60.0).collect();
//! let forcing = vec![0.2; t.len()];
//!
//! let record = kernel.check(&t, &coherence, &stress, &forcing);
//! assert_eq!(record.verdict, Verdict::Violated);
//! assert!(record.reason.contains("stress not decreasing"));
//!
//! // Too little data is inconclusive, not a violation
//! let short = kernel.check(&t[..2], &coherence[..2], &stress[..2], &forcing[..2]);
//! assert_eq!(short.verdict, Verdict::Inconclusive);
//! ```
//!
//! ## Continuous Monitoring
//!
//! [`InvariantKernel::check_continuous`] slides a fixed window across longer
//! series and returns a [`ContinuousReport`]. Feed it to a
//! [`ConsecutiveHoldTracker`] to learn when the invariant has held for a
//! number of windows in a row. With the `parallel` feature, windows are
//! evaluated on the rayon thread pool.

pub mod continuous;
pub mod growth_bounds;
pub mod kernel;
pub mod non_coercion;
pub mod params;
pub mod tracker;
pub mod traits;
pub mod types;

pub use continuous::{ContinuousReport, WindowRecord};
pub use growth_bounds::{BoundednessRecord, GrowthBoundsInvariant, GrowthLaw};
pub use kernel::InvariantKernel;
pub use non_coercion::{NonCoercionInvariant, NonCoercionRecord};
pub use params::{ContinuousParameters, InvariantParameters};
pub use tracker::ConsecutiveHoldTracker;
pub use traits::InvariantProperties;
pub use types::{InvariantRecord, Verdict, Violation};
