//! Phase-domain primitives
//!
//! Instantaneous phase extraction via the Hilbert transform, linear phase-trend
//! removal, circular concentration statistics, the phase-locking value
//! with surrogate bias correction and windowed entrainment measures.
//!
//! All functions are pure: they borrow their input series and return newly
//! owned results. The only randomness (surrogate shifts for the PLV bias
//! correction) comes from an explicitly seeded or caller-supplied generator.
//!
//! # Example
//!
//! ```rust
//! use harmony_phase::{analytic_phase, phase_lock_value, unwrap};
//!
//! let fs = 100.0;
//! let a: Vec<f64> = (0..400)
//!     .map(|i| (2.0 * std::f64::consts::PI * 2.0 * i as f64 / fs).sin())
//!     .collect();
//! let b: Vec<f64> = (0..400)
//!     .map(|i| (2.0 * std::f64::consts::PI * 2.0 * i as f64 / fs + 0.7).sin())
//!     .collect();
//!
//! let (_, phase_a) = analytic_phase(&a).unwrap();
//! let (_, phase_b) = analytic_phase(&b).unwrap();
//!
//! // A constant phase offset is perfectly locked
//! let plv = phase_lock_value(&unwrap(&phase_a), &unwrap(&phase_b), false, 0, None);
//! assert!(plv > 0.99);
//! ```

pub mod analytic;
pub mod coherence;
pub mod concentration;
pub mod entrainment;
pub mod locking;

pub use analytic::{analytic_phase, detrend_linear, unwrap, AnalyticSignal};
pub use coherence::{PhaseCoherence, MIN_SPECTRAL_SAMPLES, SPECTRAL_POWER_FLOOR};
pub use concentration::{coherence_gain_rate, kuramoto_order_parameter, phase_concentration};
pub use entrainment::{arnold_tongue_boundary, effective_coupling, Entrainment};
pub use locking::{phase_lock_value, phase_lock_value_with_rng, BiasCorrection};
