//! # Harmony
//!
//! Checks whether a process grows in internal order without being pushed by
//! escalating external force, using one kernel across physiological signals,
//! oscillator coupling and dialogue.
//!
//! ## Crates
//!
//! - [`harmony_core`]: shared error type and numeric helpers
//! - [`harmony_acdc`]: slow trend / fast fluctuation splitting
//! - [`hilbert_tf`]: FFT-based Hilbert transform
//! - [`harmony_phase`]: phase extraction, concentration and phase locking
//! - [`harmony_invariant`]: the growth invariant kernel and related invariants
//! - [`harmony_adapters`]: domain adapters and proxy builders
//!
//! ## Example
//!
//! ```rust
//! use harmony::prelude::*;
//!
//! let t = linspace(0.0, 60.0, 300);
//! let coherence: Vec<f64> = t.iter().map(|x| 0.2 + 0.6 * (1.0 - (-x / 20.0).exp())).collect();
//! let stress: Vec<f64> = t.iter().map(|x| 1.0 - 0.5 * x / 60.0).collect();
//! let forcing = vec![0.2; t.len()];
//!
//! let record = InvariantKernel::default().check(&t, &coherence, &stress, &forcing);
//! assert_eq!(record.verdict, Verdict::Held);
//! ```

// Re-export workspace crates
pub use harmony_acdc;
pub use harmony_adapters;
pub use harmony_core;
pub use harmony_invariant;
pub use harmony_phase;
pub use hilbert_tf;

pub use harmony_core::{Error, Result};

/// Common imports for working with harmony
pub mod prelude {
    pub use harmony_acdc::{Decomposition, EmaKernel};
    pub use harmony_adapters::{CouplingAdapter, DialogueAdapter, PhysiologyAdapter};
    pub use harmony_core::utils::linspace;
    pub use harmony_core::{Error, Result};
    pub use harmony_invariant::{
        ConsecutiveHoldTracker, ContinuousParameters, ContinuousReport, InvariantKernel,
        InvariantParameters, InvariantProperties, InvariantRecord, Verdict, Violation,
    };
    pub use harmony_phase::{
        analytic_phase, phase_concentration, phase_lock_value, unwrap, BiasCorrection, Entrainment,
    };
}
