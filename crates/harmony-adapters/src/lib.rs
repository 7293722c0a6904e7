//! # Harmony Adapters
//!
//! Thin wrappers that map a domain's measurements onto the invariant kernel's
//! generic `(t, coherence, stress, forcing)` signature.
//!
//! | Adapter | Coherence | Stress | Forcing |
//! |---|---|---|---|
//! | [`PhysiologyAdapter`] | heart coherence | stress index | influence carrier, amplitude or stress |
//! | [`CouplingAdapter`] | order parameter | mismatch energy | coupling strength |
//! | [`DialogueAdapter`] | dialogue coherence | recipient resistance | linguistic push |
//!
//! The [`proxies`] module builds unit-interval stress and coherence series
//! from raw signals.

pub mod coupling;
pub mod dialogue;
pub mod physiology;
pub mod proxies;

pub use coupling::CouplingAdapter;
pub use dialogue::{DialogueAdapter, DEFAULT_DIRECTIVE_KEYWORDS};
pub use physiology::{normalized_amplitude, PhysiologyAdapter};
pub use proxies::{
    coherence_compression_gain, stress_composite_physio, stress_prediction_error,
    stress_velocity_energy,
};
