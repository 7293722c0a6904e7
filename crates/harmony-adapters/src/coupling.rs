//! Coupled-oscillator adapter: entrainment and consent dynamics

use harmony_core::Result;
use harmony_invariant::{InvariantKernel, InvariantParameters, InvariantRecord};
use harmony_phase::kuramoto_order_parameter;

/// Applies the growth invariant to oscillator coupling
///
/// Entrainment is healthy when synchrony rises, the mismatch energy between
/// oscillators falls and the applied coupling does not grow more volatile.
#[derive(Debug, Clone, Copy, Default)]
pub struct CouplingAdapter {
    kernel: InvariantKernel,
}

impl CouplingAdapter {
    pub fn new(params: InvariantParameters) -> Result<Self> {
        Ok(Self {
            kernel: InvariantKernel::new(params)?,
        })
    }

    pub fn with_kernel(kernel: InvariantKernel) -> Self {
        Self { kernel }
    }

    pub fn kernel(&self) -> &InvariantKernel {
        &self.kernel
    }

    /// Order parameter as coherence, mismatch energy as stress and coupling
    /// strength as forcing
    pub fn check_entrainment(
        &self,
        t: &[f64],
        order_parameter: &[f64],
        mismatch_energy: &[f64],
        coupling_strength: &[f64],
    ) -> InvariantRecord {
        self.kernel
            .check(t, order_parameter, mismatch_energy, coupling_strength)
    }

    /// [`check_entrainment`](Self::check_entrainment) with the order parameter
    /// computed from per-oscillator phase series
    pub fn check_entrainment_from_phases(
        &self,
        t: &[f64],
        phases: &[Vec<f64>],
        mismatch_energy: &[f64],
        coupling_strength: &[f64],
    ) -> InvariantRecord {
        let order_parameter = kuramoto_order_parameter(phases);
        self.check_entrainment(t, &order_parameter, mismatch_energy, coupling_strength)
    }

    /// Phase concentration as coherence, the receiver's resistance as stress
    /// and the applied coupling as forcing
    pub fn check_consent_dynamics(
        &self,
        t: &[f64],
        phase_concentration: &[f64],
        receiver_resistance: &[f64],
        applied_coupling: &[f64],
    ) -> InvariantRecord {
        self.kernel
            .check(t, phase_concentration, receiver_resistance, applied_coupling)
    }
}
