//! The seam between circuit assembly and the statevector engine.

use num_complex::Complex64;
use std::time::Instant;

use crate::circuit::Moment;
use crate::error::EngineResult;

/// A noiseless statevector simulator.
///
/// Implementations start from |0…0⟩, apply the operations of each moment in
/// recorded order and return all `2^num_wires` amplitudes. Wire 0 is the most
/// significant bit of the basis-state index.
///
/// Engines hold no per-run state, so one engine may serve independent
/// simulations from several threads.
pub trait SimulationEngine: Send + Sync {
    /// Engine name, for diagnostics.
    fn name(&self) -> &str;

    /// Widest register the engine accepts.
    fn max_wires(&self) -> u32;

    /// Simulate `moments` on a fresh `num_wires`-wire register.
    ///
    /// When `deadline` is set the engine gives up with
    /// [`EngineError::DeadlineExceeded`](crate::EngineError::DeadlineExceeded)
    /// once it has passed.
    fn simulate(
        &self,
        num_wires: u32,
        moments: &[Moment],
        deadline: Option<Instant>,
    ) -> EngineResult<Vec<Complex64>>;
}

/// Squared magnitude of every amplitude.
pub fn probabilities(amplitudes: &[Complex64]) -> Vec<f64> {
    amplitudes.iter().map(Complex64::norm_sqr).collect()
}
