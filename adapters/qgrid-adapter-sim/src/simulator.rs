//! Statevector engine implementation.

use num_complex::Complex64;
use std::time::Instant;
use tracing::{debug, instrument};

use qgrid_ir::{EngineError, EngineResult, Moment, SimulationEngine};

use crate::statevector::Statevector;

/// Default register limit (a 24-wire state is 256 MiB of amplitudes).
pub const DEFAULT_MAX_WIRES: u32 = 24;

/// Local statevector engine.
///
/// Each call to [`SimulationEngine::simulate`] allocates its own
/// [`Statevector`]; the engine itself only carries limits.
#[derive(Debug, Clone)]
pub struct StatevectorEngine {
    /// Engine name.
    name: String,
    /// Maximum number of wires supported.
    max_wires: u32,
}

impl StatevectorEngine {
    /// Create a new engine with default settings.
    pub fn new() -> Self {
        Self::with_max_wires(DEFAULT_MAX_WIRES)
    }

    /// Create an engine with a custom wire limit.
    pub fn with_max_wires(max_wires: u32) -> Self {
        Self {
            name: "statevector".into(),
            max_wires,
        }
    }

    fn check_wires(&self, num_wires: u32, moments: &[Moment]) -> EngineResult<()> {
        if num_wires > self.max_wires {
            return Err(EngineError::CircuitTooLarge {
                engine: self.name.clone(),
                requested: num_wires,
                max: self.max_wires,
            });
        }
        for op in moments.iter().flat_map(Moment::operations) {
            if let Some(wire) = op.wires().into_iter().find(|w| w.0 >= num_wires) {
                return Err(EngineError::WireOutOfRange {
                    op_name: op.name(),
                    wire,
                    num_wires,
                });
            }
        }
        Ok(())
    }
}

impl Default for StatevectorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationEngine for StatevectorEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_wires(&self) -> u32 {
        self.max_wires
    }

    #[instrument(skip(self, moments, deadline), fields(moments = moments.len()))]
    fn simulate(
        &self,
        num_wires: u32,
        moments: &[Moment],
        deadline: Option<Instant>,
    ) -> EngineResult<Vec<Complex64>> {
        self.check_wires(num_wires, moments)?;

        let start = Instant::now();
        let mut sv = Statevector::new(num_wires as usize);
        debug!(
            "Starting simulation: {} wires, {} moments",
            sv.num_qubits(),
            moments.len()
        );

        for (index, moment) in moments.iter().enumerate() {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    return Err(EngineError::DeadlineExceeded {
                        elapsed: start.elapsed(),
                        moments_done: index,
                        moments_total: moments.len(),
                    });
                }
            }
            for op in moment.operations() {
                sv.apply(op);
            }
        }

        debug!("Simulation completed in {:?}", start.elapsed());
        Ok(sv.into_amplitudes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qgrid_ir::{Circuit, Operation, StandardGate, WireId, probabilities};
    use std::time::Duration;

    fn moment(ops: impl IntoIterator<Item = Operation>) -> Moment {
        ops.into_iter().collect()
    }

    #[test]
    fn test_engine_limits() {
        let engine = StatevectorEngine::new();
        assert_eq!(engine.name(), "statevector");
        assert_eq!(engine.max_wires(), DEFAULT_MAX_WIRES);
    }

    #[test]
    fn test_engine_bell_state() {
        let engine = StatevectorEngine::new();
        let mut circuit = Circuit::with_wires("bell", 2);
        circuit
            .push_moment(moment([Operation::gate(StandardGate::H, WireId(0))]))
            .unwrap()
            .push_moment(moment([Operation::controlled(
                StandardGate::X,
                WireId(1),
                &[WireId(0)],
            )]))
            .unwrap();

        let amps = engine
            .simulate(circuit.num_wires(), circuit.moments(), None)
            .unwrap();
        let probs = probabilities(&amps);
        assert!((probs[0] - 0.5).abs() < 1e-10);
        assert!((probs[3] - 0.5).abs() < 1e-10);
        assert!(probs[1].abs() < 1e-10);
        assert!(probs[2].abs() < 1e-10);
    }

    #[test]
    fn test_engine_empty_register() {
        let engine = StatevectorEngine::new();
        let amps = engine.simulate(0, &[], None).unwrap();
        assert_eq!(amps, vec![Complex64::new(1.0, 0.0)]);
    }

    #[test]
    fn test_engine_too_many_wires() {
        let engine = StatevectorEngine::with_max_wires(5);
        let result = engine.simulate(10, &[], None);
        assert!(matches!(
            result,
            Err(EngineError::CircuitTooLarge {
                requested: 10,
                max: 5,
                ..
            })
        ));
    }

    #[test]
    fn test_engine_wire_out_of_range() {
        let engine = StatevectorEngine::new();
        let moments = [moment([Operation::gate(StandardGate::X, WireId(3))])];
        assert!(matches!(
            engine.simulate(2, &moments, None),
            Err(EngineError::WireOutOfRange {
                wire: WireId(3),
                ..
            })
        ));
    }

    #[test]
    fn test_engine_deadline_exceeded() {
        let engine = StatevectorEngine::new();
        let moments = [moment([Operation::gate(StandardGate::H, WireId(0))])];
        let past = Instant::now()
            .checked_sub(Duration::from_millis(1))
            .unwrap_or_else(Instant::now);
        let result = engine.simulate(1, &moments, Some(past));
        assert!(matches!(
            result,
            Err(EngineError::DeadlineExceeded {
                moments_done: 0,
                moments_total: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_engine_generous_deadline() {
        let engine = StatevectorEngine::new();
        let moments = [moment([Operation::gate(StandardGate::X, WireId(0))])];
        let deadline = Instant::now() + Duration::from_secs(60);
        let amps = engine.simulate(1, &moments, Some(deadline)).unwrap();
        assert!((amps[1].norm_sqr() - 1.0).abs() < 1e-10);
    }
}
