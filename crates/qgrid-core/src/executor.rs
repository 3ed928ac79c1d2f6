//! Final-state execution and marginalization.

use std::collections::BTreeSet;
use std::time::Instant;
use tracing::{debug, instrument};

use qgrid_ir::{Circuit, EngineResult, SimulationEngine, WireId, probabilities};

use crate::request::MeasureToggle;

/// Wires whose toggle is on and that exist in an `num_wires`-wire register,
/// ascending and de-duplicated.
pub fn selected_wires(selection: &[MeasureToggle], num_wires: u32) -> Vec<WireId> {
    let selected: BTreeSet<WireId> = selection
        .iter()
        .filter(|entry| entry.toggle == 1)
        .filter_map(|entry| u32::try_from(entry.qubit).ok())
        .filter(|&qubit| qubit < num_wires)
        .map(WireId)
        .collect();

    if selected.len() < selection.iter().filter(|e| e.toggle == 1).count() {
        debug!(
            requested = selection.len(),
            kept = selected.len(),
            "Ignored out-of-range or repeated measurement entries"
        );
    }
    selected.into_iter().collect()
}

/// Sum `probs` over every wire not in `selected`.
///
/// `probs` holds `2^num_wires` entries with wire 0 as the most significant
/// bit. `selected` must be ascending and in range; the result has
/// `2^selected.len()` entries and the first selected wire is its most
/// significant bit. An empty selection yields `[1.0]`.
pub fn marginalize(probs: &[f64], num_wires: u32, selected: &[WireId]) -> Vec<f64> {
    if selected.is_empty() {
        return vec![1.0];
    }

    let n = num_wires as usize;
    let m = selected.len();
    let shifts: Vec<(usize, usize)> = selected
        .iter()
        .enumerate()
        .map(|(k, wire)| (n - 1 - wire.index(), m - 1 - k))
        .collect();

    let mut out = vec![0.0; 1 << m];
    for (basis, p) in probs.iter().enumerate() {
        let mut index = 0;
        for &(from, to) in &shifts {
            index |= ((basis >> from) & 1) << to;
        }
        out[index] += p;
    }
    out
}

/// Runs a plain circuit once and reduces it to the selected wires.
pub struct Executor<'e> {
    engine: &'e dyn SimulationEngine,
    deadline: Option<Instant>,
}

impl<'e> Executor<'e> {
    /// Create an executor on `engine` with no deadline.
    pub fn new(engine: &'e dyn SimulationEngine) -> Self {
        Self {
            engine,
            deadline: None,
        }
    }

    /// Give up once `deadline` has passed.
    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Simulate `circuit` and return the distribution over the selected wires.
    #[instrument(skip_all, fields(engine = self.engine.name(), wires = circuit.num_wires()))]
    pub fn run(&self, circuit: &Circuit, selection: &[MeasureToggle]) -> EngineResult<Vec<f64>> {
        let n = circuit.num_wires();
        let moments = circuit.moments();
        let amplitudes = self.engine.simulate(n, moments, self.deadline)?;
        let probs = probabilities(&amplitudes);
        let selected = selected_wires(selection, n);

        debug!(selected = ?selected, "Marginalizing final state");
        Ok(marginalize(&probs, n, &selected))
    }
}
