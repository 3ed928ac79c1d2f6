//! Mid-circuit probing.
//!
//! A marker at moment `k` is read by simulating moments `[0, k)` from scratch
//! and taking the marginal probability that the marked wire is |1⟩. Nothing
//! collapses and the final-state run is unaffected.

use num_complex::Complex64;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, instrument};

use qgrid_ir::{Circuit, ProbeMarker, SimulationEngine, WireId, probabilities};

use crate::error::CoreResult;
use crate::executor::marginalize;

/// One probe result, as reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbeReading {
    /// Probed wire.
    pub row: u32,
    /// Column in the original grid.
    pub col: usize,
    /// Probability that the wire reads |1⟩ just before the column.
    pub value: f64,
}

/// Simulate the moments of `circuit` strictly before `upto`.
pub fn simulate_prefix(
    engine: &dyn SimulationEngine,
    circuit: &Circuit,
    upto: usize,
    deadline: Option<Instant>,
) -> CoreResult<Vec<Complex64>> {
    let prefix = circuit.prefix(upto)?;
    Ok(engine.simulate(circuit.num_wires(), prefix, deadline)?)
}

/// P(wire = 1) from a full distribution.
fn excited_population(probs: &[f64], num_wires: u32, wire: WireId) -> f64 {
    marginalize(probs, num_wires, &[wire])[1]
}

/// Reads every probe marker of a probe-instrumented circuit.
pub struct Prober<'e> {
    engine: &'e dyn SimulationEngine,
    deadline: Option<Instant>,
    parallel: bool,
    memoize: bool,
}

impl<'e> Prober<'e> {
    /// Create a prober on `engine`; parallel and memoized, no deadline.
    pub fn new(engine: &'e dyn SimulationEngine) -> Self {
        Self {
            engine,
            deadline: None,
            parallel: true,
            memoize: true,
        }
    }

    /// Give up once `deadline` has passed.
    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Run prefix simulations on the rayon pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Simulate each distinct prefix once.
    pub fn memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// Read all markers, in scan order.
    #[instrument(skip_all, fields(engine = self.engine.name(), moments = circuit.depth()))]
    pub fn probe(&self, circuit: &Circuit) -> CoreResult<Vec<ProbeReading>> {
        let markers: Vec<(usize, ProbeMarker)> =
            circuit.probes().map(|(k, marker)| (k, *marker)).collect();
        if markers.is_empty() {
            return Ok(vec![]);
        }

        let n = circuit.num_wires();
        let prefix_probs = |upto: usize| -> CoreResult<Vec<f64>> {
            let amplitudes = simulate_prefix(self.engine, circuit, upto, self.deadline)?;
            Ok(probabilities(&amplitudes))
        };

        let values: Vec<f64> = if self.memoize {
            let mut groups: FxHashMap<usize, Vec<usize>> = FxHashMap::default();
            for (idx, (k, _)) in markers.iter().enumerate() {
                groups.entry(*k).or_default().push(idx);
            }
            let mut groups: Vec<(usize, Vec<usize>)> = groups.into_iter().collect();
            groups.sort_unstable_by_key(|(k, _)| *k);
            debug!(
                markers = markers.len(),
                prefixes = groups.len(),
                parallel = self.parallel,
                "Probing with shared prefixes"
            );

            // each distribution is dropped as soon as its markers are read
            let read = self.map(&groups, |(k, indices)| {
                let probs = prefix_probs(*k)?;
                Ok(indices
                    .iter()
                    .map(|&idx| (idx, excited_population(&probs, n, markers[idx].1.wire)))
                    .collect::<Vec<_>>())
            })?;

            let mut values = vec![0.0; markers.len()];
            for (idx, value) in read.into_iter().flatten() {
                values[idx] = value;
            }
            values
        } else {
            debug!(
                markers = markers.len(),
                parallel = self.parallel,
                "Probing one prefix per marker"
            );
            self.map(&markers, |(k, marker)| {
                prefix_probs(*k).map(|probs| excited_population(&probs, n, marker.wire))
            })?
        };

        Ok(markers
            .iter()
            .zip(values)
            .map(|((_, marker), value)| ProbeReading {
                row: marker.wire.0,
                col: marker.column,
                value,
            })
            .collect())
    }

    /// Apply `f` to every item, keeping input order, stopping at the first error.
    fn map<T, R, F>(&self, items: &[T], f: F) -> CoreResult<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> CoreResult<R> + Sync + Send,
    {
        if self.parallel {
            items.par_iter().map(f).collect()
        } else {
            items.iter().map(f).collect()
        }
    }
}
