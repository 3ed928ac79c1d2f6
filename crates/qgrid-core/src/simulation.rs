//! One simulation per request.

use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use qgrid_ir::{Circuit, EngineError, SimulationEngine};

use crate::builder::CircuitBuilder;
use crate::config::CoreConfig;
use crate::error::CoreResult;
use crate::executor::Executor;
use crate::layout::Layout;
use crate::prober::{ProbeReading, Prober};
use crate::request::{MeasureToggle, SimulationOutcome, SimulationRequest, SimulationResponse};

/// Owns the layout and both circuits of exactly one request.
///
/// Nothing is shared between simulations except the engine, which holds no
/// per-run state.
pub struct Simulation<'e> {
    engine: &'e dyn SimulationEngine,
    config: CoreConfig,
    layout: Layout,
    selection: Vec<MeasureToggle>,
    plain: Circuit,
    probed: Circuit,
}

impl<'e> Simulation<'e> {
    /// Lay out the request and assemble both circuits.
    #[instrument(skip_all, fields(engine = engine.name()))]
    pub fn new(
        engine: &'e dyn SimulationEngine,
        request: SimulationRequest,
        config: &CoreConfig,
    ) -> CoreResult<Self> {
        let SimulationRequest {
            circuit,
            to_measure,
        } = request;
        let layout = Layout::from_rows(circuit.gates);

        if layout.num_wires() > engine.max_wires() {
            return Err(EngineError::CircuitTooLarge {
                engine: engine.name().to_string(),
                requested: layout.num_wires(),
                max: engine.max_wires(),
            }
            .into());
        }

        let builder = CircuitBuilder::new(&layout);
        let plain = builder.build_plain()?;
        let probed = builder.build_probed()?;

        Ok(Self {
            engine,
            config: config.clone(),
            layout,
            selection: to_measure,
            plain,
            probed,
        })
    }

    /// The authored grid.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The circuit used for the final distribution.
    pub fn plain_circuit(&self) -> &Circuit {
        &self.plain
    }

    /// The circuit carrying probe markers.
    pub fn probed_circuit(&self) -> &Circuit {
        &self.probed
    }

    /// The measurement selection as supplied.
    pub fn selection(&self) -> &[MeasureToggle] {
        &self.selection
    }

    fn deadline(&self, start: Instant) -> Option<Instant> {
        self.config.deadline().map(|budget| start + budget)
    }

    /// Distribution over the selected wires.
    pub fn final_state(&self) -> CoreResult<Vec<f64>> {
        self.final_state_until(self.deadline(Instant::now()))
    }

    /// Probe readings in scan order.
    pub fn probe(&self) -> CoreResult<Vec<ProbeReading>> {
        self.probe_until(self.deadline(Instant::now()))
    }

    fn final_state_until(&self, deadline: Option<Instant>) -> CoreResult<Vec<f64>> {
        Ok(Executor::new(self.engine)
            .with_deadline(deadline)
            .run(&self.plain, &self.selection)?)
    }

    fn probe_until(&self, deadline: Option<Instant>) -> CoreResult<Vec<ProbeReading>> {
        Prober::new(self.engine)
            .with_deadline(deadline)
            .parallel(self.config.probing.parallel)
            .memoize(self.config.probing.memoize)
            .probe(&self.probed)
    }

    /// Final distribution and probe readings, under one shared deadline.
    #[instrument(skip(self), fields(wires = self.layout.num_wires(), columns = self.layout.num_columns()))]
    pub fn run(&self) -> CoreResult<SimulationOutcome> {
        let start = Instant::now();
        let deadline = self.deadline(start);

        let state_vector = self.final_state_until(deadline)?;
        let probed_values = self.probe_until(deadline)?;

        info!(
            outcomes = state_vector.len(),
            probes = probed_values.len(),
            elapsed = ?start.elapsed(),
            "Simulation finished"
        );
        Ok(SimulationOutcome {
            state_vector,
            probed_values,
        })
    }
}

/// Run one parsed request to a response.
pub fn handle(
    engine: &dyn SimulationEngine,
    request: SimulationRequest,
    config: &CoreConfig,
) -> SimulationResponse {
    let result = Simulation::new(engine, request, config).and_then(|sim| sim.run());
    if let Err(e) = &result {
        warn!(error = %e, "Simulation request failed");
    }
    SimulationResponse::from(result)
}

/// Parse a JSON body and run it. A body that does not parse never reaches
/// circuit assembly.
pub fn handle_json(
    engine: &dyn SimulationEngine,
    body: &str,
    config: &CoreConfig,
) -> SimulationResponse {
    match SimulationRequest::from_json(body) {
        Ok(request) => {
            debug!(rows = request.circuit.gates.len(), "Parsed request");
            handle(engine, request, config)
        }
        Err(e) => {
            warn!(error = %e, "Rejected malformed request");
            SimulationResponse::from(Err(e))
        }
    }
}
