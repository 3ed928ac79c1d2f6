//! Request and response types of the simulation boundary.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::prober::ProbeReading;
use crate::symbol::Symbol;

/// A simulation request.
///
/// ```json
/// { "circuit": { "gates": [["X", "M"], ["H", 0]] },
///   "to_measure": [{ "qubit": 0, "toggle": 1 }] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub circuit: CircuitSpec,
    #[serde(default)]
    pub to_measure: Vec<MeasureToggle>,
}

/// The authored grid, row-major: row `i` is wire `i`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CircuitSpec {
    #[serde(default)]
    pub gates: Vec<Vec<Symbol>>,
}

/// One entry of the measurement selection.
///
/// Only `toggle == 1` entries whose `qubit` names an existing wire count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureToggle {
    pub qubit: i64,
    #[serde(default)]
    pub toggle: u8,
}

impl SimulationRequest {
    /// Build a request from a grid and a list of selected wires.
    pub fn new(gates: Vec<Vec<Symbol>>, measured: impl IntoIterator<Item = i64>) -> Self {
        Self {
            circuit: CircuitSpec { gates },
            to_measure: measured
                .into_iter()
                .map(|qubit| MeasureToggle { qubit, toggle: 1 })
                .collect(),
        }
    }

    /// Parse a request body.
    pub fn from_json(body: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Both results of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    /// Distribution over the selected wires.
    pub state_vector: Vec<f64>,
    /// Probe readings in scan order.
    pub probed_values: Vec<ProbeReading>,
}

/// Response sent back across the boundary.
///
/// Either both results are present or neither is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SimulationResponse {
    Ok {
        state_vector: Vec<f64>,
        probed_values: Vec<ProbeReading>,
    },
    Error {
        message: String,
    },
}

impl SimulationResponse {
    /// Whether this is a success response.
    pub fn is_ok(&self) -> bool {
        matches!(self, SimulationResponse::Ok { .. })
    }
}

impl From<CoreResult<SimulationOutcome>> for SimulationResponse {
    fn from(result: CoreResult<SimulationOutcome>) -> Self {
        match result {
            Ok(outcome) => SimulationResponse::Ok {
                state_vector: outcome.state_vector,
                probed_values: outcome.probed_values,
            },
            Err(e) => SimulationResponse::Error {
                message: e.to_string(),
            },
        }
    }
}
