//! Operations placed inside a moment.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::wire::WireId;

/// Marks a wire/column position whose marginal is read out mid-circuit.
///
/// `column` is the position in the authored grid, so barrier columns that
/// were skipped during assembly still count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProbeMarker {
    /// The probed wire.
    pub wire: WireId,
    /// Column index in the original grid.
    pub column: usize,
}

/// One operation in a moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// A single-wire gate.
    Gate {
        /// The gate.
        gate: StandardGate,
        /// Target wire.
        target: WireId,
    },
    /// A single-wire gate that only acts when every control wire is |1⟩.
    ControlledGate {
        /// The gate.
        gate: StandardGate,
        /// Target wire.
        target: WireId,
        /// Control wires, in the order they were collected.
        controls: Vec<WireId>,
    },
    /// Exchange the states of two wires.
    Swap {
        /// First wire.
        a: WireId,
        /// Second wire.
        b: WireId,
    },
    /// A swap that only acts when every control wire is |1⟩.
    ControlledSwap {
        /// First wire.
        a: WireId,
        /// Second wire.
        b: WireId,
        /// Control wires.
        controls: Vec<WireId>,
    },
    /// Identity carrying a probe marker.
    Probe(ProbeMarker),
}

impl Operation {
    /// Create an uncontrolled single-wire gate.
    pub fn gate(gate: StandardGate, target: WireId) -> Self {
        Operation::Gate { gate, target }
    }

    /// Create an identity on `wire`.
    pub fn identity(wire: WireId) -> Self {
        Self::gate(StandardGate::I, wire)
    }

    /// Create a single-wire gate controlled by `controls`.
    ///
    /// An empty control set yields a plain [`Operation::Gate`].
    pub fn controlled(gate: StandardGate, target: WireId, controls: &[WireId]) -> Self {
        if controls.is_empty() {
            Operation::Gate { gate, target }
        } else {
            Operation::ControlledGate {
                gate,
                target,
                controls: controls.to_vec(),
            }
        }
    }

    /// Create a swap, controlled by `controls` when non-empty.
    pub fn swap(a: WireId, b: WireId, controls: &[WireId]) -> Self {
        if controls.is_empty() {
            Operation::Swap { a, b }
        } else {
            Operation::ControlledSwap {
                a,
                b,
                controls: controls.to_vec(),
            }
        }
    }

    /// Create a probe marker at `(wire, column)`.
    pub fn probe(wire: WireId, column: usize) -> Self {
        Operation::Probe(ProbeMarker { wire, column })
    }

    /// Control wires of this operation (empty when uncontrolled).
    pub fn controls(&self) -> &[WireId] {
        match self {
            Operation::ControlledGate { controls, .. }
            | Operation::ControlledSwap { controls, .. } => controls,
            _ => &[],
        }
    }

    /// Wires acted on (targets first, then controls).
    pub fn wires(&self) -> Vec<WireId> {
        match self {
            Operation::Gate { target, .. } => vec![*target],
            Operation::ControlledGate {
                target, controls, ..
            } => std::iter::once(*target).chain(controls.iter().copied()).collect(),
            Operation::Swap { a, b } => vec![*a, *b],
            Operation::ControlledSwap { a, b, controls } => [*a, *b]
                .into_iter()
                .chain(controls.iter().copied())
                .collect(),
            Operation::Probe(marker) => vec![marker.wire],
        }
    }

    /// Check that no wire appears twice in this operation.
    pub fn validate(&self) -> IrResult<()> {
        let wires = self.wires();
        for (i, wire) in wires.iter().enumerate() {
            if wires[..i].contains(wire) {
                return Err(IrError::DuplicateWire {
                    wire: *wire,
                    op_name: Some(self.name()),
                });
            }
        }
        Ok(())
    }

    /// Check if this is a probe marker.
    pub fn is_probe(&self) -> bool {
        matches!(self, Operation::Probe(_))
    }

    /// Get the marker if this is a probe.
    pub fn as_probe(&self) -> Option<&ProbeMarker> {
        match self {
            Operation::Probe(marker) => Some(marker),
            _ => None,
        }
    }

    /// Check if this is a (possibly controlled) swap.
    pub fn is_swap(&self) -> bool {
        matches!(self, Operation::Swap { .. } | Operation::ControlledSwap { .. })
    }

    /// Get the name of the operation, prefixed with one `c` per control.
    pub fn name(&self) -> String {
        let base = match self {
            Operation::Gate { gate, .. } | Operation::ControlledGate { gate, .. } => gate.name(),
            Operation::Swap { .. } | Operation::ControlledSwap { .. } => "swap",
            Operation::Probe(_) => "probe",
        };
        format!("{}{base}", "c".repeat(self.controls().len()))
    }
}
