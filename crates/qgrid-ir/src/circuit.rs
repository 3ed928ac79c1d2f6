//! Moment-ordered circuit container.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::operation::{Operation, ProbeMarker};
use crate::wire::{WireId, wires};

/// One discrete time step.
///
/// Operations are applied in the order they were pushed. A grid column
/// bracketed by anticontrol flips therefore touches a wire more than once
/// inside the same moment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Moment {
    ops: Vec<Operation>,
}

impl Moment {
    /// Create an empty moment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation.
    pub fn push(&mut self, op: Operation) {
        self.ops.push(op);
    }

    /// Operations in application order.
    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the moment holds no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Probe markers in this moment, in recorded order.
    pub fn probes(&self) -> impl Iterator<Item = &ProbeMarker> {
        self.ops.iter().filter_map(Operation::as_probe)
    }
}

impl FromIterator<Operation> for Moment {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

/// A circuit over a fixed register of wires.
///
/// The register width is set at construction and never changes; every
/// pushed moment is checked against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of wires.
    num_wires: u32,
    /// Moments in time order.
    moments: Vec<Moment>,
}

impl Circuit {
    /// Create a circuit over `num_wires` wires with no moments.
    pub fn with_wires(name: impl Into<String>, num_wires: u32) -> Self {
        Self {
            name: name.into(),
            num_wires,
            moments: vec![],
        }
    }

    /// Append a moment after validating every operation in it.
    pub fn push_moment(&mut self, moment: Moment) -> IrResult<&mut Self> {
        for op in moment.operations() {
            op.validate()?;
            for wire in op.wires() {
                if wire.0 >= self.num_wires {
                    return Err(IrError::WireNotFound {
                        wire,
                        num_wires: self.num_wires,
                        op_name: Some(op.name()),
                    });
                }
            }
        }
        self.moments.push(moment);
        Ok(self)
    }

    /// Append a moment holding one identity per wire.
    ///
    /// Guarantees that every wire takes part in at least one operation.
    pub fn push_identity_layer(&mut self) -> IrResult<&mut Self> {
        let layer: Moment = wires(self.num_wires).map(Operation::identity).collect();
        self.push_moment(layer)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of wires.
    pub fn num_wires(&self) -> u32 {
        self.num_wires
    }

    /// The wires of this circuit in ascending order.
    pub fn wires(&self) -> impl Iterator<Item = WireId> + Clone {
        wires(self.num_wires)
    }

    /// All moments in time order.
    pub fn moments(&self) -> &[Moment] {
        &self.moments
    }

    /// Number of moments.
    pub fn depth(&self) -> usize {
        self.moments.len()
    }

    /// Total number of operations across all moments.
    pub fn num_ops(&self) -> usize {
        self.moments.iter().map(Moment::len).sum()
    }

    /// The moments strictly before `upto`.
    pub fn prefix(&self, upto: usize) -> IrResult<&[Moment]> {
        self.moments
            .get(..upto)
            .ok_or(IrError::MomentOutOfRange {
                index: upto,
                len: self.moments.len(),
            })
    }

    /// Every probe marker with the index of the moment holding it, in scan order.
    pub fn probes(&self) -> impl Iterator<Item = (usize, &ProbeMarker)> {
        self.moments
            .iter()
            .enumerate()
            .flat_map(|(index, moment)| moment.probes().map(move |marker| (index, marker)))
    }
}
