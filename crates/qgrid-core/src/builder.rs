//! Circuit assembly from a [`Layout`].

use tracing::{debug, instrument};

use qgrid_ir::{Circuit, IrResult};

use crate::layout::Layout;
use crate::resolver::{ColumnResolver, MeasureMode};

/// Builds the final-state and probe-instrumented circuits of a layout.
#[derive(Debug, Clone, Copy)]
pub struct CircuitBuilder<'a> {
    layout: &'a Layout,
}

impl<'a> CircuitBuilder<'a> {
    /// Create a builder over `layout`.
    pub fn new(layout: &'a Layout) -> Self {
        Self { layout }
    }

    /// One moment per non-barrier column with `M` inert, then an identity layer.
    #[instrument(skip(self), fields(wires = self.layout.num_wires()))]
    pub fn build_plain(&self) -> IrResult<Circuit> {
        let resolver = ColumnResolver::new(MeasureMode::Inert);
        let mut circuit = Circuit::with_wires("plain", self.layout.num_wires());

        for column in self.layout.columns() {
            circuit.push_moment(resolver.moment(&column))?;
        }
        circuit.push_identity_layer()?;

        debug!(
            moments = circuit.depth(),
            ops = circuit.num_ops(),
            "Built plain circuit"
        );
        Ok(circuit)
    }

    /// An identity layer, one moment per non-barrier column with probe markers
    /// at `M` cells, then another identity layer.
    ///
    /// Markers carry the column index of the original grid.
    #[instrument(skip(self), fields(wires = self.layout.num_wires()))]
    pub fn build_probed(&self) -> IrResult<Circuit> {
        let resolver = ColumnResolver::new(MeasureMode::Probe);
        let mut circuit = Circuit::with_wires("probed", self.layout.num_wires());

        circuit.push_identity_layer()?;
        for column in self.layout.columns() {
            circuit.push_moment(resolver.moment(&column))?;
        }
        circuit.push_identity_layer()?;

        debug!(
            moments = circuit.depth(),
            probes = circuit.probes().count(),
            "Built probed circuit"
        );
        Ok(circuit)
    }
}
