//! Per-column semantic analysis.
//!
//! A column is reduced to a shared control set, at most one swap and a list
//! of single-wire primitives. Malformed content never aborts resolution: each
//! degenerate case is a named branch here ([`SwapResolution::Unpaired`],
//! [`SkippedCell`]) that drops the offending cells and logs a warning.

use tracing::warn;

use qgrid_ir::{Moment, Operation, StandardGate, WireId};

use crate::layout::Column;
use crate::symbol::Symbol;

/// Controls and anticontrols of one column, each in ascending wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlSets {
    /// Wires holding `c`.
    pub controls: Vec<WireId>,
    /// Wires holding `ac`.
    pub anticontrols: Vec<WireId>,
}

impl ControlSets {
    /// Controls followed by anticontrols.
    ///
    /// Anticontrols act as ordinary controls once their wire has been flipped.
    pub fn effective(&self) -> Vec<WireId> {
        self.controls
            .iter()
            .chain(&self.anticontrols)
            .copied()
            .collect()
    }

    /// Whether the column has no control of either kind.
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty() && self.anticontrols.is_empty()
    }
}

/// Locate `c` and `ac` cells, scanning wires in ascending order.
pub fn find_controls(column: &Column<'_>) -> ControlSets {
    let mut sets = ControlSets::default();
    for (wire, symbol) in column.cells() {
        match symbol {
            Symbol::Control => sets.controls.push(wire),
            Symbol::Anticontrol => sets.anticontrols.push(wire),
            _ => {}
        }
    }
    sets
}

/// Wires holding `sw`, ascending.
pub fn find_swaps(column: &Column<'_>) -> Vec<WireId> {
    column
        .cells()
        .filter(|(_, symbol)| **symbol == Symbol::Swap)
        .map(|(wire, _)| wire)
        .collect()
}

/// Outcome of pairing the swap slots of a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapResolution {
    /// No `sw` cells.
    None,
    /// Exactly two slots: one swap is emitted.
    Pair(WireId, WireId),
    /// One slot, or three and more: nothing is emitted for them.
    Unpaired(Vec<WireId>),
}

impl SwapResolution {
    /// Classify ascending swap slots.
    pub fn from_slots(slots: Vec<WireId>) -> Self {
        match slots.as_slice() {
            [] => SwapResolution::None,
            [a, b] => SwapResolution::Pair(*a, *b),
            _ => SwapResolution::Unpaired(slots),
        }
    }
}

/// A cell that produced no operation because its symbol is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCell {
    pub wire: WireId,
    pub column: usize,
    pub symbol: String,
}

/// How `M` cells are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasureMode {
    /// `M` emits nothing (final-state circuit).
    #[default]
    Inert,
    /// `M` emits a probe marker tagged with its wire and column.
    Probe,
}

/// A single-wire operation left after controls and swaps are taken out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Gate(StandardGate),
    Measure,
}

/// A fully analysed column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    /// Index of the column in the original grid.
    pub index: usize,
    pub controls: ControlSets,
    pub swap: SwapResolution,
    /// Gate and measure cells in ascending wire order.
    pub primitives: Vec<(WireId, Primitive)>,
    pub skipped: Vec<SkippedCell>,
}

impl ResolvedColumn {
    /// Emit the column as one moment.
    ///
    /// Order inside the moment: anticontrol flips, the swap, gates and probe
    /// markers in wire order, then the anticontrol flips again.
    pub fn to_moment(&self, mode: MeasureMode) -> Moment {
        let controls = self.controls.effective();
        let flips = self
            .controls
            .anticontrols
            .iter()
            .map(|&wire| Operation::gate(StandardGate::X, wire));

        let mut moment: Moment = flips.clone().collect();

        if let SwapResolution::Pair(a, b) = self.swap {
            moment.push(Operation::swap(a, b, &controls));
        }

        for &(wire, primitive) in &self.primitives {
            match (primitive, mode) {
                (Primitive::Gate(gate), _) => {
                    moment.push(Operation::controlled(gate, wire, &controls));
                }
                (Primitive::Measure, MeasureMode::Probe) => {
                    moment.push(Operation::probe(wire, self.index));
                }
                (Primitive::Measure, MeasureMode::Inert) => {}
            }
        }

        for flip in flips {
            moment.push(flip);
        }
        moment
    }
}

/// Reduces grid columns to moments.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnResolver {
    mode: MeasureMode,
}

impl ColumnResolver {
    /// Create a resolver with the given `M` handling.
    pub fn new(mode: MeasureMode) -> Self {
        Self { mode }
    }

    /// Analyse one column.
    pub fn resolve(&self, column: &Column<'_>) -> ResolvedColumn {
        let controls = find_controls(column);
        let swap = SwapResolution::from_slots(find_swaps(column));

        if let SwapResolution::Unpaired(slots) = &swap {
            warn!(
                column = column.index(),
                slots = ?slots,
                "Swap needs exactly two partners; dropping swap cells"
            );
        }

        let mut primitives = Vec::new();
        let mut skipped = Vec::new();
        for (wire, symbol) in column.cells() {
            match symbol {
                Symbol::Gate(gate) => primitives.push((wire, Primitive::Gate(*gate))),
                Symbol::Measure => primitives.push((wire, Primitive::Measure)),
                Symbol::Unknown(text) => {
                    warn!(
                        column = column.index(),
                        wire = %wire,
                        symbol = %text,
                        "Skipping unknown symbol"
                    );
                    skipped.push(SkippedCell {
                        wire,
                        column: column.index(),
                        symbol: text.clone(),
                    });
                }
                Symbol::Empty
                | Symbol::Control
                | Symbol::Anticontrol
                | Symbol::Swap
                | Symbol::Barrier => {}
            }
        }

        ResolvedColumn {
            index: column.index(),
            controls,
            swap,
            primitives,
            skipped,
        }
    }

    /// Analyse one column and emit it as a moment.
    pub fn moment(&self, column: &Column<'_>) -> Moment {
        self.resolve(column).to_moment(self.mode)
    }
}
