//! Column-major view of the authored grid.
//!
//! The grid arrives row-major (one row per wire) and possibly ragged. It is
//! stored sparsely, keyed by `(column, wire)`, so a short row simply has no
//! cells in later columns and those columns come out partial.

use std::collections::BTreeMap;
use tracing::debug;

use qgrid_ir::WireId;

use crate::symbol::Symbol;

static EMPTY: Symbol = Symbol::Empty;

/// Position of one cell. Orders column-first, then by wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct CellIndex {
    column: usize,
    wire: WireId,
}

/// The authored grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    /// Number of wires (input rows).
    num_wires: u32,
    /// Length of the longest row.
    num_columns: usize,
    /// Present cells, column-major.
    cells: BTreeMap<CellIndex, Symbol>,
}

impl Layout {
    /// Build a layout from row-major input. Row `i` is wire `i`.
    pub fn from_rows(rows: Vec<Vec<Symbol>>) -> Self {
        let num_wires = u32::try_from(rows.len()).unwrap_or(u32::MAX);
        let num_columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let ragged = rows.iter().any(|row| row.len() != num_columns);

        let cells: BTreeMap<_, _> = rows
            .into_iter()
            .enumerate()
            .flat_map(|(wire, row)| {
                row.into_iter().enumerate().map(move |(column, symbol)| {
                    (
                        CellIndex {
                            column,
                            wire: WireId::from(wire),
                        },
                        symbol,
                    )
                })
            })
            .collect();

        debug!(num_wires, num_columns, ragged, "Built layout");

        Self {
            num_wires,
            num_columns,
            cells,
        }
    }

    /// Number of wires.
    pub fn num_wires(&self) -> u32 {
        self.num_wires
    }

    /// Number of columns, barrier columns included.
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// The symbol at `(wire, column)`, if that cell was supplied.
    pub fn get(&self, wire: WireId, column: usize) -> Option<&Symbol> {
        self.cells.get(&CellIndex { column, wire })
    }

    /// One column by its original index, barrier or not.
    pub fn column(&self, index: usize) -> Option<Column<'_>> {
        if index >= self.num_columns {
            return None;
        }
        let start = CellIndex {
            column: index,
            wire: WireId(0),
        };
        let end = CellIndex {
            column: index + 1,
            wire: WireId(0),
        };
        let cells = self
            .cells
            .range(start..end)
            .map(|(cell, symbol)| (cell.wire, symbol))
            .collect();
        Some(Column {
            index,
            num_wires: self.num_wires,
            cells,
        })
    }

    /// Non-barrier columns in original order.
    ///
    /// Each call starts a fresh pass; the iterator itself is `Clone`.
    pub fn columns(&self) -> Columns<'_> {
        Columns {
            layout: self,
            next: 0,
        }
    }

    /// Column-major copy of the grid. Cells missing from short rows are `None`.
    pub fn transpose(&self) -> Vec<Vec<Option<&Symbol>>> {
        (0..self.num_columns)
            .map(|column| {
                (0..self.num_wires)
                    .map(|wire| self.get(WireId(wire), column))
                    .collect()
            })
            .collect()
    }

    /// Number of `M` cells outside barrier columns.
    pub fn measure_count(&self) -> usize {
        self.columns()
            .map(|column| {
                column
                    .cells()
                    .filter(|(_, symbol)| **symbol == Symbol::Measure)
                    .count()
            })
            .sum()
    }
}

/// One column of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Column<'a> {
    /// Index in the original grid.
    index: usize,
    /// Wires in the layout.
    num_wires: u32,
    /// Present cells in ascending wire order.
    cells: Vec<(WireId, &'a Symbol)>,
}

impl<'a> Column<'a> {
    /// Build a column directly from its cells, in wire order.
    pub fn from_symbols(index: usize, symbols: &'a [Symbol]) -> Self {
        Self {
            index,
            num_wires: u32::try_from(symbols.len()).unwrap_or(u32::MAX),
            cells: symbols
                .iter()
                .enumerate()
                .map(|(wire, symbol)| (WireId::from(wire), symbol))
                .collect(),
        }
    }

    /// Index of this column in the original grid.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of wires in the layout this column belongs to.
    pub fn num_wires(&self) -> u32 {
        self.num_wires
    }

    /// Present cells in ascending wire order.
    pub fn cells(&self) -> impl Iterator<Item = (WireId, &'a Symbol)> + '_ {
        self.cells.iter().copied()
    }

    /// The symbol on `wire`; missing cells read as empty.
    pub fn symbol(&self, wire: WireId) -> &'a Symbol {
        self.cells
            .iter()
            .find(|(w, _)| *w == wire)
            .map_or(&EMPTY, |(_, symbol)| *symbol)
    }

    /// Whether a short row left this column without a cell on some wire.
    pub fn is_partial(&self) -> bool {
        self.cells.len() < self.num_wires as usize
    }

    /// Whether any cell is a barrier.
    pub fn is_barrier(&self) -> bool {
        self.cells
            .iter()
            .any(|(_, symbol)| **symbol == Symbol::Barrier)
    }
}

/// Iterator over non-barrier columns. See [`Layout::columns`].
#[derive(Debug, Clone)]
pub struct Columns<'a> {
    layout: &'a Layout,
    next: usize,
}

impl<'a> Iterator for Columns<'a> {
    type Item = Column<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(column) = self.layout.column(self.next) {
            self.next += 1;
            if column.is_barrier() {
                debug!(column = column.index(), "Skipping barrier column");
                continue;
            }
            return Some(column);
        }
        None
    }
}
