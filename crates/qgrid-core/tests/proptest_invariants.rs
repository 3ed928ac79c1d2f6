//! Property-based tests for distribution and probe invariants.
//!
//! Random grids over the full symbol alphabet (including degenerate swap
//! counts, unknown symbols and ragged rows) must always produce a normalized
//! distribution, and barrier columns must never change the result.

use proptest::prelude::*;
use qgrid_adapter_sim::StatevectorEngine;
use qgrid_core::{CoreConfig, Layout, Simulation, SimulationRequest, Symbol};

const TOL: f64 = 1e-9;

/// One grid cell, weighted toward gates and empty cells.
fn arb_symbol() -> impl Strategy<Value = Symbol> {
    prop_oneof![
        4 => Just("0"),
        2 => Just("X"),
        2 => Just("H"),
        1 => Just("Y"),
        1 => Just("Z"),
        1 => Just("S"),
        1 => Just("T"),
        1 => Just("I"),
        2 => Just("c"),
        1 => Just("ac"),
        2 => Just("sw"),
        2 => Just("M"),
        1 => Just("nope"),
    ]
    .prop_map(Symbol::parse)
}

/// 1-4 wires, rows of 0-5 cells (ragged).
fn arb_grid() -> impl Strategy<Value = Vec<Vec<Symbol>>> {
    prop::collection::vec(prop::collection::vec(arb_symbol(), 0..=5), 1..=4)
}

fn arb_selection() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1_i64..5, 0..=4)
}

fn run(gates: Vec<Vec<Symbol>>, measured: Vec<i64>) -> qgrid_core::SimulationOutcome {
    let engine = StatevectorEngine::new();
    let request = SimulationRequest::new(gates, measured);
    Simulation::new(&engine, request, &CoreConfig::default())
        .unwrap()
        .run()
        .unwrap()
}

/// Insert a full-height barrier column at `at` (clamped per row).
fn with_barrier(gates: &[Vec<Symbol>], at: usize) -> Vec<Vec<Symbol>> {
    let width = gates.iter().map(Vec::len).max().unwrap_or(0);
    let at = at.min(width);
    gates
        .iter()
        .map(|row| {
            let mut row = row.clone();
            row.resize(width, Symbol::Empty);
            row.insert(at, Symbol::Barrier);
            row
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_distribution_sums_to_one(gates in arb_grid(), measured in arb_selection()) {
        let outcome = run(gates, measured);
        let total: f64 = outcome.state_vector.iter().sum();
        prop_assert!((total - 1.0).abs() < TOL, "sum = {}", total);
        prop_assert!(outcome.state_vector.len().is_power_of_two());
    }

    #[test]
    fn prop_probe_values_are_probabilities(gates in arb_grid()) {
        let outcome = run(gates, vec![]);
        for reading in outcome.probed_values {
            prop_assert!(reading.value > -TOL && reading.value < 1.0 + TOL);
        }
    }

    #[test]
    fn prop_probe_count_matches_layout(gates in arb_grid()) {
        let expected = Layout::from_rows(gates.clone()).measure_count();
        let outcome = run(gates, vec![]);
        prop_assert_eq!(outcome.probed_values.len(), expected);
    }

    #[test]
    fn prop_barrier_column_is_invisible(
        gates in arb_grid(),
        measured in arb_selection(),
        at in 0_usize..6,
    ) {
        let plain = run(gates.clone(), measured.clone());
        let barred = run(with_barrier(&gates, at), measured);

        prop_assert_eq!(plain.state_vector.len(), barred.state_vector.len());
        for (a, b) in plain.state_vector.iter().zip(&barred.state_vector) {
            prop_assert!((a - b).abs() < TOL);
        }

        prop_assert_eq!(plain.probed_values.len(), barred.probed_values.len());
        for (a, b) in plain.probed_values.iter().zip(&barred.probed_values) {
            prop_assert_eq!(a.row, b.row);
            prop_assert!((a.value - b.value).abs() < TOL);
        }
    }
}
