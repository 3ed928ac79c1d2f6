//! Inspect command implementation.

use anyhow::{Context, Result};
use console::style;

use qgrid_core::{
    ColumnResolver, CoreConfig, Layout, MeasureMode, Simulation, SimulationRequest, SwapResolution,
};
use qgrid_ir::{Circuit, Operation};

use super::common::{engine, read_input};

/// Execute the inspect command.
pub fn execute(input: &str, config: &CoreConfig) -> Result<()> {
    let body = read_input(input)?;
    let request = SimulationRequest::from_json(&body).context("Invalid request")?;
    let engine = engine(config);
    let sim = Simulation::new(&engine, request, config).context("Failed to assemble circuits")?;

    let layout = sim.layout();
    println!(
        "{} {} wires, {} columns ({} emitted)",
        style("Layout:").cyan().bold(),
        layout.num_wires(),
        layout.num_columns(),
        layout.columns().count()
    );

    let columns: Vec<usize> = layout.columns().map(|c| c.index()).collect();

    println!("\n{}", style("Plain circuit").cyan().bold());
    print_circuit(sim.plain_circuit(), |k| columns.get(k).copied());

    println!("\n{}", style("Probed circuit").cyan().bold());
    print_circuit(sim.probed_circuit(), |k| {
        k.checked_sub(1).and_then(|k| columns.get(k).copied())
    });

    println!(
        "\n  Probes: {}",
        style(sim.probed_circuit().probes().count()).yellow()
    );
    print_dropped(layout);
    Ok(())
}

/// Print each moment, labelled with its grid column or as padding.
fn print_circuit(circuit: &Circuit, column_of: impl Fn(usize) -> Option<usize>) {
    for (k, moment) in circuit.moments().iter().enumerate() {
        let label = column_of(k).map_or_else(|| "pad".to_string(), |col| format!("col {col}"));
        let ops: Vec<String> = moment.operations().iter().map(describe).collect();
        println!(
            "  {:>3} {:<8} {}",
            k,
            style(label).dim(),
            if ops.is_empty() {
                style("(empty)".to_string()).dim().to_string()
            } else {
                ops.join("  ")
            }
        );
    }
}

/// Cells the resolver dropped.
fn print_dropped(layout: &Layout) {
    let resolver = ColumnResolver::new(MeasureMode::Probe);
    for column in layout.columns() {
        let resolved = resolver.resolve(&column);
        if let SwapResolution::Unpaired(slots) = &resolved.swap {
            let wires: Vec<String> = slots.iter().map(ToString::to_string).collect();
            println!(
                "  {} col {}: unpaired swap on {}",
                style("!").yellow().bold(),
                resolved.index,
                wires.join(", ")
            );
        }
        for cell in &resolved.skipped {
            println!(
                "  {} col {}: unknown symbol '{}' on {}",
                style("!").yellow().bold(),
                cell.column,
                cell.symbol,
                cell.wire
            );
        }
    }
}

fn describe(op: &Operation) -> String {
    match op {
        Operation::Probe(marker) => format!("probe({})", marker.wire),
        _ => {
            let wires: Vec<String> = op.wires().iter().map(ToString::to_string).collect();
            format!("{}({})", op.name(), wires.join(","))
        }
    }
}
