//! Simulate command implementation.

use anyhow::Result;
use console::style;
use tracing::info;

use qgrid_core::{CoreConfig, SimulationResponse, handle_json};
use qgrid_ir::SimulationEngine;

use super::common::{engine, read_input, write_output};

/// Execute the simulate command.
///
/// The response is always written, error responses included; an error
/// response then makes the command fail.
pub fn execute(
    input: &str,
    output: Option<&str>,
    pretty: bool,
    config: &CoreConfig,
) -> Result<()> {
    let body = read_input(input)?;
    let engine = engine(config);
    info!(input, engine = engine.name(), "Simulating request");

    let response = handle_json(&engine, &body, config);
    let json = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    write_output(output, &json)?;

    if let Some(path) = output {
        eprintln!(
            "{} Response written to {}",
            style("✓").green().bold(),
            style(path).green()
        );
    }

    match response {
        SimulationResponse::Ok { .. } => Ok(()),
        SimulationResponse::Error { message } => anyhow::bail!("Simulation failed: {message}"),
    }
}
