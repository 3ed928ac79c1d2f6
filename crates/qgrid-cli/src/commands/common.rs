//! Shared helpers for CLI commands.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};

use qgrid_adapter_sim::StatevectorEngine;
use qgrid_core::CoreConfig;

/// Read a request body from a file, or from stdin when `path` is `-`.
pub fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut body = String::new();
        io::stdin()
            .read_to_string(&mut body)
            .context("Failed to read request from stdin")?;
        return Ok(body);
    }

    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
}

/// Write `contents` to a file, or to stdout when `path` is `None`.
pub fn write_output(path: Option<&str>, contents: &str) -> Result<()> {
    match path {
        Some(path) => {
            let contents = format!("{contents}\n");
            fs::write(path, contents).with_context(|| format!("Failed to write file: {path}"))
        }
        None => {
            println!("{contents}");
            Ok(())
        }
    }
}

/// The statevector engine, limited per configuration.
pub fn engine(config: &CoreConfig) -> StatevectorEngine {
    StatevectorEngine::with_max_wires(config.engine.max_wires)
}
