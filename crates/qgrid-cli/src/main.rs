//! qgrid Command-Line Interface
//!
//! Runs grid-layout simulation requests from files or stdin.
//!
//! ```text
//! qgrid simulate -i request.json --pretty
//! qgrid inspect -i request.json
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::style;

mod commands;
mod logging;

use commands::{inspect, simulate, version};
use qgrid_core::CoreConfig;

/// qgrid - grid circuit simulation with mid-circuit probes
#[derive(Parser)]
#[command(name = "qgrid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (YAML)
    #[arg(short, long, global = true, env = "QGRID_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a request and print the response JSON
    Simulate {
        /// Request file, or `-` for stdin
        #[arg(short, long)]
        input: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Pretty-print the response
        #[arg(long)]
        pretty: bool,
    },

    /// Show the circuits a request assembles to
    Inspect {
        /// Request file, or `-` for stdin
        #[arg(short, long)]
        input: String,
    },

    /// Show version information
    Version,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CoreConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    logging::init(cli.verbose, &config.logging);

    match cli.command {
        Commands::Simulate {
            input,
            output,
            pretty,
        } => simulate::execute(&input, output.as_deref(), pretty, &config),

        Commands::Inspect { input } => inspect::execute(&input, &config),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
