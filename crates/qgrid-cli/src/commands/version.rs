//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - grid circuit simulation with mid-circuit probes",
        style("qgrid").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qgrid-ir           Circuit representation and engine interface");
    println!("  qgrid-core         Grid layout, circuit assembly and probing");
    println!("  qgrid-adapter-sim  Local statevector engine");
    println!("  qgrid-cli          Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
