//! `qgrid-core`: grid layouts to distributions and mid-circuit probes.
//!
//! Takes a column-major gate grid as authored in a visual circuit builder and
//! produces:
//!
//! - the probability distribution over a chosen subset of wires at the end of
//!   the circuit, and
//! - for every `M` cell, the probability that its wire reads |1⟩ just before
//!   that column, without collapsing anything.
//!
//! Pipeline: [`Layout`] → [`ColumnResolver`] → [`CircuitBuilder`] →
//! [`Executor`] (plain circuit) and [`Prober`] (probed circuit), all driven by
//! one [`Simulation`] per request.
//!
//! # Quick start
//!
//! ```rust
//! use qgrid_adapter_sim::StatevectorEngine;
//! use qgrid_core::{CoreConfig, SimulationResponse, handle_json};
//!
//! let engine = StatevectorEngine::new();
//! let body = r#"{"circuit": {"gates": [["X", "M"], ["H", "M"]]},
//!                "to_measure": [{"qubit": 0, "toggle": 1}]}"#;
//!
//! match handle_json(&engine, body, &CoreConfig::default()) {
//!     SimulationResponse::Ok { state_vector, probed_values } => {
//!         assert!((state_vector[1] - 1.0).abs() < 1e-9);
//!         assert_eq!(probed_values.len(), 2);
//!     }
//!     SimulationResponse::Error { message } => panic!("{message}"),
//! }
//! ```
//!
//! # Grid symbols
//!
//! | Symbol | Meaning |
//! |--------|---------|
//! | `0` | Empty cell |
//! | `X` `Y` `Z` `H` `S` `T` `I` | Catalog gate |
//! | `c` / `ac` | Control on \|1⟩ / on \|0⟩ for the whole column |
//! | `sw` | Swap slot; exactly two per column form a swap |
//! | `M` | Probe point |
//! | `b` | Barrier; the whole column is skipped |
//!
//! Anything else is skipped with a warning.

pub mod builder;
pub mod config;
pub mod error;
pub mod executor;
pub mod layout;
pub mod prober;
pub mod request;
pub mod resolver;
pub mod simulation;
pub mod symbol;

pub use builder::CircuitBuilder;
pub use config::{ConfigError, CoreConfig};
pub use error::{CoreError, CoreResult};
pub use executor::{Executor, marginalize, selected_wires};
pub use layout::{Column, Layout};
pub use prober::{ProbeReading, Prober, simulate_prefix};
pub use request::{
    CircuitSpec, MeasureToggle, SimulationOutcome, SimulationRequest, SimulationResponse,
};
pub use resolver::{
    ColumnResolver, ControlSets, MeasureMode, ResolvedColumn, SkippedCell, SwapResolution,
    find_controls, find_swaps,
};
pub use simulation::{Simulation, handle, handle_json};
pub use symbol::Symbol;
