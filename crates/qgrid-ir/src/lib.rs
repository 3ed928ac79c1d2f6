//! qgrid Circuit Representation
//!
//! This crate provides the data structures shared by every qgrid crate: wires,
//! the single-wire gate catalog, the operations a grid column reduces to, and
//! the moment-ordered [`Circuit`] that is handed to a [`SimulationEngine`].
//!
//! # Core Components
//!
//! - **Wires**: [`WireId`] addresses one qubit lane
//! - **Gates**: [`StandardGate`] and the process-wide [`GateCatalog`]
//! - **Operations**: [`Operation`], a tagged variant covering plain, controlled
//!   and swap operations plus [`ProbeMarker`]s
//! - **Circuit**: [`Circuit`] of [`Moment`]s over a fixed register
//! - **Engine seam**: [`SimulationEngine`]
//!
//! # Example: Controlled NOT
//!
//! ```rust
//! use qgrid_ir::{Circuit, Moment, Operation, StandardGate, WireId};
//!
//! let mut circuit = Circuit::with_wires("cnot", 2);
//!
//! let flip: Moment = [Operation::gate(StandardGate::X, WireId(0))].into_iter().collect();
//! let cnot: Moment = [Operation::controlled(StandardGate::X, WireId(1), &[WireId(0)])]
//!     .into_iter()
//!     .collect();
//!
//! circuit.push_moment(flip).unwrap().push_moment(cnot).unwrap();
//! circuit.push_identity_layer().unwrap();
//!
//! assert_eq!(circuit.num_wires(), 2);
//! assert_eq!(circuit.depth(), 3);
//! ```
//!
//! # Supported Gates
//!
//! | Symbol | Gate | Description |
//! |--------|------|-------------|
//! | `I` | `id` | Identity |
//! | `X`, `Y`, `Z` | `x`, `y`, `z` | Pauli gates |
//! | `H` | `h` | Hadamard gate |
//! | `S` | `s` | S gate |
//! | `T` | `t` | T gate |
//!
//! Any gate may carry a control set; swaps are expressed separately.

pub mod circuit;
pub mod engine;
pub mod error;
pub mod gate;
pub mod operation;
pub mod wire;

pub use circuit::{Circuit, Moment};
pub use engine::{SimulationEngine, probabilities};
pub use error::{EngineError, EngineResult, IrError, IrResult};
pub use gate::{GateCatalog, Matrix2, StandardGate};
pub use operation::{Operation, ProbeMarker};
pub use wire::{WireId, wires};
