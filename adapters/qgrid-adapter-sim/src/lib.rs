//! qgrid Local Statevector Engine
//!
//! This crate provides the [`SimulationEngine`](qgrid_ir::SimulationEngine)
//! used by qgrid: a noiseless statevector simulator that runs a moment
//! sequence from |0…0⟩ and returns every amplitude. It is exact but limited by
//! memory to a few dozen wires.
//!
//! # Features
//!
//! - **Exact Simulation**: Full statevector representation (no sampling)
//! - **Arbitrary Control Sets**: Every catalog gate and swap may be controlled
//!   by any number of wires
//! - **Deadlines**: An optional deadline is checked between moments
//! - **Pure Rust**: No native linear-algebra libraries
//!
//! # Performance
//!
//! | Wires | Memory | Simulation Speed |
//! |-------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//! | 24 | ~256 MB | Slow |
//! | 30+ | ~16 GB+ | Not supported by default |
//!
//! # Example
//!
//! ```rust
//! use qgrid_adapter_sim::StatevectorEngine;
//! use qgrid_ir::{Moment, Operation, SimulationEngine, StandardGate, WireId, probabilities};
//!
//! let engine = StatevectorEngine::new();
//! let moments: Vec<Moment> = vec![
//!     [Operation::gate(StandardGate::H, WireId(0))].into_iter().collect(),
//! ];
//!
//! let amplitudes = engine.simulate(1, &moments, None).unwrap();
//! let probs = probabilities(&amplitudes);
//! assert!((probs[0] - 0.5).abs() < 1e-12);
//! ```

mod simulator;
mod statevector;

pub use simulator::{DEFAULT_MAX_WIRES, StatevectorEngine};
