//! Error types for the IR crate.

use crate::wire::WireId;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while assembling a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Wire not present in the circuit.
    #[error("Wire {wire} not found in circuit of {num_wires} wires{}", format_op_context(.op_name))]
    WireNotFound {
        /// The wire that was not found.
        wire: WireId,
        /// Number of wires in the circuit.
        num_wires: u32,
        /// Optional operation name for context.
        op_name: Option<String>,
    },

    /// The same wire appears twice in one operation.
    #[error("Duplicate wire {wire} in operation{}", format_op_context(.op_name))]
    DuplicateWire {
        /// The duplicate wire.
        wire: WireId,
        /// Optional operation name for context.
        op_name: Option<String>,
    },

    /// Moment index past the end of the circuit.
    #[error("Moment {index} out of range (circuit has {len} moments)")]
    MomentOutOfRange {
        /// Requested moment index.
        index: usize,
        /// Number of moments in the circuit.
        len: usize,
    },
}

/// Errors raised by a simulation engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// Circuit is wider than the engine supports.
    #[error("Circuit has {requested} wires but engine '{engine}' supports at most {max}")]
    CircuitTooLarge {
        /// Engine name.
        engine: String,
        /// Wires requested by the circuit.
        requested: u32,
        /// Engine limit.
        max: u32,
    },

    /// An operation addresses a wire outside the simulated register.
    #[error("Operation '{op_name}' addresses {wire} outside a {num_wires}-wire register")]
    WireOutOfRange {
        /// Operation name.
        op_name: String,
        /// Offending wire.
        wire: WireId,
        /// Register width.
        num_wires: u32,
    },

    /// The simulation deadline passed before the run completed.
    #[error("Simulation deadline exceeded after {elapsed:?} ({moments_done}/{moments_total} moments)")]
    DeadlineExceeded {
        /// Time spent before giving up.
        elapsed: Duration,
        /// Moments applied before the deadline hit.
        moments_done: usize,
        /// Moments in the requested run.
        moments_total: usize,
    },

    /// Generic engine failure.
    #[error("Engine error: {0}")]
    Backend(String),
}

/// Helper function to format optional operation context.
#[allow(clippy::ref_option)]
fn format_op_context(op_name: &Option<String>) -> String {
    match op_name {
        Some(name) => format!(" (op: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;

/// Result type for engine calls.
pub type EngineResult<T> = Result<T, EngineError>;
