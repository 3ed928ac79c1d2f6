//! Error types for the core crate.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors produced while turning a request into distributions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    /// The request body could not be parsed.
    #[error("Malformed request: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    /// Circuit assembly failed.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qgrid_ir::IrError),

    /// The simulation engine failed.
    #[error("Simulation failed: {0}")]
    Engine(#[from] qgrid_ir::EngineError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
