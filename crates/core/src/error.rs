//! Error types for the flowfield core.

use thiserror::Error;

/// Errors produced while building or driving a simulation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The flow-field grid for the requested surface would overflow `usize`.
    #[error("invalid dimensions: {width}x{height} surface overflows the flow-field grid")]
    InvalidDimensions { width: usize, height: usize },

    /// Cell size must be at least one surface unit.
    #[error("invalid cell size {0}: must be non-zero")]
    InvalidCellSize(usize),

    /// No noise provider is registered under this name.
    #[error("unknown noise source: {0}")]
    UnknownNoise(String),

    /// A params object could not be interpreted at all (e.g. not a JSON object).
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// A color value could not be built or parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Writing a snapshot or replay file failed.
    #[error("i/o error: {0}")]
    Io(String),
}
