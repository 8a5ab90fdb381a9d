//! The `Engine` trait: the step-based interface the playback shell drives.
//!
//! The trait is object-safe so a shell can hold a `Box<dyn Engine>` and
//! stay ignorant of the concrete simulation.

use crate::error::EngineError;
use serde_json::Value;

/// Step-based simulation controlled through JSON parameters.
///
/// This trait is **object-safe**: you can use `Box<dyn Engine>` or
/// `&mut dyn Engine` for runtime polymorphism.
pub trait Engine {
    /// Advance the simulation by one step.
    fn step(&mut self) -> Result<(), EngineError>;

    /// Restart from fresh random state, keeping surface and parameters.
    fn reset(&mut self);

    /// Current parameter values as a flat JSON object.
    fn params(&self) -> Value;

    /// Applies a partial parameter update; keys not present are kept.
    ///
    /// Returns `EngineError::InvalidParams` if `params` is not an object.
    fn set_params(&mut self, params: &Value) -> Result<(), EngineError>;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;
}
