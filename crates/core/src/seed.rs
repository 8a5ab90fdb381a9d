//! Reproducible description of a run.
//!
//! A [`Seed`] captures everything needed to recreate a frame sequence:
//! surface size, cell size, noise provider, dial overrides, PRNG seed, and
//! tick count.

use crate::error::EngineError;
use crate::field::FlowField;
use crate::noise_source::NoiseKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Cell size used when a seed file does not name one.
pub const DEFAULT_CELL_SIZE: usize = 5;

/// Reproducible description of a run.
///
/// Two identical `Seed` values fed to the same binary produce bit-identical
/// particle states and frames.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub width: usize,
    pub height: usize,
    #[serde(default = "default_cell_size")]
    pub cell_size: usize,
    #[serde(default = "default_noise")]
    pub noise: String,
    /// Partial [`FlowConfig`](crate::FlowConfig) overrides.
    #[serde(default = "empty_object")]
    pub params: Value,
    /// Partial [`ColorConfig`](crate::ColorConfig) overrides.
    #[serde(default = "empty_object")]
    pub color: Value,
    pub seed: u64,
    #[serde(default)]
    pub ticks: usize,
}

fn default_cell_size() -> usize {
    DEFAULT_CELL_SIZE
}

fn default_noise() -> String {
    NoiseKind::default().name().to_string()
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

impl Seed {
    /// Creates a seed with default cell size, noise, empty overrides, and
    /// zero ticks.
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        Self {
            width,
            height,
            cell_size: DEFAULT_CELL_SIZE,
            noise: default_noise(),
            params: empty_object(),
            color: empty_object(),
            seed,
            ticks: 0,
        }
    }

    /// Checks that a simulation can be built from this seed.
    ///
    /// A zero-sized surface is accepted (it simply holds no particles);
    /// a zero cell size, an unknown noise name, non-object overrides, or a
    /// grid that overflows `usize` are rejected.
    pub fn validate(&self) -> Result<(), EngineError> {
        FlowField::grid_size(self.width, self.height, self.cell_size).and_then(|(c, r)| {
            c.checked_mul(r).ok_or(EngineError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })
        })?;
        NoiseKind::from_name(&self.noise)?;
        for (name, value) in [("params", &self.params), ("color", &self.color)] {
            if !value.is_object() {
                return Err(EngineError::InvalidParams(format!(
                    "{name} must be a JSON object"
                )));
            }
        }
        Ok(())
    }
}
