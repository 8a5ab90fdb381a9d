//! Coherent-noise providers consumed by the flow field.
//!
//! A [`NoiseSource`] maps a 3D point (two spatial axes plus time) to a
//! value in [-1, 1]. Implementations must be deterministic for a given
//! seed: same seed and inputs, same output.

use crate::error::EngineError;
use noise::{NoiseFn, OpenSimplex, Perlin};

/// A seedable 3D coherent-noise function.
pub trait NoiseSource: Send + Sync {
    /// Replaces the permutation state with one derived from `seed`.
    fn reseed(&mut self, seed: u32);

    /// Samples the noise at `(x, y, z)`. Always in [-1, 1].
    fn noise3(&self, x: f64, y: f64, z: f64) -> f64;
}

/// OpenSimplex noise. The default provider.
pub struct SimplexNoise {
    noise: OpenSimplex,
}

/// Classic Perlin gradient noise.
pub struct PerlinNoise {
    noise: Perlin,
}

/// A source that returns the same value everywhere.
///
/// Handy for pinning field values when reasoning about particle motion.
#[derive(Debug, Clone, Copy)]
pub struct ConstantNoise(pub f64);

impl SimplexNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: OpenSimplex::new(seed),
        }
    }
}

impl PerlinNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Perlin::new(seed),
        }
    }
}

impl NoiseSource for SimplexNoise {
    fn reseed(&mut self, seed: u32) {
        self.noise = OpenSimplex::new(seed);
    }

    fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.noise.get([x, y, z]).clamp(-1.0, 1.0)
    }
}

impl NoiseSource for PerlinNoise {
    fn reseed(&mut self, seed: u32) {
        self.noise = Perlin::new(seed);
    }

    fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.noise.get([x, y, z]).clamp(-1.0, 1.0)
    }
}

impl NoiseSource for ConstantNoise {
    fn reseed(&mut self, _seed: u32) {}

    fn noise3(&self, _x: f64, _y: f64, _z: f64) -> f64 {
        self.0.clamp(-1.0, 1.0)
    }
}

/// All registered noise provider names.
const NOISE_NAMES: &[&str] = &["simplex", "perlin"];

/// Named noise providers, for string-based selection (CLI, seed files).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseKind {
    #[default]
    Simplex,
    Perlin,
}

impl NoiseKind {
    /// Looks up a provider by name.
    ///
    /// Returns `EngineError::UnknownNoise` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        match name {
            "simplex" => Ok(NoiseKind::Simplex),
            "perlin" => Ok(NoiseKind::Perlin),
            _ => Err(EngineError::UnknownNoise(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NoiseKind::Simplex => "simplex",
            NoiseKind::Perlin => "perlin",
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        NOISE_NAMES
    }

    /// Builds a boxed provider seeded with `seed`.
    pub fn build(self, seed: u32) -> Box<dyn NoiseSource> {
        match self {
            NoiseKind::Simplex => Box::new(SimplexNoise::new(seed)),
            NoiseKind::Perlin => Box::new(PerlinNoise::new(seed)),
        }
    }
}
