//! Deterministic PRNG based on the Xorshift64 algorithm.
//!
//! Drives everything random in a run: particle spawn positions, initial
//! velocities, and the seeds handed to the noise source on reset. The same
//! seed reproduces a run exactly on every platform.

use serde::{Deserialize, Serialize};

/// Xorshift64 deterministic PRNG with shifts (13, 7, 17).
///
/// Seed 0 is a fixed point of the algorithm and is replaced with a
/// non-zero fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Upper 32 bits of the next value. Used for noise seeds.
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Uniform f64 in [0, 1) from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}
