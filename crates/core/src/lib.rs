#![deny(unsafe_code)]
//! Core simulation for the flowfield visualizer.
//!
//! A grid of force vectors ([`FlowField`]) is sampled from 3-D coherent
//! noise whose third coordinate is time. Particles are pushed by the cell
//! under them, capped in speed and wrapped toroidally at the surface edges.
//! [`Simulation`] drives ticks and emits draw primitives to any
//! [`RenderSink`]; [`Player`] adds pause/resume around it.
//!
//! Also provides `FlowConfig`/`ColorConfig` dials, `Xorshift64` PRNG,
//! `Seed` replay files, and parameter helpers.

pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod noise_source;
pub mod params;
pub mod particle;
pub mod player;
pub mod prng;
pub mod render;
pub mod seed;
pub mod simulation;
pub mod vector;

pub use color::{Hsla, Srgb};
pub use config::{ColorConfig, FlowConfig};
pub use engine::Engine;
pub use error::EngineError;
pub use field::{surface_to_cell, CellIndex, FlowField};
pub use noise_source::{NoiseKind, NoiseSource};
pub use particle::Particle;
pub use player::Player;
pub use prng::Xorshift64;
pub use render::{DrawCommand, FrameStyle, RenderSink};
pub use seed::Seed;
pub use simulation::Simulation;
pub use vector::Vector;
