#![deny(unsafe_code)]
//! CPU rendering for the flowfield visualizer.
//!
//! [`Raster`] implements `flowfield_core::RenderSink` over an in-memory RGB
//! surface, so a `Player` can draw frames without a windowing system. The
//! CLI and any headless host share this crate; [`pixel::to_rgba8`] and the
//! `png`-gated [`snapshot::write_png`] turn the surface into bytes or a file.

pub mod pixel;
pub mod surface;

#[cfg(feature = "png")]
pub mod snapshot;

pub use pixel::to_rgba8;
pub use surface::Raster;
