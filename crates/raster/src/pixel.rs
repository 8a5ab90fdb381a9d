//! Pure-computation pixel buffer conversion from a [`Raster`].
//!
//! Always available (no feature gate) so hosts without the `image` crate
//! can still hand the buffer to their own presenter.

use crate::surface::Raster;

/// Quantizes a raster to an RGBA8 buffer.
///
/// Each pixel becomes four bytes (R, G, B, 255); the surface is opaque.
/// The buffer length is `width * height * 4`.
pub fn to_rgba8(raster: &Raster) -> Vec<u8> {
    raster
        .data()
        .iter()
        .flat_map(|&srgb| {
            let [r, g, b] = srgb.to_rgb8();
            [r, g, b, 255u8]
        })
        .collect()
}
