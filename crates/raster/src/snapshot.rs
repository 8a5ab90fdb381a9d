//! PNG snapshot of a [`Raster`].
//!
//! Feature-gated behind `png` (default on) so embedders that present
//! frames themselves do not pull in the `image` crate. The pixel buffer
//! conversion itself lives in [`crate::pixel`] (always available).

use flowfield_core::EngineError;
use std::path::Path;

use crate::pixel::to_rgba8;
use crate::surface::Raster;

/// Writes the raster as a PNG image.
///
/// Returns `EngineError::InvalidDimensions` if the raster dimensions
/// overflow `u32`, or `EngineError::Io` on write failure.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), EngineError> {
    let (width, height) = (raster.width(), raster.height());
    let dims = || EngineError::InvalidDimensions { width, height };
    let w = u32::try_from(width).map_err(|_| dims())?;
    let h = u32::try_from(height).map_err(|_| dims())?;
    let img = image::RgbaImage::from_raw(w, h, to_rgba8(raster))
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))?;
    log::info!("wrote {w}x{h} snapshot to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowfield_core::{Hsla, RenderSink, Srgb, Vector};

    #[test]
    fn write_png_round_trip() {
        let mut raster = Raster::new(16, 12, Srgb::BLACK).unwrap();
        raster.set_color(Hsla {
            h: 120.0,
            s: 1.0,
            l: 0.5,
            a: 1.0,
        });
        raster.line(Vector::new(0.0, 5.0), Vector::new(15.0, 5.0));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        write_png(&raster, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 12);
        assert_eq!(img.get_pixel(7, 5).0, [0, 255, 0, 255]);
        assert_eq!(img.get_pixel(7, 6).0, [0, 0, 0, 255]);
    }

    #[test]
    fn write_png_to_missing_directory_is_io_error() {
        let raster = Raster::new(2, 2, Srgb::BLACK).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("frame.png");
        assert!(matches!(
            write_png(&raster, &path),
            Err(EngineError::Io(_))
        ));
    }
}
