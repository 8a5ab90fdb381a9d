//! An opaque RGB surface that accepts draw primitives.
//!
//! Compositing is source-over onto an opaque background, so every pixel
//! stays fully opaque and only color is stored.

use flowfield_core::{EngineError, Hsla, RenderSink, Srgb, Vector};
use glam::DVec2;

/// CPU raster behind a [`RenderSink`].
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    background: Srgb,
    color: Srgb,
    alpha: f64,
    data: Vec<Srgb>,
}

impl Raster {
    /// Creates a surface filled with `background`.
    ///
    /// Returns `EngineError::InvalidDimensions` if `width * height` overflows.
    pub fn new(width: usize, height: usize, background: Srgb) -> Result<Self, EngineError> {
        let len = width
            .checked_mul(height)
            .ok_or(EngineError::InvalidDimensions { width, height })?;
        Ok(Self {
            width,
            height,
            background,
            color: Srgb {
                r: 1.0,
                g: 1.0,
                b: 1.0,
            },
            alpha: 1.0,
            data: vec![background; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn background(&self) -> Srgb {
        self.background
    }

    /// Row-major pixels.
    pub fn data(&self) -> &[Srgb] {
        &self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Srgb> {
        if x < self.width && y < self.height {
            Some(self.data[y * self.width + x])
        } else {
            None
        }
    }

    fn blend(&mut self, x: i64, y: i64, src: Srgb, alpha: f64) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let dst = &mut self.data[y as usize * self.width + x as usize];
        dst.r += (src.r - dst.r) * alpha;
        dst.g += (src.g - dst.g) * alpha;
        dst.b += (src.b - dst.b) * alpha;
    }
}

impl RenderSink for Raster {
    fn clear(&mut self, alpha: f64) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha == 0.0 {
            return;
        }
        let bg = self.background;
        for dst in &mut self.data {
            dst.r += (bg.r - dst.r) * alpha;
            dst.g += (bg.g - dst.g) * alpha;
            dst.b += (bg.b - dst.b) * alpha;
        }
    }

    fn set_color(&mut self, color: Hsla) {
        self.color = color.to_srgb();
        self.alpha = color.alpha();
    }

    /// One-pixel-wide DDA stroke. Each covered pixel is painted once.
    ///
    /// The segment is clipped to the surface (plus a one-pixel margin)
    /// first, so the step count is bounded by the surface size.
    fn line(&mut self, from: Vector, to: Vector) {
        let (a, b) = (DVec2::from(from), DVec2::from(to));
        if !a.is_finite() || !b.is_finite() || !(b - a).is_finite() {
            return;
        }
        let min = DVec2::splat(-1.0);
        let max = DVec2::new(self.width as f64 + 1.0, self.height as f64 + 1.0);
        let Some((a, b)) = clip_segment(a, b, min, max) else {
            return;
        };
        let delta = b - a;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as usize;
        let (src, alpha) = (self.color, self.alpha);
        let mut last = None;
        for i in 0..=steps {
            let p = a.lerp(b, i as f64 / steps as f64).floor();
            let cell = (p.x as i64, p.y as i64);
            if last != Some(cell) {
                self.blend(cell.0, cell.1, src, alpha);
                last = Some(cell);
            }
        }
    }

    /// Fills the pixels whose centers fall inside the `size x size` square.
    fn point(&mut self, at: Vector, size: f64) {
        if !at.is_finite() || !size.is_finite() || size <= 0.0 {
            return;
        }
        let (x0, x1) = (at.x.round() as i64, (at.x + size).round() as i64);
        let (y0, y1) = (at.y.round() as i64, (at.y + size).round() as i64);
        let (src, alpha) = (self.color, self.alpha);
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, src, alpha);
            }
        }
    }
}

/// Liang-Barsky clip of segment `a..b` to the box `[min, max]`.
///
/// A clipped endpoint lands exactly on the edge that cut it; the other
/// coordinate is clamped into the box, since it loses precision for
/// very long segments.
fn clip_segment(a: DVec2, b: DVec2, min: DVec2, max: DVec2) -> Option<(DVec2, DVec2)> {
    let d = b - a;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    let (mut start, mut end) = (a, b);
    let edge_point = |t: f64, axis: usize, value: f64| {
        let mut p = a + d * t;
        p[axis] = value;
        p
    };
    let edges = [
        (-d.x, a.x - min.x, 0, min.x),
        (d.x, max.x - a.x, 0, max.x),
        (-d.y, a.y - min.y, 1, min.y),
        (d.y, max.y - a.y, 1, max.y),
    ];
    for (p, q, axis, value) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            if r > t0 {
                t0 = r;
                start = edge_point(r, axis, value);
            }
        } else {
            if r < t0 {
                return None;
            }
            if r < t1 {
                t1 = r;
                end = edge_point(r, axis, value);
            }
        }
    }
    Some((start.clamp(min, max), end.clamp(min, max)))
}
