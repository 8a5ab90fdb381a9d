//! Drawing surface abstraction.
//!
//! The simulation never touches pixels. Each frame it issues a short list
//! of primitives to a [`RenderSink`]: a translucent clear, one fill color,
//! then a line or point per particle. A raster backend, a canvas binding or
//! a test recorder can all sit behind the trait.

use crate::color::Hsla;
use crate::vector::Vector;

/// Receiver of per-frame drawing primitives.
///
/// Object-safe, so drivers take `&mut dyn RenderSink`.
pub trait RenderSink {
    /// Paints the background over the whole surface with the given alpha.
    ///
    /// An alpha of 0 leaves the surface untouched (trails persist forever);
    /// an alpha of 1 wipes it.
    fn clear(&mut self, alpha: f64);

    /// Sets the color used by subsequent `line` and `point` calls.
    fn set_color(&mut self, color: Hsla);

    /// Strokes a segment from `from` to `to`.
    fn line(&mut self, from: Vector, to: Vector);

    /// Fills a `size x size` square with its top-left corner at `at`.
    fn point(&mut self, at: Vector, size: f64);
}

/// Everything about a frame that is decided before particles are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStyle {
    pub color: Hsla,
    pub clear_alpha: f64,
    pub line_mode: bool,
}

/// One recorded drawing primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear(f64),
    SetColor(Hsla),
    Line(Vector, Vector),
    Point(Vector, f64),
}

/// A command list is itself a sink; handy for headless inspection.
impl RenderSink for Vec<DrawCommand> {
    fn clear(&mut self, alpha: f64) {
        self.push(DrawCommand::Clear(alpha));
    }

    fn set_color(&mut self, color: Hsla) {
        self.push(DrawCommand::SetColor(color));
    }

    fn line(&mut self, from: Vector, to: Vector) {
        self.push(DrawCommand::Line(from, to));
    }

    fn point(&mut self, at: Vector, size: f64) {
        self.push(DrawCommand::Point(at, size));
    }
}
