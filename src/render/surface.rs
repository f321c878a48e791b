// src/render/surface.rs
//
// The drawing surface a WaveRenderer paints on.
// Coordinates are canvas space: origin at the top-left, y grows downward.

use nannou::prelude::*;

/// A 2D drawing context, modelled on the subset of the canvas API the
/// wave renderer needs.
pub trait DrawContext {
    /// Blur applied to everything drawn afterwards. Some surfaces drop this
    /// when their dimensions change, so callers re-apply it after a resize.
    fn set_filter_blur(&mut self, radius: f32);

    fn set_global_alpha(&mut self, alpha: f32);
    fn global_alpha(&self) -> f32;

    /// Fills an axis-aligned rectangle at the current global alpha.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb);

    /// Strokes a connected path through `points` at the current global alpha.
    fn stroke_polyline(&mut self, points: &[Point2], color: Rgb, weight: f32);
}

pub trait Surface {
    type Context: DrawContext;

    /// `None` when the surface cannot provide a 2D context, either because the
    /// capability is missing or because the surface has been detached.
    fn context_2d(&mut self) -> Option<&mut Self::Context>;

    fn size(&self) -> (f32, f32);
    fn set_size(&mut self, width: f32, height: f32);
}
