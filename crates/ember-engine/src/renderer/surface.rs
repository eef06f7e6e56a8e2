//! Drawing seam between the simulation and its host canvas.
//!
//! The engine is headless: it issues draw calls through the `Surface`
//! trait and never touches a real canvas. `ember-web` implements the
//! trait over `CanvasRenderingContext2d`; tests and benchmarks use
//! `NullSurface`.
//!
//! Per-frame compositing contract: a `DestinationOut` erase pass at the
//! tier's erase alpha darkens the previous frame (the fading-trail
//! effect), then all particles are drawn in `Lighter` mode so overlapping
//! colors brighten instead of occluding.

use glam::Vec2;

use super::color::Color;

/// Canvas compositing modes the engine relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Normal painting.
    SourceOver,
    /// Erase by source alpha; used for the fade pass so the layer stays
    /// transparent over the page background.
    DestinationOut,
    /// Additive blending for the glow effect.
    Lighter,
}

/// A 2D drawing surface with round line caps. Coordinates are logical
/// pixels; backing-store scaling by device pixel ratio is the host's job.
pub trait Surface {
    fn set_composite_mode(&mut self, mode: CompositeMode);
    fn set_global_alpha(&mut self, alpha: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, line_width: f32, color: Color);
}

/// A surface that discards every draw call. Lets the engine run headless
/// when no canvas is available.
pub struct NullSurface;

impl Surface for NullSurface {
    fn set_composite_mode(&mut self, _mode: CompositeMode) {}
    fn set_global_alpha(&mut self, _alpha: f32) {}
    fn fill_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32, _color: Color) {}
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}
    fn stroke_circle(&mut self, _center: Vec2, _radius: f32, _line_width: f32, _color: Color) {}
    fn stroke_line(&mut self, _from: Vec2, _to: Vec2, _line_width: f32, _color: Color) {}
}
