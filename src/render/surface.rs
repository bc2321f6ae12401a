use crate::types::{Rgba, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

/// A linear gradient between two points. Stops are kept sorted by offset.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    stops: Vec<GradientStop>,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            stops: Vec::new(),
        }
    }

    /// Adds a stop; `offset` is clamped to `[0, 1]`.
    pub fn add_color_stop(&mut self, offset: f32, color: Rgba) {
        let offset = if offset.is_nan() { 0.0 } else { offset.clamp(0.0, 1.0) };
        let at = self.stops.partition_point(|stop| stop.offset <= offset);
        self.stops.insert(at, GradientStop { offset, color });
    }

    pub fn with_stop(mut self, offset: f32, color: Rgba) -> Self {
        self.add_color_stop(offset, color);
        self
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Fill {
    Solid(Rgba),
    Linear(LinearGradient),
}

/// Per-draw settings for a star body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawStyle {
    pub color: Rgba,
    pub glow_radius: f32,
    /// Only bright draws get a glow halo.
    pub bright: bool,
}

/// The 2D raster target the sky is painted on.
///
/// Implementations treat a zero-sized surface as valid and turn every
/// drawing call into a no-op.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn resize(&mut self, width: u32, height: u32);
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, fill: &Fill);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, gradient: &LinearGradient);
    fn fill_circle(&mut self, center: Vec2, radius: f32, style: &DrawStyle);
    fn fill_square(&mut self, center: Vec2, half_extent: f32, style: &DrawStyle);
    fn fill_text(&mut self, text: &str, at: Vec2, color: Rgba);

    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}
