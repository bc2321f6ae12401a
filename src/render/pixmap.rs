use std::path::Path;

use tiny_skia as sk;

use crate::{
    error::{LandscapeError, Result},
    render::surface::{DrawStyle, Fill, LinearGradient, Rect, Surface},
    types::{Rgba, Vec2},
};

/// Text queued on the surface. The raster has no font; whoever presents the
/// pixmap prints these on top.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub at: Vec2,
    pub color: Rgba,
}

/// [`Surface`] backed by a `tiny-skia` pixmap.
#[derive(Default)]
pub struct PixmapSurface {
    pixmap: Option<sk::Pixmap>,
    labels: Vec<TextLabel>,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixmap: sk::Pixmap::new(width, height),
            labels: Vec::new(),
        }
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    /// Straight-alpha colour at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let c = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some(Rgba::new(c.red(), c.green(), c.blue(), c.alpha()))
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        let pixmap = self.pixmap.as_ref().ok_or(LandscapeError::EmptySurface)?;
        pixmap
            .save_png(path)
            .map_err(|e| LandscapeError::Export(format!("{}: {e}", path.display())))
    }

    fn paint_glow(pixmap: &mut sk::Pixmap, center: Vec2, body: f32, style: &DrawStyle) {
        if !style.bright || style.glow_radius <= 0.0 {
            return;
        }
        let outer = body + style.glow_radius;
        let Some(path) = sk::PathBuilder::from_circle(center.x, center.y, outer) else {
            return;
        };
        let halo = style.color.with_alpha((style.color.a as f32 * 0.55) as u8);
        let stops = vec![
            sk::GradientStop::new(0.0, to_sk(halo)),
            sk::GradientStop::new(body / outer, to_sk(halo.with_alpha(halo.a / 2))),
            sk::GradientStop::new(1.0, to_sk(halo.with_alpha(0))),
        ];
        let point = sk::Point::from_xy(center.x, center.y);
        let Some(shader) = sk::RadialGradient::new(
            point,
            point,
            outer,
            stops,
            sk::SpreadMode::Pad,
            sk::Transform::identity(),
        ) else {
            return;
        };
        let paint = sk::Paint {
            shader,
            anti_alias: true,
            ..sk::Paint::default()
        };
        pixmap.fill_path(&path, &paint, sk::FillRule::Winding, sk::Transform::identity(), None);
    }
}

impl Surface for PixmapSurface {
    fn width(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, |p| p.width())
    }

    fn height(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, |p| p.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.width() == width && self.height() == height {
            return;
        }
        self.pixmap = sk::Pixmap::new(width, height);
        self.labels.clear();
    }

    fn clear(&mut self) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill(sk::Color::TRANSPARENT);
        }
        self.labels.clear();
    }

    fn fill_rect(&mut self, rect: Rect, fill: &Fill) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let Some(rect) = sk::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) else {
            return;
        };
        let Some(shader) = fill_shader(fill) else {
            return;
        };
        let paint = sk::Paint {
            shader,
            ..sk::Paint::default()
        };
        pixmap.fill_rect(rect, &paint, sk::Transform::identity(), None);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, gradient: &LinearGradient) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let mut pb = sk::PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        let Some(path) = pb.finish() else {
            return;
        };
        let Some(shader) = linear_shader(gradient) else {
            return;
        };
        let paint = sk::Paint {
            shader,
            anti_alias: true,
            ..sk::Paint::default()
        };
        let stroke = sk::Stroke {
            width,
            line_cap: sk::LineCap::Round,
            ..sk::Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, sk::Transform::identity(), None);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, style: &DrawStyle) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        Self::paint_glow(pixmap, center, radius, style);
        let Some(path) = sk::PathBuilder::from_circle(center.x, center.y, radius) else {
            return;
        };
        let mut paint = sk::Paint::default();
        paint.set_color(to_sk(style.color));
        paint.anti_alias = true;
        pixmap.fill_path(&path, &paint, sk::FillRule::Winding, sk::Transform::identity(), None);
    }

    fn fill_square(&mut self, center: Vec2, half_extent: f32, style: &DrawStyle) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        Self::paint_glow(pixmap, center, half_extent, style);
        let Some(rect) = sk::Rect::from_xywh(
            center.x - half_extent,
            center.y - half_extent,
            half_extent * 2.0,
            half_extent * 2.0,
        ) else {
            return;
        };
        let mut paint = sk::Paint::default();
        paint.set_color(to_sk(style.color));
        pixmap.fill_rect(rect, &paint, sk::Transform::identity(), None);
    }

    fn fill_text(&mut self, text: &str, at: Vec2, color: Rgba) {
        if self.pixmap.is_none() {
            return;
        }
        self.labels.push(TextLabel {
            text: text.to_string(),
            at,
            color,
        });
    }
}

fn to_sk(color: Rgba) -> sk::Color {
    sk::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn fill_shader(fill: &Fill) -> Option<sk::Shader<'static>> {
    match fill {
        Fill::Solid(color) => Some(sk::Shader::SolidColor(to_sk(*color))),
        Fill::Linear(gradient) => linear_shader(gradient),
    }
}

fn linear_shader(gradient: &LinearGradient) -> Option<sk::Shader<'static>> {
    let stops: Vec<sk::GradientStop> = gradient
        .stops()
        .iter()
        .map(|stop| sk::GradientStop::new(stop.offset, to_sk(stop.color)))
        .collect();
    match stops.len() {
        0 => None,
        1 => Some(sk::Shader::SolidColor(to_sk(gradient.stops()[0].color))),
        _ => sk::LinearGradient::new(
            sk::Point::from_xy(gradient.start.x, gradient.start.y),
            sk::Point::from_xy(gradient.end.x, gradient.end.y),
            stops,
            sk::SpreadMode::Pad,
            sk::Transform::identity(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(color: Rgba) -> DrawStyle {
        DrawStyle {
            color,
            glow_radius: 0.0,
            bright: false,
        }
    }

    mod dimensions {
        use super::*;

        #[test]
        fn reports_requested_size() {
            let surface = PixmapSurface::new(64, 32);
            assert_eq!(surface.width(), 64);
            assert_eq!(surface.height(), 32);
        }

        #[test]
        fn zero_size_is_empty() {
            let surface = PixmapSurface::new(0, 10);
            assert!(surface.is_empty());
            assert_eq!(surface.pixel(0, 0), None);
        }

        #[test]
        fn resize_reallocates() {
            let mut surface = PixmapSurface::new(4, 4);
            surface.resize(10, 6);
            assert_eq!((surface.width(), surface.height()), (10, 6));
        }
    }

    mod drawing {
        use super::*;

        #[test]
        fn solid_fill_covers_rect() {
            let mut surface = PixmapSurface::new(8, 8);
            surface.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), &Fill::Solid(Rgba::rgb(10, 20, 30)));
            assert_eq!(surface.pixel(3, 5), Some(Rgba::rgb(10, 20, 30)));
        }

        #[test]
        fn vertical_gradient_darkens_towards_top() {
            let mut surface = PixmapSurface::new(4, 100);
            let gradient = LinearGradient::new(Vec2::new(2.0, 0.0), Vec2::new(2.0, 100.0))
                .with_stop(0.0, Rgba::rgb(0, 0, 0))
                .with_stop(1.0, Rgba::rgb(0, 0, 200));
            surface.fill_rect(Rect::new(0.0, 0.0, 4.0, 100.0), &Fill::Linear(gradient));
            let top = surface.pixel(1, 1).unwrap();
            let bottom = surface.pixel(1, 98).unwrap();
            assert!(top.b < bottom.b);
        }

        #[test]
        fn circle_paints_its_centre() {
            let mut surface = PixmapSurface::new(20, 20);
            surface.fill_circle(Vec2::new(10.0, 10.0), 3.0, &opaque(Rgba::WHITE));
            assert_eq!(surface.pixel(10, 10), Some(Rgba::WHITE));
            assert_eq!(surface.pixel(0, 0).map(|c| c.a), Some(0));
        }

        #[test]
        fn glow_reaches_beyond_body() {
            let mut surface = PixmapSurface::new(40, 40);
            let style = DrawStyle {
                color: Rgba::WHITE,
                glow_radius: 10.0,
                bright: true,
            };
            surface.fill_circle(Vec2::new(20.0, 20.0), 2.0, &style);
            assert!(surface.pixel(26, 20).unwrap().a > 0);
        }

        #[test]
        fn dim_style_has_no_glow() {
            let mut surface = PixmapSurface::new(40, 40);
            let style = DrawStyle {
                color: Rgba::WHITE,
                glow_radius: 10.0,
                bright: false,
            };
            surface.fill_circle(Vec2::new(20.0, 20.0), 2.0, &style);
            assert_eq!(surface.pixel(26, 20).unwrap().a, 0);
        }

        #[test]
        fn square_paints_its_centre() {
            let mut surface = PixmapSurface::new(20, 20);
            surface.fill_square(Vec2::new(10.0, 10.0), 2.0, &opaque(Rgba::WHITE));
            assert_eq!(surface.pixel(10, 10), Some(Rgba::WHITE));
        }

        #[test]
        fn stroke_paints_along_line() {
            let mut surface = PixmapSurface::new(20, 20);
            let gradient = LinearGradient::new(Vec2::new(0.0, 10.0), Vec2::new(20.0, 10.0))
                .with_stop(0.0, Rgba::WHITE)
                .with_stop(1.0, Rgba::WHITE);
            surface.stroke_line(Vec2::new(0.0, 10.0), Vec2::new(20.0, 10.0), 2.0, &gradient);
            assert!(surface.pixel(10, 10).unwrap().a > 0);
        }

        #[test]
        fn clear_resets_pixels_and_labels() {
            let mut surface = PixmapSurface::new(8, 8);
            surface.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), &Fill::Solid(Rgba::WHITE));
            surface.fill_text("FPS: 1", Vec2::ZERO, Rgba::WHITE);
            surface.clear();
            assert_eq!(surface.pixel(4, 4).map(|c| c.a), Some(0));
            assert!(surface.labels().is_empty());
        }

        #[test]
        fn drawing_on_empty_surface_is_noop() {
            let mut surface = PixmapSurface::new(0, 0);
            surface.clear();
            surface.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), &Fill::Solid(Rgba::WHITE));
            surface.fill_circle(Vec2::ZERO, 3.0, &opaque(Rgba::WHITE));
            surface.fill_text("x", Vec2::ZERO, Rgba::WHITE);
            assert!(surface.labels().is_empty());
        }

        #[test]
        fn saving_empty_surface_fails() {
            let surface = PixmapSurface::new(0, 0);
            assert!(matches!(
                surface.save_png(Path::new("unused.png")),
                Err(LandscapeError::EmptySurface)
            ));
        }
    }
}
