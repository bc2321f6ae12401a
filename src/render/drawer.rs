use std::time::Instant;

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{
    config::{self, RenderSettings, StarShape},
    core::clock::FpsCounter,
    render::surface::{DrawStyle, Fill, LinearGradient, Rect, Surface},
    sky::{ConstellationManager, StarSize},
    spatial::{self, BackgroundStar},
    types::{Rgba, Vec2},
};

/// Paints the sky, the background field and every placed constellation.
///
/// Resize-dependent state (sky gradient, background stars) is cached and
/// rebuilt through [`LandscapeDrawer::on_resize`]. Star colours are rolled
/// again on every draw, so the field flickers frame to frame.
pub struct LandscapeDrawer {
    settings: RenderSettings,
    sky: LinearGradient,
    background_stars: Vec<BackgroundStar>,
    generation: u64,
    fps: FpsCounter,
    rng: StdRng,
}

impl LandscapeDrawer {
    pub fn new(settings: RenderSettings) -> Self {
        let rng = match settings.color_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(settings, rng)
    }

    pub fn with_rng(settings: RenderSettings, rng: StdRng) -> Self {
        Self {
            settings,
            sky: sky_gradient(0, 0),
            background_stars: Vec::new(),
            generation: 0,
            fps: FpsCounter::new(Instant::now()),
            rng,
        }
    }

    #[cfg(test)]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn toggle_debug(&mut self) {
        self.settings.debug = !self.settings.debug;
    }

    pub fn calculate_gradients(&mut self, width: u32, height: u32) {
        self.sky = sky_gradient(width, height);
    }

    pub fn calculate_background_stars(&mut self, width: u32, height: u32) {
        self.background_stars = spatial::background_stars(
            width,
            height,
            self.settings.grid_step,
            self.settings.star_density,
        );
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.calculate_gradients(width, height);
        self.calculate_background_stars(width, height);
        self.generation += 1;
        log::debug!(
            "sky caches rebuilt (#{}) for {width}x{height}: {} background stars",
            self.generation,
            self.background_stars.len()
        );
    }

    /// Number of times the resize caches have been rebuilt.
    #[cfg(test)]
    pub fn cache_generation(&self) -> u64 {
        self.generation
    }

    #[cfg(test)]
    pub fn background_stars(&self) -> &[BackgroundStar] {
        &self.background_stars
    }

    #[cfg(test)]
    pub fn sky(&self) -> &LinearGradient {
        &self.sky
    }

    #[cfg(test)]
    pub fn fps(&self) -> f32 {
        self.fps.fps()
    }

    pub fn sample_fps(&mut self, now: Instant) -> Option<f32> {
        self.fps.sample(now)
    }

    pub fn draw<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        registry: &ConstellationManager,
        seed: u64,
    ) {
        self.fps.record_frame();
        if surface.is_empty() {
            return;
        }
        surface.clear();
        self.draw_sky(surface);
        self.draw_links(surface, registry, seed);
        self.draw_stars(surface, registry, seed);
        if self.settings.debug {
            let text = format!("FPS: {:.0}", self.fps.fps());
            surface.fill_text(&text, Vec2::new(4.0, 4.0), config::DEBUG_TEXT_COLOR);
        }
    }

    fn draw_sky<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let rect = Rect::new(0.0, 0.0, surface.width() as f32, surface.height() as f32);
        surface.fill_rect(rect, &Fill::Linear(self.sky.clone()));

        for i in 0..self.background_stars.len() {
            let star = self.background_stars[i];
            let color = roll(&mut self.rng, &config::BACKGROUND_STAR_COLORS);
            self.draw_star(surface, star.position, star.size, color, 1.0);
        }
    }

    fn draw_links<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        registry: &ConstellationManager,
        seed: u64,
    ) {
        let base = config::LINE_COLOR.with_alpha(config::LINE_BASE_ALPHA);
        let pulse = config::LINE_COLOR.with_alpha(config::LINE_PULSE_ALPHA);

        for (constellation, placement) in registry.placed() {
            for (index, line) in constellation.lines().iter().enumerate() {
                let (start, end) = constellation.endpoints(*line);
                let from = placement.project(start.relative_position);
                let to = placement.project(end.relative_position);

                let gradient = LinearGradient::new(from, to)
                    .with_stop(0.0, base)
                    .with_stop(pulse_offset(seed, index), pulse)
                    .with_stop(1.0, base);
                surface.stroke_line(from, to, config::LINE_WIDTH, &gradient);
            }
        }
    }

    fn draw_stars<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        registry: &ConstellationManager,
        seed: u64,
    ) {
        for (constellation, placement) in registry.placed() {
            for star in constellation.stars() {
                let center = placement.project(star.relative_position);
                let glow_scale = twinkle(star_seed(seed, star.relative_position));
                let color = roll(&mut self.rng, &config::STAR_COLORS);
                self.draw_star(surface, center, star.size, color, glow_scale);
            }
        }
    }

    fn draw_star<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        center: Vec2,
        size: StarSize,
        color: Rgba,
        glow_scale: f32,
    ) {
        let style = DrawStyle {
            color,
            glow_radius: size.glow_radius() * glow_scale,
            bright: self.settings.bright,
        };
        match self.settings.shape {
            StarShape::Circle => surface.fill_circle(center, size.radius(), &style),
            StarShape::Square => surface.fill_square(center, size.radius(), &style),
        }
    }
}

fn sky_gradient(width: u32, height: u32) -> LinearGradient {
    let mid = width as f32 / 2.0;
    LinearGradient::new(Vec2::new(mid, 0.0), Vec2::new(mid, height as f32))
        .with_stop(0.0, config::SKY_TOP)
        .with_stop(1.0, config::SKY_BOTTOM)
}

fn roll(rng: &mut StdRng, palette: &[Rgba]) -> Rgba {
    palette.choose(rng).copied().unwrap_or(Rgba::WHITE)
}

/// Where along a line its bright spot sits for this frame, in `[0, 1]`.
pub fn pulse_offset(seed: u64, line_index: usize) -> f32 {
    let phase = seed as f64 * line_index as f64 / config::PULSE_PERIOD;
    (phase.sin().abs() as f32).clamp(0.0, 1.0)
}

/// Per-star animation phase derived from the frame and the star's position.
pub fn star_seed(seed: u64, relative: Vec2) -> f64 {
    seed as f64
        + relative.x as f64 * config::STAR_SEED_SPREAD
        + relative.y as f64 * config::STAR_SEED_SPREAD
}

/// Glow scale in `[1 - TWINKLE_DEPTH, 1]`.
pub fn twinkle(star_seed: f64) -> f32 {
    let wave = 0.5 + 0.5 * (star_seed / config::TWINKLE_PERIOD).sin();
    1.0 - config::TWINKLE_DEPTH * wave as f32
}
