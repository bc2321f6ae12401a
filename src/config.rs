use crate::types::Rgba;

pub const TICK_HZ: f32 = 165.0;
pub const LEGACY_TICK_HZ: f32 = 60.0;
pub const MIN_TICK_HZ: f32 = 1.0;
pub const MAX_TICK_HZ: f32 = 1000.0;
pub const PRESENT_HZ: f32 = 30.0;
pub const FPS_SAMPLE_SECS: f32 = 1.0;

pub const STAR_DENSITY: f64 = 0.005;
pub const GRID_STEP: u32 = 4;

pub const SKY_TOP: Rgba = Rgba::rgb(0x00, 0x00, 0x00);
pub const SKY_BOTTOM: Rgba = Rgba::rgb(0x00, 0x1b, 0x33);

pub const STAR_COLORS: [Rgba; 3] = [
    Rgba::rgb(0xff, 0xff, 0xff),
    Rgba::rgb(0xf0, 0xf0, 0xf0),
    Rgba::rgb(0xe0, 0xe0, 0xe0),
];

pub const BACKGROUND_STAR_COLORS: [Rgba; 4] = [
    Rgba::new(0xff, 0xff, 0xff, 0xaa),
    Rgba::new(0xff, 0xff, 0xff, 0x99),
    Rgba::new(0xff, 0xff, 0xff, 0x88),
    Rgba::new(0xff, 0xff, 0xff, 0x77),
];

pub const LINE_COLOR: Rgba = Rgba::rgb(0x52, 0xa2, 0xff);
pub const LINE_BASE_ALPHA: u8 = 0x18;
pub const LINE_PULSE_ALPHA: u8 = 0xdd;
pub const LINE_WIDTH: f32 = 1.0;
pub const PULSE_PERIOD: f64 = 256.0;

pub const SMALL_STAR_RADIUS: f32 = 0.8;
pub const SMALL_STAR_GLOW: f32 = 2.0;
pub const MEDIUM_STAR_RADIUS: f32 = 1.5;
pub const MEDIUM_STAR_GLOW: f32 = 10.0;
pub const LARGE_STAR_RADIUS: f32 = 2.5;
pub const LARGE_STAR_GLOW: f32 = 20.0;

pub const STAR_SEED_SPREAD: f64 = 1000.0;
pub const TWINKLE_PERIOD: f64 = 32.0;
pub const TWINKLE_DEPTH: f32 = 0.3;

pub const DEBUG_TEXT_COLOR: Rgba = Rgba::rgb(0xff, 0xff, 0x00);

pub const PLACEMENT_SIZE: f32 = 150.0;

/// Raster pixels per half-block cell edge in the terminal presenter.
pub const SUPERSAMPLE: u32 = 4;

pub const EXPORT_WIDTH: u32 = 1280;
pub const EXPORT_HEIGHT: u32 = 720;
pub const EXPORT_FRAMES: u64 = 1;

/// Primitive used for star bodies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum StarShape {
    #[default]
    Circle,
    Square,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    pub star_density: f64,
    pub grid_step: u32,
    pub shape: StarShape,
    /// Draw glow halos around stars.
    pub bright: bool,
    pub debug: bool,
    /// Fixed seed for the per-draw colour rolls; `None` seeds from entropy.
    pub color_seed: Option<u64>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            star_density: STAR_DENSITY,
            grid_step: GRID_STEP,
            shape: StarShape::Circle,
            bright: true,
            debug: false,
            color_seed: None,
        }
    }
}
