use std::path::PathBuf;

use clap::Parser;

use crate::config::{self, RenderSettings, StarShape};

#[derive(Debug, Parser)]
#[command(name = "nightsky", version, about = "Animated night sky with constellations")]
pub struct Args {
    /// Animation ticks per second.
    #[arg(long, default_value_t = config::TICK_HZ, value_parser = parse_tick_hz)]
    pub tick_hz: f32,

    /// Fraction threshold deciding which grid points become background stars.
    #[arg(long, default_value_t = config::STAR_DENSITY)]
    pub density: f64,

    /// Background grid stride in pixels.
    #[arg(long, default_value_t = config::GRID_STEP)]
    pub grid_step: u32,

    #[arg(long, value_enum, default_value_t = StarShape::Circle)]
    pub shape: StarShape,

    /// Draw stars without glow.
    #[arg(long)]
    pub dim: bool,

    /// Show the frames-per-second overlay (toggle with `d`).
    #[arg(long)]
    pub debug: bool,

    /// Seed for constellation placement and star colours.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Extra constellation definition file (JSON). May be repeated.
    #[arg(long = "constellation", value_name = "FILE")]
    pub constellations: Vec<PathBuf>,

    /// Pixel scale applied to constellation coordinates.
    #[arg(long, default_value_t = config::PLACEMENT_SIZE)]
    pub size_multiplier: f32,

    /// Raster pixels per terminal half-cell.
    #[arg(
        long,
        default_value_t = config::SUPERSAMPLE,
        value_parser = clap::value_parser!(u32).range(1..=16)
    )]
    pub supersample: u32,

    /// Render headless and write the last frame to this PNG.
    #[arg(long, value_name = "PNG")]
    pub export: Option<PathBuf>,

    /// Frames to advance before exporting.
    #[arg(long, default_value_t = config::EXPORT_FRAMES)]
    pub frames: u64,

    #[arg(long, default_value_t = config::EXPORT_WIDTH)]
    pub width: u32,

    #[arg(long, default_value_t = config::EXPORT_HEIGHT)]
    pub height: u32,

    /// Normalize a JSON array of raw `{x, y}` clicks and print the result.
    #[arg(long, value_name = "FILE")]
    pub normalize: Option<PathBuf>,

    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            star_density: self.density,
            grid_step: self.grid_step,
            shape: self.shape,
            bright: !self.dim,
            debug: self.debug,
            color_seed: self.seed,
        }
    }
}

fn parse_tick_hz(raw: &str) -> Result<f32, String> {
    let hz: f32 = raw.parse().map_err(|err| format!("{err}"))?;
    if (config::MIN_TICK_HZ..=config::MAX_TICK_HZ).contains(&hz) {
        Ok(hz)
    } else {
        Err(format!(
            "expected a rate between {} and {}",
            config::MIN_TICK_HZ,
            config::MAX_TICK_HZ
        ))
    }
}
