mod cli;
mod config;
mod core;
mod error;
mod logging;
mod render;
mod sky;
mod spatial;
mod types;
mod ui;

use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    cli::Args,
    error::Result,
    sky::{Catalog, ConstellationManager, authoring},
};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let headless = args.export.is_some() || args.normalize.is_some();
    let default_filter = if headless || args.log_file.is_some() {
        "info"
    } else {
        "off"
    };
    logging::init(args.log_file.as_deref(), default_filter)?;

    if let Some(path) = &args.normalize {
        let raw = authoring::positions_from_json(&authoring::read_file(path)?)?;
        println!("{}", authoring::positions_to_json(&authoring::normalize_points(&raw))?);
        return Ok(());
    }

    let catalog = build_catalog(&args)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let settings = args.render_settings();

    if let Some(path) = &args.export {
        let mut registry = ConstellationManager::new(catalog);
        registry.scatter(args.width, args.height, args.size_multiplier, &mut rng);
        ui::export(&registry, settings, args.width, args.height, args.frames, path)?;
        return Ok(());
    }

    let options = ui::RunOptions {
        tick_hz: args.tick_hz,
        supersample: args.supersample,
        size_multiplier: args.size_multiplier,
    };
    ui::run(ConstellationManager::new(catalog), settings, &options, &mut rng)
}

fn build_catalog(args: &Args) -> Result<Catalog> {
    let mut catalog = Catalog::builtin();
    for path in &args.constellations {
        for definition in authoring::load_definitions(path)? {
            catalog.insert(definition.into_constellation());
        }
    }
    log::info!("catalog holds {} constellations", catalog.len());
    Ok(catalog)
}
