use std::error::Error;
use std::path::PathBuf;

use minimap_core::{Minimap, MinimapConfig};
use minimap_snapshot::raster::Rasterizer;
use minimap_snapshot::scene;

const OUTPUT_SCALE: f32 = 4.0;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("minimap.png"));
    let config = match args.next() {
        Some(path) => MinimapConfig::load(path)?,
        None => MinimapConfig::default(),
    };

    let world = scene::sample_world(scene::DEFAULT_SEED, scene::DEFAULT_RADIUS_CHUNKS)?;
    let minimap = Minimap::with_palette(config.viewport, config.palette()?);
    let state = scene::demo_state(config.markers());
    let frame = minimap.render(&state, &world);
    log::info!(
        "rendered {} draw commands around {:?} ({})",
        frame.commands.len(),
        state.focus.tile(),
        scene::describe(&world, state.focus.tile())
    );
    for entry in &frame.legend {
        log::info!("legend: {} {}", entry.label, entry.color);
    }

    let image = Rasterizer::new(OUTPUT_SCALE).render(&frame.commands);
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    image.save(&output)?;
    println!("wrote {}", output.display());

    Ok(())
}
