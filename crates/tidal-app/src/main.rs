//! Headless tidal runner: generate a world, simulate a fixed number of
//! frames, and log a summary.

use clap::Parser;
use glam::Vec2;
use tidal_app::{AppDirs, AppError, CountingRenderer, Session};
use tidal_config::{CliArgs, Config, ConfigOrigin};
use tidal_world::Tile;
use tracing::info;

/// Simulated frame length for headless runs.
const FRAME_DT: f32 = 1.0 / 60.0;

fn main() {
    if let Err(e) = run(CliArgs::parse()) {
        eprintln!("tidal: {e}");
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<(), AppError> {
    let dirs = AppDirs::resolve_or(args.config.as_deref())?;
    dirs.create_dirs()?;

    // The log level comes from the config, so the config is read first and
    // where it came from is reported once logging is up.
    let (mut config, origin) = Config::open(&dirs.config_dir)?;
    config.apply_cli_overrides(&args);
    config.validate()?;

    tidal_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config))?;
    match &origin {
        ConfigOrigin::Loaded(path) => info!(path = %path.display(), "loaded config"),
        ConfigOrigin::Created(path) => info!(path = %path.display(), "created default config"),
    }
    info!(title = %config.window.title, config_dir = %dirs.config_dir.display(), "starting");

    let mut session = Session::new(&config)?;
    let mut renderer = CountingRenderer::default();
    let mut updated = 0usize;
    for _ in 0..config.debug.frames {
        updated += session.frame(Vec2::ZERO, FRAME_DT, &mut renderer).tiles_updated;
    }

    let simulator = session.simulator();
    let grid = simulator.grid();
    info!(
        frames = session.frames_run(),
        tiles_updated = updated,
        completed_passes = simulator.completed_passes(),
        quads_drawn = renderer.fills,
        water_tiles = grid.count_where(|t| t.visual_class().is_water()),
        vegetated_tiles = grid.count_where(|t| t.vegetation() > 0.0),
        obstacles = grid.count_where(Tile::is_obstacle),
        "run complete"
    );
    Ok(())
}
