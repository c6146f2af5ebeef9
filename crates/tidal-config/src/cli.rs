//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Headless tidal world runner.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "tidal", about = "Procedural island simulation")]
pub struct CliArgs {
    /// Viewport width in pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height in pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// World generation seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Map width in tiles.
    #[arg(long)]
    pub map_width: Option<u32>,

    /// Map height in tiles.
    #[arg(long)]
    pub map_height: Option<u32>,

    /// Tiles updated per frame.
    #[arg(long)]
    pub budget: Option<u32>,

    /// Frames to simulate before exiting.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(seed) = args.seed {
            self.world.seed = seed;
        }
        if let Some(w) = args.map_width {
            self.world.width = w;
        }
        if let Some(h) = args.map_height {
            self.world.height = h;
        }
        if let Some(budget) = args.budget {
            self.simulation.update_budget = budget;
        }
        if let Some(frames) = args.frames {
            self.debug.frames = frames;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
