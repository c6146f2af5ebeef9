//! Configuration for the tidal simulation.
//!
//! Settings persist to disk as `config.ron`, accept CLI overrides via clap,
//! and tolerate missing or unknown fields so older files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, ConfigOrigin, DebugConfig, PlayerConfig, SimulationConfig, WindowConfig,
    WorldConfig,
};
pub use error::ConfigError;
