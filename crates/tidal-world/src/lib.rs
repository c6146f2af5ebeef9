//! Tile grid, per-tile terrain state, the budgeted diffusion simulator, and
//! the player body the camera follows.

mod error;
mod grid;
mod player;
mod simulation;
mod tile;

pub use error::WorldError;
pub use grid::Grid;
pub use player::{Player, PlayerSettings};
pub use simulation::{
    DiffusionSimulator, EVAPORATION_BASELINE_KELVIN, HEAT_STRESS_KELVIN,
    HEAT_STRESS_MIN_VEGETATION, SimulationRates,
};
pub use tile::{
    BURN_HEAT_PER_UNIT, MAX_VEGETATION, OBSTACLE_THRESHOLD, Tile, TileState, VisualClass,
};
