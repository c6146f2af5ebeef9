//! Budgeted, round-robin heat/water diffusion and vegetation growth.
//!
//! Each call to [`DiffusionSimulator::step`] updates at most `budget` cells,
//! resuming at the grid's persistent cursor. A full pass therefore spreads
//! over several frames and a cell may read neighbours that are up to one
//! partial pass stale.

use tracing::trace;

use crate::error::WorldError;
use crate::grid::Grid;
use crate::tile::{MAX_VEGETATION, Tile};

/// Heat above which water starts to evaporate.
pub const EVAPORATION_BASELINE_KELVIN: f32 = 300.0;

/// Heat above which established vegetation suffers extra dieback.
pub const HEAT_STRESS_KELVIN: f32 = 335.0;

/// Vegetation level from which heat-stress dieback applies.
pub const HEAT_STRESS_MIN_VEGETATION: f32 = 3.0;

/// Tunable rate constants for one cell update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationRates {
    /// Fraction of the gap to the neighbour heat average closed per update.
    pub heat_diffuse_rate: f32,
    /// Fraction of the gap to the neighbour water average closed per update.
    pub water_diffuse_rate: f32,
    /// Heat lost per unit of neighbouring water.
    pub water_cooling: f32,
    /// Water lost per Kelvin above [`EVAPORATION_BASELINE_KELVIN`].
    pub evap_per_degree: f32,
    /// Vegetation gained per update on fertile ground.
    pub regrowth_rate: f32,
    /// Vegetation lost per update on harsh ground.
    pub decay_rate: f32,
    /// Additional vegetation lost per update under heat stress.
    pub heat_stress_decay: f32,
}

impl Default for SimulationRates {
    fn default() -> Self {
        Self {
            heat_diffuse_rate: 0.10,
            water_diffuse_rate: 0.18,
            water_cooling: 0.04,
            evap_per_degree: 0.000_12,
            regrowth_rate: 0.005,
            decay_rate: 0.01,
            heat_stress_decay: 0.05,
        }
    }
}

/// Owns a [`Grid`] and advances it under a per-call work budget.
pub struct DiffusionSimulator {
    grid: Grid,
    rates: SimulationRates,
    completed_passes: u64,
}

impl DiffusionSimulator {
    pub fn new(grid: Grid, rates: SimulationRates) -> Self {
        Self {
            grid,
            rates,
            completed_passes: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Give up the grid, e.g. before regenerating the world.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn rates(&self) -> &SimulationRates {
        &self.rates
    }

    pub fn set_rates(&mut self, rates: SimulationRates) {
        self.rates = rates;
    }

    /// Number of times the cursor has wrapped back to the first cell.
    pub fn completed_passes(&self) -> u64 {
        self.completed_passes
    }

    /// Update up to `budget` cells starting at the cursor, in row-major order.
    ///
    /// A call never runs past the last cell: when it reaches the end of the
    /// grid the cursor wraps to 0 and the call returns. Returns the number
    /// of cells updated. A zero budget is a no-op.
    pub fn step(&mut self, budget: u32) -> usize {
        let total = self.grid.len();
        let start = self.grid.next_update_index();
        let count = (budget as usize).min(total - start);

        for index in start..start + count {
            self.update_index(index);
        }

        let next = (start + count) % total;
        self.grid.set_next_update_index(next);
        if count > 0 && next == 0 {
            self.completed_passes += 1;
            trace!(passes = self.completed_passes, "diffusion pass complete");
        }
        count
    }

    /// Update one cell immediately, outside the round-robin order.
    ///
    /// # Errors
    ///
    /// [`WorldError::OutOfBounds`] if `(x, y)` is outside the grid.
    pub fn update_tile(&mut self, x: i32, y: i32) -> Result<(), WorldError> {
        self.grid.tile_at(x, y)?;
        let index = y as usize * self.grid.width() as usize + x as usize;
        self.update_index(index);
        Ok(())
    }

    /// Player-driven planting at `(x, y)`.
    pub fn grow(&mut self, x: i32, y: i32, amount: f32) -> Result<(), WorldError> {
        self.grid.tile_at_mut(x, y)?.grow(amount);
        Ok(())
    }

    /// Player-driven burning at `(x, y)`.
    pub fn burn(&mut self, x: i32, y: i32, amount: f32) -> Result<(), WorldError> {
        self.grid.tile_at_mut(x, y)?.burn(amount);
        Ok(())
    }

    fn update_index(&mut self, index: usize) {
        let Some((avg_heat, avg_water)) = self.neighbour_averages(index) else {
            return;
        };
        let rates = self.rates;
        let tile = self.grid.tile_by_index_mut(index);
        apply_update(tile, &rates, avg_heat, avg_water);
    }

    /// Mean heat and water over the up-to-8 in-bounds neighbours, or `None`
    /// for a cell without neighbours.
    fn neighbour_averages(&self, index: usize) -> Option<(f32, f32)> {
        let width = self.grid.width() as i64;
        let height = self.grid.height() as i64;
        let x = index as i64 % width;
        let y = index as i64 / width;

        let mut heat = 0.0;
        let mut water = 0.0;
        let mut count = 0u32;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= width || ny >= height {
                    continue;
                }
                let neighbour = self.grid.tile_by_index((ny * width + nx) as usize);
                heat += neighbour.heat();
                water += neighbour.water();
                count += 1;
            }
        }

        if count == 0 {
            return None;
        }
        let n = count as f32;
        Some((heat / n, water / n))
    }
}

fn apply_update(tile: &mut Tile, rates: &SimulationRates, avg_heat: f32, avg_water: f32) {
    let heat = tile.heat() + (avg_heat - tile.heat()) * rates.heat_diffuse_rate
        - rates.water_cooling * avg_water;
    tile.set_heat(heat);

    let evaporation = ((heat - EVAPORATION_BASELINE_KELVIN) * rates.evap_per_degree).max(0.0);
    let water = tile.water() + (avg_water - tile.water()) * rates.water_diffuse_rate - evaporation;
    tile.set_water(water);

    if tile.is_fertile() {
        tile.set_vegetation((tile.vegetation() + rates.regrowth_rate).min(MAX_VEGETATION));
    }
    if tile.is_harsh() {
        tile.set_vegetation((tile.vegetation() - rates.decay_rate).max(0.0));
    }
    if tile.heat() > HEAT_STRESS_KELVIN && tile.vegetation() >= HEAT_STRESS_MIN_VEGETATION {
        tile.set_vegetation((tile.vegetation() - rates.heat_stress_decay).max(0.0));
    }

    tile.recompute_visual();
}
