//! Per-cell terrain state and its derived visual classification.

/// Upper bound for [`Tile::vegetation`].
pub const MAX_VEGETATION: f32 = 5.0;

/// Vegetation level at which a tile blocks movement.
pub const OBSTACLE_THRESHOLD: f32 = 4.0;

/// Heat added per unit of vegetation burned by [`Tile::burn`].
pub const BURN_HEAT_PER_UNIT: f32 = 10.0;

/// Discrete look of a tile, derived from its water, vegetation, and heat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualClass {
    DeepWater,
    ShallowWater,
    DenseVegetation,
    MediumHighVegetation,
    MediumVegetation,
    SparseVegetation,
    BareGround,
}

impl VisualClass {
    /// Classify a cell. The first matching threshold wins.
    pub fn classify(water: f32, vegetation: f32) -> Self {
        if water > 0.68 {
            Self::DeepWater
        } else if water > 0.38 {
            Self::ShallowWater
        } else if vegetation >= 4.5 {
            Self::DenseVegetation
        } else if vegetation >= 3.5 {
            Self::MediumHighVegetation
        } else if vegetation >= 2.0 {
            Self::MediumVegetation
        } else if vegetation >= 1.0 {
            Self::SparseVegetation
        } else {
            Self::BareGround
        }
    }

    pub fn is_water(self) -> bool {
        matches!(self, Self::DeepWater | Self::ShallowWater)
    }
}

/// Raw attributes used to seed a [`Tile`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileState {
    /// Water coverage, clamped into `[0, 1]`.
    pub water: f32,
    /// Temperature in Kelvin.
    pub heat: f32,
    /// Plant growth, clamped into `[0, MAX_VEGETATION]`.
    pub vegetation: f32,
}

impl Default for TileState {
    fn default() -> Self {
        Self {
            water: 0.0,
            heat: 300.0,
            vegetation: 0.0,
        }
    }
}

/// A single grid cell.
///
/// Invariants after every public mutation:
/// - `water` is in `[0, 1]` and `earth == 1 - water`
/// - `vegetation` is in `[0, MAX_VEGETATION]`
/// - `visual_class` and `is_obstacle` match the numeric state
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    grid_x: u32,
    grid_y: u32,
    water: f32,
    earth: f32,
    heat: f32,
    vegetation: f32,
    is_obstacle: bool,
    visual_class: VisualClass,
}

impl Tile {
    /// Create a tile at the given grid coordinates, clamping the state into range.
    pub fn new(grid_x: u32, grid_y: u32, state: TileState) -> Self {
        let mut tile = Self {
            grid_x,
            grid_y,
            water: 0.0,
            earth: 1.0,
            heat: state.heat,
            vegetation: 0.0,
            is_obstacle: false,
            visual_class: VisualClass::BareGround,
        };
        tile.set_water(state.water);
        tile.set_vegetation(state.vegetation);
        tile.recompute_visual();
        tile
    }

    pub fn grid_x(&self) -> u32 {
        self.grid_x
    }

    pub fn grid_y(&self) -> u32 {
        self.grid_y
    }

    pub fn water(&self) -> f32 {
        self.water
    }

    pub fn earth(&self) -> f32 {
        self.earth
    }

    pub fn heat(&self) -> f32 {
        self.heat
    }

    pub fn vegetation(&self) -> f32 {
        self.vegetation
    }

    pub fn is_obstacle(&self) -> bool {
        self.is_obstacle
    }

    pub fn visual_class(&self) -> VisualClass {
        self.visual_class
    }

    /// Current attributes as a [`TileState`].
    pub fn state(&self) -> TileState {
        TileState {
            water: self.water,
            heat: self.heat,
            vegetation: self.vegetation,
        }
    }

    /// Moist, temperate soil. The only condition under which vegetation grows.
    pub fn is_fertile(&self) -> bool {
        (0.22..=0.65).contains(&self.water)
            && (285.0..=315.0).contains(&self.heat)
            && self.earth > 0.3
    }

    /// Dry, scorching, or waterlogged ground. The only condition under which
    /// vegetation decays.
    pub fn is_harsh(&self) -> bool {
        self.water < 0.12 || self.heat >= 330.0 || self.earth < 0.2
    }

    /// Plant `amount` units of vegetation. Negative or non-finite amounts are ignored.
    pub fn grow(&mut self, amount: f32) {
        if !amount.is_finite() || amount < 0.0 {
            return;
        }
        self.set_vegetation(self.vegetation + amount);
        self.recompute_visual();
    }

    /// Burn away `amount` units of vegetation, heating the tile.
    /// Negative or non-finite amounts are ignored.
    pub fn burn(&mut self, amount: f32) {
        if !amount.is_finite() || amount < 0.0 {
            return;
        }
        self.set_vegetation(self.vegetation - amount);
        self.heat += BURN_HEAT_PER_UNIT * amount;
        self.recompute_visual();
    }

    /// Refresh `visual_class` and `is_obstacle` from the numeric state.
    pub fn recompute_visual(&mut self) {
        self.is_obstacle = self.vegetation >= OBSTACLE_THRESHOLD;
        self.visual_class = VisualClass::classify(self.water, self.vegetation);
    }

    /// Display colour. Bare ground brightens with heat.
    pub fn color(&self) -> [u8; 3] {
        match self.visual_class {
            VisualClass::DeepWater => [0, 0, 160],
            VisualClass::ShallowWater => [20, 100, 200],
            VisualClass::DenseVegetation => [0, 70, 0],
            VisualClass::MediumHighVegetation => [10, 115, 10],
            VisualClass::MediumVegetation => [60, 170, 60],
            VisualClass::SparseVegetation => [105, 200, 105],
            VisualClass::BareGround => {
                let base = (170.0 + (self.heat - 300.0) * 0.35).clamp(80.0, 230.0) as u8;
                [base, base.saturating_sub(20), 80]
            }
        }
    }

    /// Clamp and store water, restoring `earth = 1 - water`. Callers must
    /// follow up with [`recompute_visual`](Self::recompute_visual).
    pub(crate) fn set_water(&mut self, water: f32) {
        self.water = if water.is_nan() {
            0.0
        } else {
            water.clamp(0.0, 1.0)
        };
        self.earth = 1.0 - self.water;
    }

    pub(crate) fn set_vegetation(&mut self, vegetation: f32) {
        self.vegetation = if vegetation.is_nan() {
            0.0
        } else {
            vegetation.clamp(0.0, MAX_VEGETATION)
        };
    }

    pub(crate) fn set_heat(&mut self, heat: f32) {
        self.heat = heat;
    }
}
