//! Island world generation.
//!
//! Elevation noise minus a radial falloff gives an island silhouette: the
//! further a cell is from the centre, the more it trends underwater. A
//! second, independent noise field supplies temperature. Low cells become
//! water, and dry or fertile ground is seeded with vegetation.
//!
//! Elevation noise is stretched to span `[-1, 1]` over the whole grid before
//! the falloff is applied, so every world with any relief has both open sea
//! (at the lowest cell) and dry land (at the highest).

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tidal_world::{Grid, Tile, TileState, WorldError};
use tracing::{debug, info};

use crate::noise_field::{NoiseField, NoiseParams};
use crate::seed::{derive_seed, det_sqrt, stream_rng};

/// Tunable constants for [`WorldGenerator`].
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorParams {
    /// Edge length of one tile in world units.
    pub tile_size: f32,
    /// Octaves of the elevation field.
    pub elevation_octaves: u32,
    /// Coordinate scale for the elevation field.
    pub elevation_scale: f64,
    /// Octaves of the temperature field.
    pub temperature_octaves: u32,
    /// Coordinate scale for the temperature field.
    pub temperature_scale: f64,
    /// Divisor of the centre distance; larger values give a rounder, wider island.
    pub shape_radius: f64,
    /// Elevation removed per unit of normalized centre distance.
    pub falloff_strength: f64,
    /// Mean temperature in Kelvin.
    pub base_temperature: f64,
    /// Temperature swing applied to the temperature field.
    pub temperature_amplitude: f64,
    /// Elevation shift before the water ramp.
    pub water_offset: f64,
    /// Sharpness of the water/land transition.
    pub water_steepness: f64,
    /// Stretch elevation noise to the full `[-1, 1]` range of each world.
    pub stretch_elevation: bool,
    /// Elevation at and above which a cell is always dry.
    pub land_threshold: f64,
    /// Minimum elevation for any vegetation seeding.
    pub min_vegetation_elevation: f64,
    /// Upper bound of the ground-cover roll on dry land.
    pub ground_cover_max: f64,
    /// Chance of a thicket on fertile ground.
    pub thicket_chance: f64,
    /// Chance of dense forest on fertile ground.
    pub forest_chance: f64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            tile_size: 16.0,
            elevation_octaves: 4,
            elevation_scale: 2.3,
            temperature_octaves: 3,
            temperature_scale: 3.1,
            shape_radius: 0.72,
            falloff_strength: 0.85,
            base_temperature: 300.0,
            temperature_amplitude: 18.0,
            water_offset: 0.45,
            water_steepness: 1.2,
            stretch_elevation: true,
            land_threshold: 0.5,
            min_vegetation_elevation: 0.05,
            ground_cover_max: 2.2,
            thicket_chance: 0.10,
            forest_chance: 0.03,
        }
    }
}

/// Raw terrain values at one cell before vegetation seeding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainSample {
    pub elevation: f64,
    pub temperature: f64,
    pub water: f64,
}

/// Builds initial island grids from a seed.
#[derive(Clone, Debug, Default)]
pub struct WorldGenerator {
    params: GeneratorParams,
}

impl WorldGenerator {
    pub fn new(params: GeneratorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    /// Generate a `width x height` island.
    ///
    /// The same `(width, height, seed)` always yields a bit-identical grid.
    ///
    /// # Errors
    ///
    /// [`WorldError::InvalidDimensions`] for a zero dimension, checked before
    /// any noise is sampled or memory allocated.
    pub fn generate(&self, width: u32, height: u32, seed: u64) -> Result<Grid, WorldError> {
        let terrain = self.terrain(width, height, seed)?;
        let mut rng = stream_rng(seed, "vegetation");
        let grid = Grid::from_fn(width, height, self.params.tile_size, |x, y| {
            let sample = terrain[y as usize * width as usize + x as usize];
            self.seed_cell(x, y, sample, &mut rng)
        })?;

        info!(
            width,
            height,
            seed,
            water_tiles = grid.count_where(|t| t.visual_class().is_water()),
            vegetated_tiles = grid.count_where(|t| t.vegetation() > 0.0),
            obstacles = grid.count_where(Tile::is_obstacle),
            "island generated"
        );
        Ok(grid)
    }

    /// Elevation, temperature, and water for every cell, in row-major order.
    ///
    /// # Errors
    ///
    /// [`WorldError::InvalidDimensions`] for a zero dimension.
    pub fn terrain(
        &self,
        width: u32,
        height: u32,
        seed: u64,
    ) -> Result<Vec<TerrainSample>, WorldError> {
        let len = Grid::checked_len(width, height)?;
        debug!(width, height, seed, "sampling terrain");
        let p = &self.params;

        let elevation_field = NoiseField::new(NoiseParams {
            seed: derive_seed(seed, "elevation"),
            octaves: p.elevation_octaves,
            frequency: p.elevation_scale,
            ..Default::default()
        });
        let temperature_field = NoiseField::new(NoiseParams {
            seed: derive_seed(seed, "temperature"),
            octaves: p.temperature_octaves,
            frequency: p.temperature_scale,
            ..Default::default()
        });

        let coords = |i: usize| {
            let (x, y) = (i % width as usize, i / width as usize);
            (
                x as f64 / width as f64 - 0.5,
                y as f64 / height as f64 - 0.5,
            )
        };

        let mut relief: Vec<f64> = (0..len)
            .map(|i| {
                let (nx, ny) = coords(i);
                elevation_field.sample(nx, ny)
            })
            .collect();
        if p.stretch_elevation {
            stretch_to_unit(&mut relief);
        }

        Ok(relief
            .into_iter()
            .enumerate()
            .map(|(i, noise)| {
                let (nx, ny) = coords(i);
                let dist = det_sqrt(nx * nx + ny * ny) / p.shape_radius;
                let elevation = noise - dist * p.falloff_strength;
                let temperature =
                    p.base_temperature + temperature_field.sample(nx, ny) * p.temperature_amplitude;
                TerrainSample {
                    elevation,
                    temperature,
                    water: self.water_for(elevation),
                }
            })
            .collect())
    }

    fn water_for(&self, elevation: f64) -> f64 {
        let p = &self.params;
        if elevation < p.land_threshold {
            (1.0 - (elevation + p.water_offset) * p.water_steepness).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    fn seed_cell(&self, x: u32, y: u32, sample: TerrainSample, rng: &mut ChaCha8Rng) -> TileState {
        let p = &self.params;
        let mut state = TileState {
            water: sample.water as f32,
            heat: sample.temperature as f32,
            vegetation: 0.0,
        };
        if sample.elevation < p.min_vegetation_elevation {
            return state;
        }

        let probe = Tile::new(x, y, state);
        let mut vegetation = 0.0f64;
        if probe.water() < 0.3
            && probe.earth() > 0.4
            && p.ground_cover_max.is_finite()
            && p.ground_cover_max > 0.0
        {
            vegetation = rng.random_range(0.0..p.ground_cover_max);
        }
        if probe.is_fertile() {
            if rng.random::<f64>() < p.thicket_chance {
                vegetation = vegetation.max(rng.random_range(1.0..3.5));
            }
            if rng.random::<f64>() < p.forest_chance {
                vegetation = vegetation.max(rng.random_range(4.0..5.0));
            }
        }
        state.vegetation = vegetation as f32;
        state
    }
}

/// Linearly rescale `values` so the lowest maps to -1 and the highest to 1.
/// Flat input is left untouched.
fn stretch_to_unit(values: &mut [f64]) {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = hi - lo;
    if range <= f64::EPSILON {
        return;
    }
    for v in values.iter_mut() {
        *v = (*v - lo) / range * 2.0 - 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidal_world::{MAX_VEGETATION, VisualClass};

    fn class_fraction(grid: &Grid, pred: impl Fn(VisualClass) -> bool) -> f64 {
        grid.count_where(|t| pred(t.visual_class())) as f64 / grid.len() as f64
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let generator = WorldGenerator::default();
        assert_eq!(
            generator.generate(0, 10, 1).unwrap_err(),
            WorldError::InvalidDimensions {
                width: 0,
                height: 10
            }
        );
        assert!(generator.generate(10, 0, 1).is_err());
    }

    #[test]
    fn test_same_seed_bit_identical() {
        let generator = WorldGenerator::default();
        let a = generator.generate(32, 24, 12345).unwrap();
        let b = generator.generate(32, 24, 12345).unwrap();
        for (ta, tb) in a.tiles().zip(b.tiles()) {
            assert_eq!(ta.water().to_bits(), tb.water().to_bits());
            assert_eq!(ta.heat().to_bits(), tb.heat().to_bits());
            assert_eq!(ta.vegetation().to_bits(), tb.vegetation().to_bits());
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let generator = WorldGenerator::default();
        let a = generator.generate(32, 32, 1).unwrap();
        let b = generator.generate(32, 32, 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_any_integer_seed_accepted() {
        let generator = WorldGenerator::default();
        for seed in [0, 1, u64::MAX, u64::MAX / 3] {
            assert!(generator.generate(8, 8, seed).is_ok(), "seed {seed} rejected");
        }
    }

    #[test]
    fn test_falloff_sinks_edges() {
        // Without relief the island is pure radial falloff.
        let generator = WorldGenerator::new(GeneratorParams {
            elevation_octaves: 0,
            ..GeneratorParams::default()
        });
        let (w, h) = (32u32, 32u32);
        let terrain = generator.terrain(w, h, 3).unwrap();
        let at = |x: u32, y: u32| terrain[(y * w + x) as usize];

        let centre = at(16, 16);
        assert_eq!(centre.elevation, 0.0);
        for (x, y) in [(0, 0), (31, 0), (0, 31), (31, 31), (0, 16), (16, 0)] {
            let edge = at(x, y);
            assert!(
                edge.elevation < centre.elevation && edge.water > centre.water,
                "({x}, {y}) should be lower and wetter than the centre: {edge:?}"
            );
        }
        for x in 17..w {
            assert!(at(x, 16).elevation < at(x - 1, 16).elevation, "not descending at x={x}");
        }
    }

    #[test]
    fn test_top_left_corner_holds_water() {
        let generator = WorldGenerator::default();
        for seed in [1, 9, 42] {
            let grid = generator.generate(40, 40, seed).unwrap();
            let corner = grid.tile_at(0, 0).unwrap();
            assert!(corner.water() > 0.0, "seed {seed}: corner is bone dry");
        }
    }

    #[test]
    fn test_every_world_has_sea_and_vegetation() {
        let generator = WorldGenerator::default();
        for (w, h) in [(4, 4), (10, 10), (33, 17), (2, 1)] {
            for seed in [0, 7, 42, 1234] {
                let grid = generator.generate(w, h, seed).unwrap();
                let sea = grid.count_where(|t| t.visual_class() == VisualClass::DeepWater);
                let vegetated = grid.count_where(|t| t.vegetation() > 0.0);
                assert!(sea > 0, "{w}x{h} seed {seed}: no deep water");
                assert!(vegetated > 0, "{w}x{h} seed {seed}: no vegetation");
            }
        }
    }

    #[test]
    fn test_stretch_spans_unit_range() {
        let mut values = vec![0.1, -0.2, 0.3, 0.0];
        stretch_to_unit(&mut values);
        assert_eq!(values[1], -1.0);
        assert_eq!(values[2], 1.0);
        assert!(values.iter().all(|v| (-1.0..=1.0).contains(v)));

        let mut flat = vec![0.25; 3];
        stretch_to_unit(&mut flat);
        assert_eq!(flat, vec![0.25; 3]);
    }

    #[test]
    fn test_high_elevation_is_dry() {
        let generator = WorldGenerator::default();
        for s in generator.terrain(32, 32, 5).unwrap() {
            if s.elevation >= generator.params().land_threshold {
                assert_eq!(s.water, 0.0);
            }
            assert!((0.0..=1.0).contains(&s.water));
        }
    }

    #[test]
    fn test_temperature_near_base() {
        let generator = WorldGenerator::default();
        let p = generator.params();
        for s in generator.terrain(16, 16, 11).unwrap() {
            assert!(
                (s.temperature - p.base_temperature).abs() <= p.temperature_amplitude + 1e-9,
                "temperature {} outside base +/- amplitude",
                s.temperature
            );
        }
    }

    #[test]
    fn test_generated_state_in_range() {
        let grid = WorldGenerator::default().generate(48, 48, 2024).unwrap();
        for tile in grid.tiles() {
            assert!((0.0..=1.0).contains(&tile.water()));
            assert!((0.0..=MAX_VEGETATION).contains(&tile.vegetation()));
            assert_eq!(tile.earth(), 1.0 - tile.water());
        }
    }

    #[test]
    fn test_no_vegetation_below_min_elevation() {
        let generator = WorldGenerator::default();
        let grid = generator.generate(32, 32, 8).unwrap();
        let terrain = generator.terrain(32, 32, 8).unwrap();
        for (tile, s) in grid.tiles().zip(&terrain) {
            if s.elevation < generator.params().min_vegetation_elevation {
                assert_eq!(tile.vegetation(), 0.0);
            }
        }
    }

    #[test]
    fn test_larger_world_has_land_and_sea() {
        let grid = WorldGenerator::default().generate(96, 96, 42).unwrap();
        let water = class_fraction(&grid, VisualClass::is_water);
        assert!(water > 0.2, "expected open sea, water fraction {water}");
        assert!(water < 1.0, "expected some land, water fraction {water}");
    }

    #[test]
    fn test_fertile_band_covers_vegetation_gate() {
        // Water at the vegetation gate must still count as fertile.
        let generator = WorldGenerator::default();
        let p = generator.params();
        let water = generator.water_for(p.min_vegetation_elevation);
        assert!((0.22..=0.65).contains(&water), "water {water} at the gate");
    }

    #[test]
    fn test_forests_and_obstacles_seeded() {
        let generator = WorldGenerator::default();
        let (mut forest, mut obstacles) = (0, 0);
        for seed in 0..10 {
            let grid = generator.generate(48, 48, seed).unwrap();
            forest += grid.count_where(|t| t.vegetation() >= 3.5);
            obstacles += grid.count_where(Tile::is_obstacle);
        }
        assert!(forest > 0, "no dense vegetation in ten worlds");
        assert!(obstacles > 0, "no obstacles in ten worlds");
    }

    #[test]
    fn test_high_vegetation_only_on_fertile_ground() {
        let generator = WorldGenerator::default();
        let p = generator.params();
        for seed in [3, 42, 77] {
            let grid = generator.generate(48, 48, seed).unwrap();
            let terrain = generator.terrain(48, 48, seed).unwrap();
            for (tile, s) in grid.tiles().zip(&terrain) {
                if f64::from(tile.vegetation()) > p.ground_cover_max {
                    assert!(tile.is_fertile(), "seed {seed}: {tile:?} is not fertile");
                    assert!(s.elevation >= p.min_vegetation_elevation);
                }
            }
        }
    }

    #[test]
    fn test_zero_ground_cover_does_not_panic() {
        let generator = WorldGenerator::new(GeneratorParams {
            ground_cover_max: 0.0,
            ..GeneratorParams::default()
        });
        let grid = generator.generate(24, 24, 5).unwrap();
        assert!(grid.tiles().all(|t| t.vegetation() == 0.0 || t.is_fertile()));
    }
}
