//! Multi-octave fractal Brownian motion (fBm) over Perlin gradient noise.
//!
//! Octaves are summed and divided by the total amplitude so the field stays
//! in roughly `[-1, 1]` regardless of octave count.

use noise::{NoiseFn, Perlin};

use crate::seed::derive_seed;

/// Configuration for a [`NoiseField`].
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseParams {
    /// Seed for the permutation table and the sampling offset.
    pub seed: u64,
    /// Number of noise octaves to composite.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves. Default: 2.0.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves. Default: 0.5.
    pub persistence: f64,
    /// Frequency of the first octave, applied to the input coordinates.
    pub frequency: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 4,
            lacunarity: 2.0,
            persistence: 0.5,
            frequency: 1.0,
        }
    }
}

/// Deterministic, continuous scalar field over 2D coordinates.
pub struct NoiseField {
    noise: Perlin,
    params: NoiseParams,
    /// Seed-derived shift of the sampling origin. Perlin noise is zero on
    /// every lattice point, so without it the world centre would be flat.
    offset: [f64; 2],
    norm: f64,
}

impl NoiseField {
    pub fn new(params: NoiseParams) -> Self {
        let noise = Perlin::new(fold_seed(params.seed));
        let offset = [
            lattice_offset(derive_seed(params.seed, "offset-x")),
            lattice_offset(derive_seed(params.seed, "offset-y")),
        ];

        let mut norm = 0.0;
        let mut amplitude = 1.0;
        for _ in 0..params.octaves {
            norm += amplitude;
            amplitude *= params.persistence;
        }

        Self {
            noise,
            params,
            offset,
            norm,
        }
    }

    /// Sample the field. Output is approximately in `[-1, 1]`; a field with
    /// zero octaves returns 0.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        if self.norm == 0.0 {
            return 0.0;
        }

        let mut total = 0.0;
        let mut frequency = self.params.frequency;
        let mut amplitude = 1.0;
        for _ in 0..self.params.octaves {
            let nx = x * frequency + self.offset[0];
            let ny = y * frequency + self.offset[1];
            total += self.noise.get([nx, ny]) * amplitude;

            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }

        total / self.norm
    }

    pub fn params(&self) -> &NoiseParams {
        &self.params
    }
}

fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

/// Map a derived seed to a fractional offset in `[0, 256)`.
fn lattice_offset(bits: u64) -> f64 {
    (bits >> 11) as f64 / (1u64 << 53) as f64 * 256.0
}
