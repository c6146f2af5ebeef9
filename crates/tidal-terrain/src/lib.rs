//! Procedural island generation: seeded multi-octave noise fields, radial
//! falloff, and probabilistic vegetation seeding.

mod generator;
mod noise_field;
mod seed;

pub use generator::{GeneratorParams, TerrainSample, WorldGenerator};
pub use noise_field::{NoiseField, NoiseParams};
pub use seed::{derive_seed, det_sqrt, stream_rng};
