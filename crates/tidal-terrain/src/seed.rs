//! Deterministic seeded generation utilities.
//!
//! Every random stream used during world generation is derived from the
//! world seed and a stream name, so regenerating with the same seed replays
//! the same sequence. No wall-clock entropy is involved.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Derive a u64 sub-seed from the world seed and a stream name.
///
/// Uses SipHash (via std's `DefaultHasher`) to combine both inputs into a
/// well-distributed u64.
pub fn derive_seed(world_seed: u64, stream: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    world_seed.hash(&mut hasher);
    stream.hash(&mut hasher);
    hasher.finish()
}

/// Deterministic RNG for a named stream of a world.
pub fn stream_rng(world_seed: u64, stream: &str) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_seed(world_seed, stream))
}

/// Deterministic sqrt using libm (not platform libc).
#[inline]
pub fn det_sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}
