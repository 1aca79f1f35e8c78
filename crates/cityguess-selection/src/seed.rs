//! Seed derivation: from an opaque request seed to a portable generator.
//!
//! The seed's canonical text is run through BLAKE3 key derivation and the
//! 32-byte output seeds a `ChaCha8` stream. ChaCha output is defined
//! bit-for-bit, so a seed yields the same draws on every platform and
//! every build.

use cityguess_types::SelectionSeed;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Domain-separation context for seed hashing.
const SEED_CONTEXT: &str = "cityguess 2024-06 selection seed";

/// The 32-byte generator seed for `seed`.
pub fn seed_bytes(seed: &SelectionSeed) -> [u8; 32] {
    blake3::derive_key(SEED_CONTEXT, seed.canonical().as_bytes())
}

/// A fresh generator determined entirely by `seed`.
pub fn rng_for(seed: &SelectionSeed) -> ChaCha8Rng {
    ChaCha8Rng::from_seed(seed_bytes(seed))
}
