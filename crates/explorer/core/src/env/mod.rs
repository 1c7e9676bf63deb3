//! Environment inputs: the ground-truth map and deterministic randomness.
mod map;
mod rng;

pub use map::{GridMap, MapOracle};
pub use rng::{PcgRng, RngOracle, compute_seed};
