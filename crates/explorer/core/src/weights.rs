//! Fixed ten-entry weight vector consumed by interest scoring.
//!
//! Weights = dot-product coefficients over the feature vector
//! `[DIST, NB_EMPTY, NB_WALL, NB_FOG, NB_VISITED,
//!   AVG_DIST_EMPTY, AVG_DIST_WALL, AVG_DIST_FOG, AVG_DIST_VISITED,
//!   DIST_FROM_ENTITY]`.
//!
//! The order is part of the on-disk format and must not change.

use std::ops::{Index, IndexMut};

use strum::{EnumCount, IntoEnumIterator};

use crate::env::{RngOracle, compute_seed};

/// Named slot of the weight and feature vectors, in storage order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::AsRefStr,
    strum::EnumCount,
    strum::EnumIter,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum WeightIndex {
    /// Distance from the candidate to the goal.
    Dist = 0,
    NbEmpty = 1,
    NbWall = 2,
    /// Fog cells visible from the candidate.
    NbFog = 3,
    NbVisited = 4,
    AvgDistEmpty = 5,
    AvgDistWall = 6,
    AvgDistFog = 7,
    AvgDistVisited = 8,
    /// Distance from the candidate to the agent.
    DistFromEntity = 9,
}

impl WeightIndex {
    pub const fn slot(self) -> usize {
        self as usize
    }
}

/// Number of entries in both vectors.
pub const WEIGHT_COUNT: usize = WeightIndex::COUNT;

/// Stream separator for [`compute_seed`] when drawing weights.
const WEIGHT_SEED_CONTEXT: u32 = 0x5745_4947;

/// Raw feature values for one candidate cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Features([f64; WEIGHT_COUNT]);

impl Features {
    pub const fn new(values: [f64; WEIGHT_COUNT]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; WEIGHT_COUNT] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (WeightIndex, f64)> + '_ {
        WeightIndex::iter().map(|index| (index, self[index]))
    }
}

impl Index<WeightIndex> for Features {
    type Output = f64;

    fn index(&self, index: WeightIndex) -> &f64 {
        &self.0[index.slot()]
    }
}

impl IndexMut<WeightIndex> for Features {
    fn index_mut(&mut self, index: WeightIndex) -> &mut f64 {
        &mut self.0[index.slot()]
    }
}

/// Immutable weight vector for one episode.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weights([f64; WEIGHT_COUNT]);

impl Weights {
    pub const fn new(values: [f64; WEIGHT_COUNT]) -> Self {
        Self(values)
    }

    /// Pseudo-random weights in `[-0.5, 0.5)` with a 1/1000 resolution.
    ///
    /// Each slot draws from its own derived seed so the vector depends only on
    /// `seed`.
    pub fn seeded<R: RngOracle + ?Sized>(rng: &R, seed: u64) -> Self {
        let mut values = [0.0; WEIGHT_COUNT];
        for index in WeightIndex::iter() {
            let draw_seed = compute_seed(seed, index.slot() as u64, WEIGHT_SEED_CONTEXT);
            values[index.slot()] = rng.unit_millis(draw_seed) - 0.5;
        }
        Self(values)
    }

    pub fn values(&self) -> &[f64; WEIGHT_COUNT] {
        &self.0
    }

    pub fn into_inner(self) -> [f64; WEIGHT_COUNT] {
        self.0
    }

    /// Weighted sum in storage order. NaN features propagate.
    pub fn dot(&self, features: &Features) -> f64 {
        self.0
            .iter()
            .zip(features.values())
            .map(|(weight, feature)| weight * feature)
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WeightIndex, f64)> + '_ {
        WeightIndex::iter().map(|index| (index, self[index]))
    }
}

impl Index<WeightIndex> for Weights {
    type Output = f64;

    fn index(&self, index: WeightIndex) -> &f64 {
        &self.0[index.slot()]
    }
}

impl From<[f64; WEIGHT_COUNT]> for Weights {
    fn from(values: [f64; WEIGHT_COUNT]) -> Self {
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    #[test]
    fn index_order_is_stable() {
        let names: Vec<String> = WeightIndex::iter().map(|i| i.to_string()).collect();
        assert_eq!(
            names,
            [
                "DIST",
                "NB_EMPTY",
                "NB_WALL",
                "NB_FOG",
                "NB_VISITED",
                "AVG_DIST_EMPTY",
                "AVG_DIST_WALL",
                "AVG_DIST_FOG",
                "AVG_DIST_VISITED",
                "DIST_FROM_ENTITY",
            ]
        );
        assert_eq!(WEIGHT_COUNT, 10);
        assert_eq!("nb_fog".parse::<WeightIndex>().unwrap(), WeightIndex::NbFog);
    }

    #[test]
    fn seeded_weights_are_bounded_and_deterministic() {
        let a = Weights::seeded(&PcgRng, 42);
        let b = Weights::seeded(&PcgRng, 42);
        let c = Weights::seeded(&PcgRng, 43);

        assert_eq!(a, b);
        assert_ne!(a, c);
        for (_, value) in a.iter() {
            assert!((-0.5..0.5).contains(&value), "{value}");
        }
    }

    #[test]
    fn dot_follows_index_order() {
        let weights = Weights::new([1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -2.0]);
        let mut features = Features::default();
        features[WeightIndex::Dist] = 3.0;
        features[WeightIndex::DistFromEntity] = 0.5;
        features[WeightIndex::NbWall] = 100.0;

        assert_eq!(weights.dot(&features), 2.0);
        assert_eq!(weights[WeightIndex::DistFromEntity], -2.0);
    }

    #[test]
    fn nan_feature_propagates_through_dot() {
        let weights = Weights::new([0.1; WEIGHT_COUNT]);
        let mut features = Features::default();
        features[WeightIndex::AvgDistFog] = f64::NAN;
        assert!(weights.dot(&features).is_nan());
    }
}
