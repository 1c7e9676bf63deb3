//! Weighted interest scoring of a single candidate cell.
//!
//! The score is the dot product of the episode [`Weights`] with ten features
//! measured over the candidate's local window (see [`extract_window`]):
//! distance to the target, per-state cell counts, per-state average distance
//! from the window center, and distance to the agent.
//!
//! [`extract_window`]: super::extract_window

use explorer_core::{CellState, Features, Position, WeightIndex, Weights, Window};
use serde::{Deserialize, Serialize};

use super::visibility::is_visible_from;

/// How a per-state average is formed when no cell of that state was counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AveragePolicy {
    /// `0 / 0`: the average is NaN and so is the final score. A NaN-scored
    /// cell is never chosen as a target.
    #[default]
    Propagate,
    /// Empty categories average to zero, keeping every score finite.
    ZeroWhenEmpty,
}

#[derive(Clone, Copy, Debug, Default)]
struct Tally {
    count: f64,
    distance_sum: f64,
}

impl Tally {
    fn add(&mut self, distance: f64) {
        self.count += 1.0;
        self.distance_sum += distance;
    }

    fn average(&self, policy: AveragePolicy) -> f64 {
        match policy {
            AveragePolicy::ZeroWhenEmpty if self.count == 0.0 => 0.0,
            _ => self.distance_sum / self.count,
        }
    }
}

/// Scores candidate cells against a fixed weight vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterestScorer {
    weights: Weights,
    averaging: AveragePolicy,
}

impl InterestScorer {
    pub fn new(weights: Weights) -> Self {
        Self {
            weights,
            averaging: AveragePolicy::default(),
        }
    }

    pub fn with_averaging(mut self, averaging: AveragePolicy) -> Self {
        self.averaging = averaging;
        self
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn averaging(&self) -> AveragePolicy {
        self.averaging
    }

    /// Raw features of `candidate`, or `None` when the window center is not
    /// Empty.
    ///
    /// `window` must be centered on `candidate`. Without a `target` the
    /// distance-to-target feature is zero.
    pub fn features(
        &self,
        window: &Window,
        candidate: Position,
        target: Option<Position>,
        agent: Position,
    ) -> Option<Features> {
        if window.center_state() != CellState::Empty {
            return None;
        }

        let center = window.range() as i32;
        let mut empty = Tally::default();
        let mut wall = Tally::default();
        let mut fog = Tally::default();
        let mut visited = Tally::default();

        for (wx, wy, state) in window.iter_local() {
            let distance = f64::from(wx - center).hypot(f64::from(wy - center));
            match state {
                CellState::Empty => empty.add(distance),
                CellState::Wall => wall.add(distance),
                CellState::Visited => visited.add(distance),
                CellState::Fog => {
                    if is_visible_from(window, (center, center), (wx, wy)) {
                        fog.add(distance);
                    }
                }
                CellState::Undefined => {}
            }
        }

        let mut features = Features::default();
        features[WeightIndex::Dist] = target.map_or(0.0, |target| candidate.distance(target));
        features[WeightIndex::NbEmpty] = empty.count;
        features[WeightIndex::NbWall] = wall.count;
        features[WeightIndex::NbFog] = fog.count;
        features[WeightIndex::NbVisited] = visited.count;
        features[WeightIndex::AvgDistEmpty] = empty.average(self.averaging);
        features[WeightIndex::AvgDistWall] = wall.average(self.averaging);
        features[WeightIndex::AvgDistFog] = fog.average(self.averaging);
        features[WeightIndex::AvgDistVisited] = visited.average(self.averaging);
        features[WeightIndex::DistFromEntity] = candidate.distance(agent);

        Some(features)
    }

    /// Interest of `candidate`; `-inf` when its window center is not Empty.
    pub fn score(
        &self,
        window: &Window,
        candidate: Position,
        target: Option<Position>,
        agent: Position,
    ) -> f64 {
        self.features(window, candidate, target, agent)
            .map_or(f64::NEG_INFINITY, |features| self.weights.dot(&features))
    }
}
