//! Cellular-automaton cave maps.

use explorer_core::{
    CellState, Grid, GridMap, MapDimensions, PcgRng, Position, RngOracle, compute_seed,
};

use crate::api::{Result, RuntimeError};

/// Stream separator for [`compute_seed`] when drawing terrain.
const TERRAIN_SEED_CONTEXT: u32 = 0x4341_5645;

/// Seeded cave generator.
///
/// 1. Wall border, Bernoulli(`wall_probability`) interior.
/// 2. Smoothing: a cell with fewer than 2 or at least 4 wall neighbors (of 8)
///    becomes Empty.
/// 3. Strengthening: a cell with at least 3 wall neighbors (of 4) becomes Wall.
///
/// Both passes update the grid in place, scanning x-major, so later cells see
/// the already-updated state of earlier ones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaveGenerator {
    pub width: u32,
    pub height: u32,
    pub wall_probability: f64,
    pub seed: u64,
}

impl CaveGenerator {
    pub const DEFAULT_WALL_PROBABILITY: f64 = 0.49;

    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        Self {
            width,
            height,
            wall_probability: Self::DEFAULT_WALL_PROBABILITY,
            seed,
        }
    }

    pub fn with_wall_probability(mut self, wall_probability: f64) -> Self {
        self.wall_probability = wall_probability;
        self
    }

    pub fn generate(&self) -> Result<GridMap> {
        if !(0.0..=1.0).contains(&self.wall_probability) {
            return Err(RuntimeError::invalid_config(
                "wall_probability",
                format!("{} is outside [0, 1]", self.wall_probability),
            ));
        }

        let dimensions = MapDimensions::new(self.width, self.height);
        let threshold = self.wall_probability * 100.0;
        let mut cells = Grid::from_fn(dimensions, |position| {
            if dimensions.is_border(position) {
                return CellState::Wall;
            }
            let index = dimensions.index_of(position).unwrap_or_default() as u64;
            let roll = PcgRng.roll_d100(compute_seed(self.seed, index, TERRAIN_SEED_CONTEXT));
            if f64::from(roll) <= threshold {
                CellState::Wall
            } else {
                CellState::Empty
            }
        })?;

        smooth(&mut cells);
        strengthen(&mut cells);

        Ok(GridMap::new(cells)?)
    }
}

fn interior(dimensions: MapDimensions) -> impl Iterator<Item = Position> {
    let width = dimensions.width as i32;
    let height = dimensions.height as i32;
    (1..width - 1).flat_map(move |x| (1..height - 1).map(move |y| Position::new(x, y)))
}

fn walls_at(cells: &Grid<CellState>, positions: impl IntoIterator<Item = Position>) -> usize {
    positions
        .into_iter()
        .filter(|position| cells.get(*position).is_some_and(|state| state.is_wall()))
        .count()
}

fn smooth(cells: &mut Grid<CellState>) {
    for position in interior(cells.dimensions()) {
        let around = (-1..=1)
            .flat_map(|dx| (-1..=1).map(move |dy| (dx, dy)))
            .filter(|&(dx, dy)| (dx, dy) != (0, 0))
            .map(|(dx, dy)| position.offset(dx, dy));
        let walls = walls_at(cells, around);
        if walls < 2 || walls >= 4 {
            cells.set(position, CellState::Empty);
        }
    }
}

fn strengthen(cells: &mut Grid<CellState>) {
    for position in interior(cells.dimensions()) {
        if walls_at(cells, position.neighbors4()) >= 3 {
            cells.set(position, CellState::Wall);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_is_wall_and_output_is_deterministic() {
        let generator = CaveGenerator::new(20, 15, 7);
        let first = generator.generate().unwrap();
        let second = generator.generate().unwrap();

        assert_eq!(first, second);
        let dimensions = first.grid().dimensions();
        for (position, state) in first.grid().iter() {
            if dimensions.is_border(position) {
                assert_eq!(*state, CellState::Wall, "{position}");
            }
        }
    }

    #[test]
    fn seeds_produce_different_caves() {
        let a = CaveGenerator::new(30, 30, 1).generate().unwrap();
        let b = CaveGenerator::new(30, 30, 2).generate().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn zero_probability_is_open_room() {
        let map = CaveGenerator::new(8, 6, 3)
            .with_wall_probability(0.0)
            .generate()
            .unwrap();
        assert_eq!(map.empty_count(), 6 * 4);
    }

    #[test]
    fn full_probability_is_smoothed_open() {
        // every interior cell starts as Wall with 8 wall neighbors, so the
        // smoothing pass clears it
        let map = CaveGenerator::new(8, 8, 3)
            .with_wall_probability(1.0)
            .generate()
            .unwrap();
        assert!(map.empty_count() > 0);
    }

    #[test]
    fn rejects_probability_out_of_range() {
        let error = CaveGenerator::new(8, 8, 0)
            .with_wall_probability(1.5)
            .generate()
            .unwrap_err();
        assert!(matches!(error, RuntimeError::InvalidConfig { .. }));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let error = CaveGenerator::new(0, 8, 0).generate().unwrap_err();
        assert!(matches!(error, RuntimeError::Grid(_)));
    }
}
