//! Per-agent fog-of-war memory.

use crate::env::MapOracle;
use crate::error::GridError;
use crate::fov::Window;
use crate::state::{CellState, Grid, MapDimensions, Position};

/// Accumulated knowledge of one agent.
///
/// Starts with Wall on the border and Fog everywhere else. Knowledge only
/// grows: a cell resolved to Empty or Wall never reverts to Fog, and the
/// agent's own cell is Visited after every merge.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MentalMap {
    cells: Grid<CellState>,
}

impl MentalMap {
    pub fn new(dimensions: MapDimensions) -> Result<Self, GridError> {
        let cells = Grid::from_fn(dimensions, |position| {
            if dimensions.is_border(position) {
                CellState::Wall
            } else {
                CellState::Fog
            }
        })?;
        Ok(Self { cells })
    }

    /// Folds one field-of-view window into the map.
    ///
    /// Only cells that are still Fog take the observed state; Fog
    /// observations never downgrade known cells. The agent's cell is then
    /// forced to Visited.
    pub fn merge(&mut self, window: &Window, agent: Position) {
        for (position, observed) in window.iter() {
            if let Some(known) = self.cells.get_mut(position)
                && *known == CellState::Fog
                && observed.is_resolved()
            {
                *known = observed;
            }
        }
        self.cells.set(agent, CellState::Visited);
    }

    pub fn grid(&self) -> &Grid<CellState> {
        &self.cells
    }

    pub fn fog_count(&self) -> usize {
        self.count(CellState::Fog)
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.cells().iter().filter(|cell| **cell == state).count()
    }

    /// Fraction of the map that is no longer Fog.
    pub fn revealed_ratio(&self) -> f64 {
        let total = self.cells.dimensions().area();
        1.0 - self.fog_count() as f64 / total as f64
    }
}

impl MapOracle for MentalMap {
    fn dimensions(&self) -> MapDimensions {
        self.cells.dimensions()
    }

    fn cell(&self, position: Position) -> Option<CellState> {
        self.cells.get(position).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::GridMap;
    use crate::fov::FieldOfView;

    #[test]
    fn starts_with_border_walls_and_fog() {
        let map = MentalMap::new(MapDimensions::new(4, 3)).unwrap();
        assert_eq!(map.cell(Position::new(0, 0)), Some(CellState::Wall));
        assert_eq!(map.cell(Position::new(3, 2)), Some(CellState::Wall));
        assert_eq!(map.cell(Position::new(1, 1)), Some(CellState::Fog));
        assert_eq!(map.fog_count(), 2);
    }

    #[test]
    fn merge_marks_agent_visited() {
        let world = GridMap::bordered(9, 9).unwrap();
        let mut mental = MentalMap::new(world.dimensions()).unwrap();
        let agent = Position::new(4, 4);
        let window = FieldOfView::new(3).compute(&world, agent);

        mental.merge(&window, agent);

        assert_eq!(mental.cell(agent), Some(CellState::Visited));
        assert_eq!(mental.cell(Position::new(5, 4)), Some(CellState::Empty));
        assert!(mental.fog_count() < 49);
    }

    #[test]
    fn merge_never_reverts_known_cells() {
        let world = GridMap::bordered(12, 12).unwrap();
        let mut mental = MentalMap::new(world.dimensions()).unwrap();
        let fov = FieldOfView::new(3);

        let mut previous = mental.clone();
        for x in 1..11 {
            let agent = Position::new(x, 5);
            mental.merge(&fov.compute(&world, agent), agent);

            for (position, before) in previous.grid().iter() {
                let after = mental.cell(position).unwrap();
                if *before != CellState::Fog {
                    assert_ne!(after, CellState::Fog, "{position} regressed to fog");
                }
                if *before == CellState::Visited {
                    assert_eq!(after, CellState::Visited);
                }
            }
            previous = mental.clone();
        }
    }

    #[test]
    fn fog_observations_are_ignored() {
        let mut mental = MentalMap::new(MapDimensions::new(5, 5)).unwrap();
        let agent = Position::new(2, 2);

        let mut seen = Window::new(agent, 1, CellState::Fog);
        seen.set(Position::new(3, 2), CellState::Empty);
        mental.merge(&seen, agent);
        assert_eq!(mental.cell(Position::new(3, 2)), Some(CellState::Empty));

        let blind = Window::new(Position::new(3, 2), 1, CellState::Fog);
        mental.merge(&blind, Position::new(3, 2));
        assert_eq!(mental.cell(Position::new(2, 2)), Some(CellState::Visited));
        assert_eq!(mental.cell(Position::new(3, 2)), Some(CellState::Visited));
        assert_eq!(mental.cell(Position::new(1, 1)), Some(CellState::Fog));
    }
}
