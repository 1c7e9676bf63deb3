//! Scenario setup: ground-truth map plus start and goal.
//!
//! Start and goal are snapped to the nearest Empty cells of the top-left and
//! bottom-right corners, so any map with at least one Empty cell yields a
//! scenario.

mod generator;

pub use generator::CaveGenerator;

use explorer_core::{GridMap, MapOracle, Position};

use crate::api::{Result, RuntimeError};

/// Map and endpoints for one episode.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    pub map: GridMap,
    pub start: Position,
    pub goal: Position,
}

impl Scenario {
    /// Creates a scenario with explicit endpoints.
    pub fn new(map: GridMap, start: Position, goal: Position) -> Result<Self> {
        for (field, position) in [("start", start), ("goal", goal)] {
            if !map.is_empty_cell(position) {
                return Err(RuntimeError::invalid_config(
                    field,
                    format!("{position} is not an empty cell"),
                ));
            }
        }
        Ok(Self { map, start, goal })
    }

    /// Snaps start from `(0, 0)` and goal from `(width - 1, height - 1)`.
    pub fn from_map(map: GridMap) -> Result<Self> {
        let dimensions = map.dimensions();
        let far_corner = Position::new(dimensions.width as i32 - 1, dimensions.height as i32 - 1);

        let start = map
            .nearest_empty(Position::ORIGIN)
            .ok_or(RuntimeError::NoEmptyCell)?;
        let goal = map
            .nearest_empty(far_corner)
            .ok_or(RuntimeError::NoEmptyCell)?;

        tracing::debug!(%start, %goal, "scenario endpoints snapped");
        Ok(Self { map, start, goal })
    }

    pub fn generate(generator: &CaveGenerator) -> Result<Self> {
        Self::from_map(generator.generate()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_snap_to_corners() {
        let map = GridMap::bordered(6, 5).unwrap();
        let scenario = Scenario::from_map(map).unwrap();
        assert_eq!(scenario.start, Position::new(1, 1));
        assert_eq!(scenario.goal, Position::new(4, 3));
    }

    #[test]
    fn all_wall_map_has_no_scenario() {
        let map = GridMap::from_rows(&["###", "###", "###"]).unwrap();
        assert!(matches!(
            Scenario::from_map(map),
            Err(RuntimeError::NoEmptyCell)
        ));
    }

    #[test]
    fn explicit_endpoints_must_be_empty() {
        let map = GridMap::bordered(5, 5).unwrap();
        let error = Scenario::new(map, Position::new(0, 0), Position::new(2, 2)).unwrap_err();
        assert!(matches!(error, RuntimeError::InvalidConfig { field: "start", .. }));
    }

    #[test]
    fn generated_scenario_endpoints_are_empty() {
        let scenario = Scenario::generate(&CaveGenerator::new(24, 24, 11)).unwrap();
        assert!(scenario.map.is_empty_cell(scenario.start));
        assert!(scenario.map.is_empty_cell(scenario.goal));
    }
}
