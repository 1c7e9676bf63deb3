//! The exploring agent: position, memory, and the route it is following.

use explorer_core::{FieldOfView, GridMap, MapDimensions, MentalMap, Path, Position};

use crate::api::Result;

#[derive(Clone, Debug)]
pub struct Agent {
    position: Position,
    mental_map: MentalMap,
    path: Path,
}

impl Agent {
    /// Agent at `position` with no knowledge beyond the map border.
    pub fn new(position: Position, dimensions: MapDimensions) -> Result<Self> {
        Ok(Self {
            position,
            mental_map: MentalMap::new(dimensions)?,
            path: Path::default(),
        })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn mental_map(&self) -> &MentalMap {
        &self.mental_map
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_route(&self) -> bool {
        !self.path.is_empty()
    }

    /// Looks around from the current position and merges what was seen.
    ///
    /// Returns how many Fog cells were resolved.
    pub fn observe(&mut self, map: &GridMap, fov: &FieldOfView) -> usize {
        let before = self.mental_map.fog_count();
        let window = fov.compute(map, self.position);
        self.mental_map.merge(&window, self.position);
        before.saturating_sub(self.mental_map.fog_count())
    }

    /// Replaces the current route. A leading waypoint equal to the current
    /// position is dropped.
    pub fn follow(&mut self, mut path: Path) {
        if path.peek() == Some(self.position) {
            path.pop();
        }
        self.path = path;
    }

    /// Moves onto the next waypoint, if any.
    pub fn advance(&mut self) -> Option<Position> {
        let next = self.path.pop()?;
        self.position = next;
        Some(next)
    }
}
