//! Angular ray casting from an observer cell.
//!
//! Rays are swept around the observer at a fixed angular step and marched
//! outward at a fixed distance step. A ray stops at the first Wall it hits;
//! other rays keep going. The result is an approximately circular,
//! wall-occluded region rather than exact shadow casting. Cells that no ray
//! sampled remain [`CellState::Fog`].

use std::f64::consts::TAU;

use crate::config::ExplorerConfig;
use crate::env::MapOracle;
use crate::state::{CellState, Position};

/// Square working buffer of side `2 * range + 1` centered on an absolute cell.
///
/// Local coordinates `(wx, wy)` map to the absolute cell
/// `center + (wx - range, wy - range)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    center: Position,
    range: u32,
    cells: Vec<CellState>,
}

impl Window {
    pub fn new(center: Position, range: u32, fill: CellState) -> Self {
        let side = 2 * range as usize + 1;
        Self {
            center,
            range,
            cells: vec![fill; side * side],
        }
    }

    pub fn center(&self) -> Position {
        self.center
    }

    pub fn range(&self) -> u32 {
        self.range
    }

    pub fn side(&self) -> usize {
        2 * self.range as usize + 1
    }

    fn local_index(&self, wx: i32, wy: i32) -> Option<usize> {
        let side = self.side() as i32;
        if wx < 0 || wy < 0 || wx >= side || wy >= side {
            return None;
        }
        Some(wy as usize * side as usize + wx as usize)
    }

    /// State at local window coordinates.
    pub fn get_local(&self, wx: i32, wy: i32) -> Option<CellState> {
        self.local_index(wx, wy)
            .and_then(|index| self.cells.get(index).copied())
    }

    pub fn set_local(&mut self, wx: i32, wy: i32, state: CellState) -> bool {
        match self
            .local_index(wx, wy)
            .and_then(|index| self.cells.get_mut(index))
        {
            Some(cell) => {
                *cell = state;
                true
            }
            None => false,
        }
    }

    /// State at an absolute map position, if it falls inside the window.
    pub fn get(&self, position: Position) -> Option<CellState> {
        let range = self.range as i32;
        self.get_local(
            position.x - self.center.x + range,
            position.y - self.center.y + range,
        )
    }

    pub fn set(&mut self, position: Position, state: CellState) -> bool {
        let range = self.range as i32;
        self.set_local(
            position.x - self.center.x + range,
            position.y - self.center.y + range,
            state,
        )
    }

    pub fn center_state(&self) -> CellState {
        let range = self.range as i32;
        self.get_local(range, range).unwrap_or_default()
    }

    /// Absolute position encoded by local window coordinates.
    pub fn absolute(&self, wx: i32, wy: i32) -> Position {
        let range = self.range as i32;
        self.center.offset(wx - range, wy - range)
    }

    /// Iterates `(local x, local y, state)` in row-major order.
    pub fn iter_local(&self) -> impl Iterator<Item = (i32, i32, CellState)> + '_ {
        let side = self.side();
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, state)| ((index % side) as i32, (index / side) as i32, *state))
    }

    /// Iterates `(absolute position, state)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        self.iter_local()
            .map(|(wx, wy, state)| (self.absolute(wx, wy), state))
    }
}

/// Ray-casting field of view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldOfView {
    pub vision_range: u32,
    pub angle_step: f64,
    pub distance_step: f64,
}

impl FieldOfView {
    pub fn new(vision_range: u32) -> Self {
        Self {
            vision_range,
            angle_step: ExplorerConfig::FOV_ANGLE_STEP,
            distance_step: ExplorerConfig::FOV_DISTANCE_STEP,
        }
    }

    pub fn from_config(config: &ExplorerConfig) -> Self {
        Self::new(config.vision_range)
    }

    /// Casts rays from `observer` over `map` and returns what was seen.
    ///
    /// Every window cell starts as Fog. Each sample point is truncated to a
    /// cell, bounds-checked against the map and written into the window; when
    /// several rays sample the same cell the last write wins. Out-of-map
    /// samples are skipped without stopping the ray.
    pub fn compute<M>(&self, map: &M, observer: Position) -> Window
    where
        M: MapOracle + ?Sized,
    {
        let mut window = Window::new(observer, self.vision_range, CellState::Fog);
        let dimensions = map.dimensions();
        let range = f64::from(self.vision_range);
        let width = f64::from(dimensions.width);
        let height = f64::from(dimensions.height);
        let origin_x = f64::from(observer.x);
        let origin_y = f64::from(observer.y);

        for angle in steps(self.angle_step, TAU) {
            let (sin, cos) = angle.sin_cos();

            for distance in steps(self.distance_step, range) {
                let dx = distance * cos;
                let dy = distance * sin;
                let sample_x = origin_x + dx;
                let sample_y = origin_y + dy;

                if sample_x < 0.0 || sample_y < 0.0 || sample_x >= width || sample_y >= height {
                    continue;
                }

                let cell = Position::new(sample_x.floor() as i32, sample_y.floor() as i32);
                let Some(state) = map.cell(cell) else {
                    continue;
                };

                let wx = (range + dx).floor() as i32;
                let wy = (range + dy).floor() as i32;
                window.set_local(wx, wy, state);

                if state.is_wall() {
                    break;
                }
            }
        }

        window
    }
}

/// `0, step, 2*step, ...` strictly below `limit`.
fn steps(step: f64, limit: f64) -> impl Iterator<Item = f64> {
    (0u32..)
        .map(move |i| f64::from(i) * step)
        .take_while(move |value| *value < limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::GridMap;

    #[test]
    fn observer_cell_is_always_seen() {
        let map = GridMap::bordered(7, 7).unwrap();
        let window = FieldOfView::new(3).compute(&map, Position::new(3, 3));
        assert_eq!(window.center_state(), CellState::Empty);
        assert_eq!(window.side(), 7);
    }

    #[test]
    fn open_room_is_revealed_around_observer() {
        let map = GridMap::bordered(11, 11).unwrap();
        let observer = Position::new(5, 5);
        let window = FieldOfView::new(4).compute(&map, observer);

        for position in observer.neighbors4() {
            assert_eq!(window.get(position), Some(CellState::Empty));
        }
        assert_eq!(window.get(Position::new(8, 5)), Some(CellState::Empty));
        // Corners of the square window lie outside the vision circle.
        assert_eq!(window.get_local(0, 0), Some(CellState::Fog));
    }

    #[test]
    fn wall_column_occludes_cells_behind_it() {
        let map = GridMap::from_rows(&[
            "#########",
            "#..#....#",
            "#..#....#",
            "#..#....#",
            "#..#....#",
            "#..#....#",
            "#..#....#",
            "#..#....#",
            "#########",
        ])
        .unwrap();
        let observer = Position::new(1, 4);
        let window = FieldOfView::new(6).compute(&map, observer);

        assert_eq!(window.get(Position::new(3, 4)), Some(CellState::Wall));
        assert_eq!(window.get(Position::new(5, 4)), Some(CellState::Fog));
        assert_eq!(window.get(Position::new(4, 4)), Some(CellState::Fog));
    }

    #[test]
    fn samples_outside_the_map_are_skipped() {
        let map = GridMap::bordered(3, 3).unwrap();
        let window = FieldOfView::new(4).compute(&map, Position::new(1, 1));
        // Absolute (-2, 1) is outside the map and never written.
        assert_eq!(window.get(Position::new(-2, 1)), Some(CellState::Fog));
        assert_eq!(window.get(Position::new(0, 1)), Some(CellState::Wall));
    }

    #[test]
    fn window_coordinates_round_trip() {
        let window = Window::new(Position::new(10, 4), 2, CellState::Undefined);
        let absolute = window.absolute(0, 4);
        assert_eq!(absolute, Position::new(8, 6));
        assert_eq!(window.get(absolute), Some(CellState::Undefined));
        assert_eq!(window.get(Position::new(13, 4)), None);
    }
}
