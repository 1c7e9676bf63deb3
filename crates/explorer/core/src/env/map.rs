use crate::error::GridError;
use crate::state::{CellState, Grid, MapDimensions, Position};

/// Read-only view over a grid of cell states.
///
/// Implemented by the ground-truth [`GridMap`] and by the agent's
/// [`MentalMap`](crate::MentalMap), so ray casting, path search and window
/// extraction can read either one.
pub trait MapOracle {
    fn dimensions(&self) -> MapDimensions;
    fn cell(&self, position: Position) -> Option<CellState>;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }
}

/// Ground-truth layout of one exploration episode.
///
/// Only contains [`CellState::Empty`] and [`CellState::Wall`]. Produced by a
/// map generator, read-only for the duration of an episode and replaced
/// wholesale when a new episode starts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridMap {
    cells: Grid<CellState>,
}

impl GridMap {
    /// Wraps a grid, rejecting anything other than Empty or Wall.
    pub fn new(cells: Grid<CellState>) -> Result<Self, GridError> {
        if let Some((position, state)) = cells
            .iter()
            .find(|(_, state)| !matches!(state, CellState::Empty | CellState::Wall))
        {
            return Err(GridError::InvalidTerrain {
                position,
                state: *state,
            });
        }
        Ok(Self { cells })
    }

    /// All-Empty interior surrounded by a Wall border.
    pub fn bordered(width: u32, height: u32) -> Result<Self, GridError> {
        let dimensions = MapDimensions::new(width, height);
        let cells = Grid::from_fn(dimensions, |position| {
            if dimensions.is_border(position) {
                CellState::Wall
            } else {
                CellState::Empty
            }
        })?;
        Ok(Self { cells })
    }

    /// Parses `#` (wall) and `.` (empty) rows, top row first.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        let dimensions = MapDimensions::new(width as u32, rows.len() as u32);
        let mut cells = Vec::with_capacity(dimensions.area());

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let actual = row.chars().count();
            if actual != width {
                return Err(GridError::RaggedRows {
                    row: y,
                    expected: width,
                    actual,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let position = Position::new(x as i32, y as i32);
                match glyph {
                    '#' => cells.push(CellState::Wall),
                    '.' => cells.push(CellState::Empty),
                    other => {
                        return Err(GridError::UnknownGlyph {
                            position,
                            glyph: other,
                        });
                    }
                }
            }
        }

        Ok(Self {
            cells: Grid::from_cells(dimensions, cells)?,
        })
    }

    pub fn grid(&self) -> &Grid<CellState> {
        &self.cells
    }

    pub fn is_empty_cell(&self, position: Position) -> bool {
        self.cells.get(position) == Some(&CellState::Empty)
    }

    pub fn empty_count(&self) -> usize {
        self.cells
            .cells()
            .iter()
            .filter(|state| **state == CellState::Empty)
            .count()
    }

    /// Finds an Empty cell near `origin` by scanning square rings of growing
    /// radius.
    ///
    /// Within the first ring that contains Empty cells, the last one in
    /// column-major scan order (x outer, y inner) is returned. `origin` may lie
    /// outside the map, which is how corners are snapped. Returns `None` only
    /// when the map has no Empty cell at all.
    pub fn nearest_empty(&self, origin: Position) -> Option<Position> {
        let dimensions = self.dimensions();
        let max_order = dimensions.width.max(dimensions.height) as i32
            + origin.x.abs().max(origin.y.abs());

        for order in 1..=max_order {
            let mut found = None;
            for x in (origin.x - order)..=(origin.x + order) {
                for y in (origin.y - order)..=(origin.y + order) {
                    let candidate = Position::new(x, y);
                    if self.is_empty_cell(candidate) {
                        found = Some(candidate);
                    }
                }
            }
            if found.is_some() {
                return found;
            }
        }
        None
    }
}

impl MapOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.cells.dimensions()
    }

    fn cell(&self, position: Position) -> Option<CellState> {
        self.cells.get(position).copied()
    }
}
