use crate::error::GridError;

use super::{MapDimensions, Position};

/// Dense row-major 2D storage.
///
/// All accessors are bounds-checked: reads outside the grid return `None` and
/// writes outside the grid are ignored.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<T> {
    dimensions: MapDimensions,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `fill`.
    pub fn filled(dimensions: MapDimensions, fill: T) -> Result<Self, GridError> {
        if dimensions.area() == 0 {
            return Err(GridError::EmptyDimensions(dimensions));
        }
        Ok(Self {
            dimensions,
            cells: vec![fill; dimensions.area()],
        })
    }

    /// Creates a grid whose cells are produced by `f(position)`.
    pub fn from_fn(
        dimensions: MapDimensions,
        mut f: impl FnMut(Position) -> T,
    ) -> Result<Self, GridError> {
        if dimensions.area() == 0 {
            return Err(GridError::EmptyDimensions(dimensions));
        }
        let cells = (0..dimensions.area())
            .map(|index| f(dimensions.position_of(index)))
            .collect();
        Ok(Self { dimensions, cells })
    }
}

impl<T> Grid<T> {
    /// Wraps an existing row-major buffer.
    pub fn from_cells(dimensions: MapDimensions, cells: Vec<T>) -> Result<Self, GridError> {
        if dimensions.area() == 0 {
            return Err(GridError::EmptyDimensions(dimensions));
        }
        if cells.len() != dimensions.area() {
            return Err(GridError::DimensionMismatch {
                dimensions,
                expected: dimensions.area(),
                actual: cells.len(),
            });
        }
        Ok(Self { dimensions, cells })
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    pub fn get(&self, position: Position) -> Option<&T> {
        self.dimensions
            .index_of(position)
            .and_then(|index| self.cells.get(index))
    }

    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        self.dimensions
            .index_of(position)
            .and_then(|index| self.cells.get_mut(index))
    }

    /// Writes `value` at `position`. Returns false if out of bounds.
    pub fn set(&mut self, position: Position, value: T) -> bool {
        match self.get_mut(position) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Iterates over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        let dimensions = self.dimensions;
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (dimensions.position_of(index), cell))
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Row `y` as a slice, or `None` when out of bounds.
    pub fn row(&self, y: u32) -> Option<&[T]> {
        if y >= self.dimensions.height {
            return None;
        }
        let width = self.dimensions.width as usize;
        let start = y as usize * width;
        self.cells.get(start..start + width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_buffers() {
        let dims = MapDimensions::new(3, 2);
        let err = Grid::from_cells(dims, vec![0u8; 5]).unwrap_err();
        assert_eq!(
            err,
            GridError::DimensionMismatch {
                dimensions: dims,
                expected: 6,
                actual: 5
            }
        );
        assert!(Grid::filled(MapDimensions::new(0, 4), 0u8).is_err());
    }

    #[test]
    fn out_of_bounds_access_is_ignored() {
        let mut grid = Grid::filled(MapDimensions::new(2, 2), 1u8).unwrap();
        assert!(!grid.set(Position::new(2, 0), 9));
        assert_eq!(grid.get(Position::new(-1, 0)), None);
        assert!(grid.set(Position::new(1, 1), 9));
        assert_eq!(grid.get(Position::new(1, 1)), Some(&9));
        assert_eq!(grid.row(1), Some(&[1u8, 9][..]));
    }
}
