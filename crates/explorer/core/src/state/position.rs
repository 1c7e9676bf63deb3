use std::fmt;

use arrayvec::ArrayVec;

/// Discrete grid position expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The four orthogonal neighbours in the order left, right, up, down.
    ///
    /// No bounds checking is done here; callers filter with
    /// [`MapDimensions::contains`].
    pub fn neighbors4(self) -> ArrayVec<Position, 4> {
        let mut neighbors = ArrayVec::new();
        neighbors.push(self.offset(-1, 0));
        neighbors.push(self.offset(1, 0));
        neighbors.push(self.offset(0, -1));
        neighbors.push(self.offset(0, 1));
        neighbors
    }

    pub fn distance_squared(self, other: Position) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx * dx + dy * dy
    }

    /// Straight-line (Euclidean) distance.
    pub fn distance(self, other: Position) -> f64 {
        self.distance_squared(other).sqrt()
    }

    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True when `other` is exactly one orthogonal step away.
    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Width and height of a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as i64) < self.width as i64
            && (position.y as i64) < self.height as i64
    }

    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major index of `position`, or `None` when out of bounds.
    pub fn index_of(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        Some(position.y as usize * self.width as usize + position.x as usize)
    }

    pub fn position_of(&self, index: usize) -> Position {
        let width = self.width as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }

    /// True for cells on the outermost ring.
    pub fn is_border(&self, position: Position) -> bool {
        self.contains(position)
            && (position.x == 0
                || position.y == 0
                || position.x as i64 == self.width as i64 - 1
                || position.y as i64 == self.height as i64 - 1)
    }
}
