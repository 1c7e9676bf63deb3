use crate::error::GridError;

/// Knowledge state of a single cell.
///
/// The same vocabulary is used for the ground-truth map (Empty / Wall only)
/// and for an agent's mental map (all four resolved states). `Undefined` only
/// appears inside freshly allocated windows before they are populated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Undefined,
    Empty,
    Wall,
    Fog,
    Visited,
}

impl CellState {
    /// Numeric code used by serialized maps.
    pub const fn code(self) -> i8 {
        match self {
            Self::Undefined => -1,
            Self::Empty => 0,
            Self::Wall => 1,
            Self::Fog => 2,
            Self::Visited => 3,
        }
    }

    /// Cells an agent may step on.
    pub const fn is_traversable(self) -> bool {
        matches!(self, Self::Empty | Self::Visited)
    }

    /// True once the cell's real content is known.
    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Empty | Self::Wall | Self::Visited)
    }

    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }

    /// Text glyph used by fixtures and diagnostic dumps.
    pub const fn glyph(self) -> char {
        match self {
            Self::Undefined => ' ',
            Self::Empty => '.',
            Self::Wall => '#',
            Self::Fog => '~',
            Self::Visited => 'o',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            ' ' => Some(Self::Undefined),
            '.' => Some(Self::Empty),
            '#' => Some(Self::Wall),
            '~' => Some(Self::Fog),
            'o' => Some(Self::Visited),
            _ => None,
        }
    }
}

impl TryFrom<i8> for CellState {
    type Error = GridError;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        match code {
            -1 => Ok(Self::Undefined),
            0 => Ok(Self::Empty),
            1 => Ok(Self::Wall),
            2 => Ok(Self::Fog),
            3 => Ok(Self::Visited),
            other => Err(GridError::UnknownCellCode(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for state in [
            CellState::Undefined,
            CellState::Empty,
            CellState::Wall,
            CellState::Fog,
            CellState::Visited,
        ] {
            assert_eq!(CellState::try_from(state.code()), Ok(state));
        }
        assert_eq!(
            CellState::try_from(7),
            Err(GridError::UnknownCellCode(7))
        );
    }

    #[test]
    fn only_empty_and_visited_are_traversable() {
        assert!(CellState::Empty.is_traversable());
        assert!(CellState::Visited.is_traversable());
        assert!(!CellState::Wall.is_traversable());
        assert!(!CellState::Fog.is_traversable());
        assert!(!CellState::Undefined.is_traversable());
    }
}
