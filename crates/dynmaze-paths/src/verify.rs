//! Path validity checks for finished searches.

use std::fmt;

use dynmaze_core::{Cell, Maze};

use crate::traits::WeightedPather;

/// Why a path failed verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path has no cells.
    Empty,
    /// The first cell is not the start.
    WrongStart { expected: Cell, found: Cell },
    /// The last cell is not the goal.
    WrongEnd { expected: Cell, found: Cell },
    /// A cell lies outside the grid.
    OutOfBounds { index: usize, cell: Cell },
    /// Two consecutive cells are not 4-neighbours.
    NotContiguous { index: usize, from: Cell, to: Cell },
    /// Two consecutive cells are separated by a closed wall.
    Blocked { index: usize, from: Cell, to: Cell },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "path is empty"),
            Self::WrongStart { expected, found } => {
                write!(f, "path starts at {found}, expected {expected}")
            }
            Self::WrongEnd { expected, found } => {
                write!(f, "path ends at {found}, expected {expected}")
            }
            Self::OutOfBounds { index, cell } => {
                write!(f, "path cell #{index} {cell} is out of bounds")
            }
            Self::NotContiguous { index, from, to } => {
                write!(f, "path step #{index} {from} -> {to} is not contiguous")
            }
            Self::Blocked { index, from, to } => {
                write!(f, "path step #{index} {from} -> {to} crosses a wall")
            }
        }
    }
}

impl std::error::Error for PathError {}

/// Check that `path` walks from `start` to `goal` through open walls only.
pub fn verify_path(maze: &Maze, path: &[Cell], start: Cell, goal: Cell) -> Result<(), PathError> {
    let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
        return Err(PathError::Empty);
    };
    if first != start {
        return Err(PathError::WrongStart {
            expected: start,
            found: first,
        });
    }
    if last != goal {
        return Err(PathError::WrongEnd {
            expected: goal,
            found: last,
        });
    }
    for (index, &cell) in path.iter().enumerate() {
        if !maze.contains(cell) {
            return Err(PathError::OutOfBounds { index, cell });
        }
    }
    for (index, w) in path.windows(2).enumerate() {
        let (from, to) = (w[0], w[1]);
        if !from.is_adjacent(to) {
            return Err(PathError::NotContiguous { index, from, to });
        }
        if !maze.is_open(from, to).unwrap_or(false) {
            return Err(PathError::Blocked { index, from, to });
        }
    }
    Ok(())
}

/// Sum of edge costs along `path`.
pub fn path_cost<P: WeightedPather>(pather: &P, path: &[Cell]) -> i32 {
    path.windows(2).map(|w| pather.cost(w[0], w[1])).sum()
}
