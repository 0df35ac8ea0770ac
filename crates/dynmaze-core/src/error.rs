//! Error types for grid graph operations.

use std::fmt;

use crate::geom::{Cell, Dims};

/// Structural errors raised by [`Maze`](crate::Maze) queries and edits.
///
/// These are programming or input errors: they surface immediately and are
/// never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// A cell lies outside `[0, height) x [0, width)`.
    OutOfBounds { cell: Cell, dims: Dims },
    /// Two cells that are not 4-neighbours were used as an edge.
    NotAdjacent { a: Cell, b: Cell },
    /// A grid with a zero or negative dimension was requested.
    EmptyGrid { dims: Dims },
    /// A wall table does not hold exactly one slot per cell.
    WallTableSize { expected: usize, found: usize },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { cell, dims } => {
                write!(f, "cell {cell} out of bounds for {dims} grid")
            }
            Self::NotAdjacent { a, b } => {
                write!(f, "cells {a} and {b} are not adjacent")
            }
            Self::EmptyGrid { dims } => write!(f, "grid must have at least one cell, got {dims}"),
            Self::WallTableSize { expected, found } => {
                write!(f, "wall table has {found} slots, expected {expected}")
            }
        }
    }
}

impl std::error::Error for MazeError {}
