use dynmaze_core::{Cell, Maze};

use crate::distance::manhattan;

/// Minimal pathfinding interface: neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `c` into `buf`. The caller clears `buf` before calling.
    ///
    /// Search tie-breaking follows the order neighbours are appended in.
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Cell, to: Cell) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Cell, to: Cell) -> i32;
}

impl Pather for Maze {
    #[inline]
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>) {
        self.open_neighbors_into(c, buf);
    }
}

impl WeightedPather for Maze {
    #[inline]
    fn cost(&self, _from: Cell, _to: Cell) -> i32 {
        1
    }
}

impl AstarPather for Maze {
    #[inline]
    fn estimate(&self, from: Cell, to: Cell) -> i32 {
        manhattan(from, to)
    }
}

/// A pather that keeps the topology of `inner` but charges edges through a
/// caller-supplied cost function.
///
/// The Manhattan estimate stays admissible as long as every cost is at
/// least 1.
pub struct CustomCost<'a, P, F> {
    inner: &'a P,
    cost: F,
}

impl<'a, P, F> CustomCost<'a, P, F>
where
    P: Pather,
    F: Fn(Cell, Cell) -> i32,
{
    pub fn new(inner: &'a P, cost: F) -> Self {
        Self { inner, cost }
    }
}

impl<P, F> Pather for CustomCost<'_, P, F>
where
    P: Pather,
    F: Fn(Cell, Cell) -> i32,
{
    #[inline]
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>) {
        self.inner.neighbors(c, buf);
    }
}

impl<P, F> WeightedPather for CustomCost<'_, P, F>
where
    P: Pather,
    F: Fn(Cell, Cell) -> i32,
{
    #[inline]
    fn cost(&self, from: Cell, to: Cell) -> i32 {
        (self.cost)(from, to)
    }
}

impl<P, F> AstarPather for CustomCost<'_, P, F>
where
    P: Pather,
    F: Fn(Cell, Cell) -> i32,
{
    #[inline]
    fn estimate(&self, from: Cell, to: Cell) -> i32 {
        manhattan(from, to)
    }
}
