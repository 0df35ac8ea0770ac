//! The grid graph: an `H x W` cell set plus the open/closed state of every
//! wall between orthogonally adjacent cells.
//!
//! Walls are stored in two flat row-major tables. `east[i]` is the edge
//! between cell `i` and its right neighbour, `south[i]` the edge between
//! cell `i` and the cell below. Slots on the last column (east) and last
//! row (south) do not correspond to any edge and stay `false`.

use std::fmt;

use crate::error::MazeError;
use crate::geom::{Cell, Dims};

/// Which wall table an edge lives in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Axis {
    East,
    South,
}

/// An undirected grid graph with a designated start and goal.
///
/// A freshly created maze has every wall closed. Generators carve it into
/// a perfect maze; the race mutator may later open or close single walls.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMaze"))]
pub struct Maze {
    dims: Dims,
    start: Cell,
    goal: Cell,
    east: Vec<bool>,
    south: Vec<bool>,
}

/// Unchecked wire form of [`Maze`]; every field is validated before a
/// `Maze` is built from it.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMaze {
    dims: Dims,
    start: Cell,
    goal: Cell,
    east: Vec<bool>,
    south: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMaze> for Maze {
    type Error = MazeError;

    fn try_from(raw: RawMaze) -> Result<Self, Self::Error> {
        let mut maze = Maze::new(raw.dims.height, raw.dims.width)?;
        for table in [&raw.east, &raw.south] {
            if table.len() != maze.len() {
                return Err(MazeError::WallTableSize {
                    expected: maze.len(),
                    found: table.len(),
                });
            }
        }
        maze.set_start(raw.start)?;
        maze.set_goal(raw.goal)?;
        for (idx, cell) in raw.dims.iter().enumerate() {
            if raw.east[idx] {
                maze.set_open(cell, cell.shift(0, 1), true)?;
            }
            if raw.south[idx] {
                maze.set_open(cell, cell.shift(1, 0), true)?;
            }
        }
        Ok(maze)
    }
}

impl Maze {
    /// Create a fully walled `height x width` maze with start at the top-left
    /// corner and goal at the bottom-right corner.
    pub fn new(height: i32, width: i32) -> Result<Self, MazeError> {
        let dims = Dims::new(height, width);
        if dims.is_empty() {
            return Err(MazeError::EmptyGrid { dims });
        }
        let len = dims.len();
        Ok(Self {
            dims,
            start: dims.first(),
            goal: dims.last(),
            east: vec![false; len],
            south: vec![false; len],
        })
    }

    /// Grid dimensions.
    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.dims.height
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.dims.width
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.dims.len()
    }

    /// Always false: a maze has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    #[inline]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// Move the start cell.
    pub fn set_start(&mut self, c: Cell) -> Result<(), MazeError> {
        self.check(c)?;
        self.start = c;
        Ok(())
    }

    /// Move the goal cell.
    pub fn set_goal(&mut self, c: Cell) -> Result<(), MazeError> {
        self.check(c)?;
        self.goal = c;
        Ok(())
    }

    /// Whether `c` is inside the grid.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        self.dims.contains(c)
    }

    /// Fail with [`MazeError::OutOfBounds`] if `c` is outside the grid.
    #[inline]
    pub fn check(&self, c: Cell) -> Result<(), MazeError> {
        if self.dims.contains(c) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                cell: c,
                dims: self.dims,
            })
        }
    }

    /// Locate the wall slot for edge `a`-`b`. Bounds are checked first, then
    /// adjacency.
    fn slot(&self, a: Cell, b: Cell) -> Result<(Axis, usize), MazeError> {
        self.check(a)?;
        self.check(b)?;
        let (axis, owner) = if b == a.shift(0, 1) {
            (Axis::East, a)
        } else if b == a.shift(0, -1) {
            (Axis::East, b)
        } else if b == a.shift(1, 0) {
            (Axis::South, a)
        } else if b == a.shift(-1, 0) {
            (Axis::South, b)
        } else {
            return Err(MazeError::NotAdjacent { a, b });
        };
        let idx = self
            .dims
            .index(owner)
            .ok_or(MazeError::OutOfBounds {
                cell: owner,
                dims: self.dims,
            })?;
        Ok((axis, idx))
    }

    /// True iff `a` and `b` are adjacent and the wall between them is open.
    ///
    /// Non-adjacent in-bounds pairs are simply not connected and yield
    /// `Ok(false)`.
    pub fn is_open(&self, a: Cell, b: Cell) -> Result<bool, MazeError> {
        match self.slot(a, b) {
            Ok((Axis::East, i)) => Ok(self.east[i]),
            Ok((Axis::South, i)) => Ok(self.south[i]),
            Err(MazeError::NotAdjacent { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Open or close the wall between `a` and `b`.
    pub fn set_open(&mut self, a: Cell, b: Cell, open: bool) -> Result<(), MazeError> {
        match self.slot(a, b)? {
            (Axis::East, i) => self.east[i] = open,
            (Axis::South, i) => self.south[i] = open,
        }
        Ok(())
    }

    /// Edge lookup that treats any error as a closed wall.
    #[inline]
    fn open_unchecked(&self, a: Cell, b: Cell) -> bool {
        match self.slot(a, b) {
            Ok((Axis::East, i)) => self.east[i],
            Ok((Axis::South, i)) => self.south[i],
            Err(_) => false,
        }
    }

    /// Append the open neighbours of `c` to `buf` in up, right, down, left
    /// order. Out-of-bounds `c` yields nothing.
    pub fn open_neighbors_into(&self, c: Cell, buf: &mut Vec<Cell>) {
        if !self.contains(c) {
            return;
        }
        for n in c.neighbors_4() {
            if self.contains(n) && self.open_unchecked(c, n) {
                buf.push(n);
            }
        }
    }

    /// The open neighbours of `c` in up, right, down, left order.
    pub fn neighbors(&self, c: Cell) -> Result<Vec<Cell>, MazeError> {
        self.check(c)?;
        let mut buf = Vec::with_capacity(4);
        self.open_neighbors_into(c, &mut buf);
        Ok(buf)
    }

    /// Number of open walls around `c`.
    pub fn degree(&self, c: Cell) -> Result<usize, MazeError> {
        Ok(self.neighbors(c)?.len())
    }

    /// Total number of open edges.
    pub fn open_edge_count(&self) -> usize {
        self.east.iter().chain(self.south.iter()).filter(|&&o| o).count()
    }

    /// Every open edge as `(a, b)` with `a < b`, in row-major order of `a`.
    pub fn open_edges(&self) -> Vec<(Cell, Cell)> {
        let mut edges = Vec::with_capacity(self.len());
        for (i, c) in self.dims.iter().enumerate() {
            if self.east[i] {
                edges.push((c, c.shift(0, 1)));
            }
            if self.south[i] {
                edges.push((c, c.shift(1, 0)));
            }
        }
        edges
    }

    /// Close every wall.
    pub fn close_all(&mut self) {
        self.east.fill(false);
        self.south.fill(false);
    }

    /// Packed edge state, one byte per cell: bit 0 east wall open, bit 1
    /// south wall open. Two mazes with equal bytes have identical walls.
    pub fn edge_bytes(&self) -> Vec<u8> {
        self.east
            .iter()
            .zip(self.south.iter())
            .map(|(&e, &s)| u8::from(e) | (u8::from(s) << 1))
            .collect()
    }

    /// Render as ASCII with an optional path overlay.
    ///
    /// The output is a `(2H+1) x (2W+1)` character grid: `#` walls, space
    /// passages, `S` start, `G` goal and `.` for path cells and the open
    /// walls between consecutive path cells.
    pub fn render_with_path(&self, path: &[Cell]) -> String {
        let rows = (2 * self.height() + 1) as usize;
        let cols = (2 * self.width() + 1) as usize;
        let mut canvas = vec![vec!['#'; cols]; rows];

        for (i, c) in self.dims.iter().enumerate() {
            let (r, k) = (2 * c.row as usize + 1, 2 * c.col as usize + 1);
            canvas[r][k] = ' ';
            if self.east[i] {
                canvas[r][k + 1] = ' ';
            }
            if self.south[i] {
                canvas[r + 1][k] = ' ';
            }
        }

        for (i, &c) in path.iter().enumerate() {
            if !self.contains(c) {
                continue;
            }
            let (r, k) = (2 * c.row + 1, 2 * c.col + 1);
            canvas[r as usize][k as usize] = '.';
            if let Some(&next) = path.get(i + 1) {
                if self.is_open(c, next).unwrap_or(false) {
                    let wr = (r + next.row - c.row) as usize;
                    let wk = (k + next.col - c.col) as usize;
                    canvas[wr][wk] = '.';
                }
            }
        }

        for (c, ch) in [(self.start, 'S'), (self.goal, 'G')] {
            canvas[2 * c.row as usize + 1][2 * c.col as usize + 1] = ch;
        }

        let mut out = String::with_capacity(rows * (cols + 1));
        for line in canvas {
            out.extend(line);
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with_path(&[]))
    }
}
