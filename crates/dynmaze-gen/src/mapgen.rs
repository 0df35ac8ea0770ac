//! Perfect maze generation.
//!
//! Provides two spanning-tree carvers, both driven by explicit worklists so
//! stack usage does not grow with the grid:
//! - **Randomized Prim's**: grows one carved region from a root cell by
//!   opening a uniformly random frontier wall at a time.
//! - **Randomized Kruskal's**: shuffles every wall and opens those that
//!   join two disjoint regions.

use std::fmt;
use std::str::FromStr;

use dynmaze_core::{Cell, Maze, MazeError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngExt, SeedableRng};

use crate::unionfind::UnionFind;

/// Which carving algorithm to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Randomized Prim's, rooted at a caller-supplied cell.
    #[default]
    Prim,
    /// Randomized Kruskal's over all walls.
    Kruskal,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Prim => f.write_str("prim"),
            Algorithm::Kruskal => f.write_str("kruskal"),
        }
    }
}

/// Error returned when parsing an unknown generator name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(pub String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown maze generator: {} (expected prim or kruskal)",
            self.0
        )
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prim" => Ok(Algorithm::Prim),
            "kruskal" => Ok(Algorithm::Kruskal),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Maze generator operating on a [`Maze`].
pub struct MazeGen<R: Rng> {
    pub rng: R,
    pub maze: Maze,
}

impl MazeGen<StdRng> {
    /// Create a generator whose output is fully determined by `seed`.
    pub fn seeded(maze: Maze, seed: u64) -> Self {
        Self::with_maze(maze, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MazeGen<R> {
    /// Create a new MazeGen with the given maze.
    pub fn with_maze(maze: Maze, rng: R) -> Self {
        Self { rng, maze }
    }

    /// Carve with `algorithm`. Prim's is rooted at the maze's start cell.
    ///
    /// Returns the number of walls opened.
    pub fn generate(&mut self, algorithm: Algorithm) -> Result<usize, MazeError> {
        match algorithm {
            Algorithm::Prim => {
                let root = self.maze.start();
                self.prim(root)
            }
            Algorithm::Kruskal => self.kruskal(),
        }
    }

    /// Carve a perfect maze with randomized Prim's, starting from `root`.
    ///
    /// All walls are closed first. The frontier holds `(carved, uncarved)`
    /// wall candidates; each round removes one uniformly at random and opens
    /// it if its far cell is still uncarved. Every cell is carved exactly
    /// once, so exactly `H*W - 1` walls end up open.
    ///
    /// Returns the number of walls opened.
    pub fn prim(&mut self, root: Cell) -> Result<usize, MazeError> {
        self.maze.check(root)?;
        self.maze.close_all();
        let dims = self.maze.dims();

        let mut carved = vec![false; dims.len()];
        let mut frontier: Vec<(Cell, Cell)> = Vec::new();
        let mut opened = 0usize;

        let push_walls = |from: Cell, carved: &[bool], frontier: &mut Vec<(Cell, Cell)>| {
            for n in from.neighbors_4() {
                if let Some(ni) = dims.index(n) {
                    if !carved[ni] {
                        frontier.push((from, n));
                    }
                }
            }
        };

        if let Some(ri) = dims.index(root) {
            carved[ri] = true;
        }
        push_walls(root, &carved, &mut frontier);

        while !frontier.is_empty() {
            let pick = self.rng.random_range(0..frontier.len());
            let (from, to) = frontier.swap_remove(pick);
            let Some(ti) = dims.index(to) else {
                continue;
            };
            if carved[ti] {
                continue;
            }
            carved[ti] = true;
            self.maze.set_open(from, to, true)?;
            opened += 1;
            push_walls(to, &carved, &mut frontier);
        }

        log::debug!("prim carved {} from {root}: {opened} walls opened", dims);
        Ok(opened)
    }

    /// Carve a perfect maze with randomized Kruskal's.
    ///
    /// Every interior wall is listed in row-major order, shuffled, then
    /// opened whenever it separates two regions not yet joined.
    ///
    /// Returns the number of walls opened.
    pub fn kruskal(&mut self) -> Result<usize, MazeError> {
        self.maze.close_all();
        let dims = self.maze.dims();

        let mut walls: Vec<(Cell, Cell)> = Vec::with_capacity(2 * dims.len());
        for c in dims.iter() {
            for n in [c.shift(0, 1), c.shift(1, 0)] {
                if dims.contains(n) {
                    walls.push((c, n));
                }
            }
        }
        walls.shuffle(&mut self.rng);

        let mut sets = UnionFind::new(dims.len());
        let mut opened = 0usize;
        for (a, b) in walls {
            let (Some(ai), Some(bi)) = (dims.index(a), dims.index(b)) else {
                continue;
            };
            if sets.union(ai, bi) {
                self.maze.set_open(a, b, true)?;
                opened += 1;
            }
        }

        log::debug!("kruskal carved {}: {opened} walls opened", dims);
        Ok(opened)
    }

    /// Consume the generator, returning the carved maze.
    pub fn into_maze(self) -> Maze {
        self.maze
    }
}

/// Generate a `height x width` perfect maze.
///
/// With `Some(seed)` the result is reproducible; with `None` a fresh seed is
/// drawn. Returns the maze together with the seed actually used.
pub fn generate(
    height: i32,
    width: i32,
    seed: Option<u64>,
    algorithm: Algorithm,
) -> Result<(Maze, u64), MazeError> {
    let maze = Maze::new(height, width)?;
    let seed = seed.unwrap_or_else(rand::random);
    let mut mg = MazeGen::seeded(maze, seed);
    mg.generate(algorithm)?;
    Ok((mg.into_maze(), seed))
}

/// Whether the open walls of `maze` form a spanning tree: exactly
/// `H*W - 1` open edges and every cell connected.
pub fn is_perfect(maze: &Maze) -> bool {
    let dims = maze.dims();
    let edges = maze.open_edges();
    if edges.len() + 1 != dims.len() {
        return false;
    }
    let mut sets = UnionFind::new(dims.len());
    for (a, b) in edges {
        let (Some(ai), Some(bi)) = (dims.index(a), dims.index(b)) else {
            return false;
        };
        if !sets.union(ai, bi) {
            // Cycle.
            return false;
        }
    }
    sets.sets() == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prim_is_perfect() {
        let maze = Maze::new(12, 9).unwrap();
        let mut mg = MazeGen::seeded(maze, 7);
        let opened = mg.prim(Cell::new(5, 5)).unwrap();
        assert_eq!(opened, 12 * 9 - 1);
        assert!(is_perfect(&mg.maze));
    }

    #[test]
    fn test_kruskal_is_perfect() {
        let maze = Maze::new(10, 14).unwrap();
        let mut mg = MazeGen::seeded(maze, 99);
        let opened = mg.kruskal().unwrap();
        assert_eq!(opened, 10 * 14 - 1);
        assert!(is_perfect(&mg.maze));
    }

    #[test]
    fn test_prim_rejects_out_of_bounds_root() {
        let maze = Maze::new(3, 3).unwrap();
        let mut mg = MazeGen::with_maze(maze, rand::rng());
        assert!(matches!(
            mg.prim(Cell::new(3, 0)),
            Err(MazeError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_same_seed_same_maze() {
        for algorithm in [Algorithm::Prim, Algorithm::Kruskal] {
            let (a, _) = generate(15, 15, Some(42), algorithm).unwrap();
            let (b, _) = generate(15, 15, Some(42), algorithm).unwrap();
            assert_eq!(a.edge_bytes(), b.edge_bytes());
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let (a, _) = generate(15, 15, Some(42), Algorithm::Prim).unwrap();
        let (b, _) = generate(15, 15, Some(123), Algorithm::Prim).unwrap();
        assert_ne!(a.edge_bytes(), b.edge_bytes());
    }

    #[test]
    fn test_unseeded_reports_seed() {
        let (a, seed) = generate(8, 8, None, Algorithm::Prim).unwrap();
        let (b, _) = generate(8, 8, Some(seed), Algorithm::Prim).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_cell_and_strip() {
        let (one, _) = generate(1, 1, Some(1), Algorithm::Prim).unwrap();
        assert_eq!(one.open_edge_count(), 0);
        assert!(is_perfect(&one));

        let (strip, _) = generate(1, 6, Some(1), Algorithm::Kruskal).unwrap();
        assert_eq!(strip.open_edge_count(), 5);
        assert!(is_perfect(&strip));
    }

    #[test]
    fn test_large_grid_does_not_overflow_stack() {
        let (maze, _) = generate(300, 300, Some(5), Algorithm::Prim).unwrap();
        assert!(is_perfect(&maze));
    }

    #[test]
    fn test_is_perfect_detects_cycles_and_gaps() {
        let (mut maze, _) = generate(4, 4, Some(3), Algorithm::Prim).unwrap();
        assert!(is_perfect(&maze));

        // Closing any open wall disconnects the tree.
        let (a, b) = maze.open_edges()[0];
        maze.set_open(a, b, false).unwrap();
        assert!(!is_perfect(&maze));

        // Opening every wall produces cycles.
        for c in maze.dims().iter() {
            for n in [c.shift(0, 1), c.shift(1, 0)] {
                if maze.contains(n) {
                    maze.set_open(c, n, true).unwrap();
                }
            }
        }
        assert!(!is_perfect(&maze));
    }

    #[test]
    fn test_degrees_in_range() {
        let (maze, _) = generate(9, 9, Some(11), Algorithm::Kruskal).unwrap();
        for c in maze.dims().iter() {
            let d = maze.degree(c).unwrap();
            assert!((1..=4).contains(&d), "cell {c} has degree {d}");
        }
    }

    #[test]
    fn test_algorithm_parse() {
        assert_eq!("Prim".parse(), Ok(Algorithm::Prim));
        assert_eq!("kruskal".parse(), Ok(Algorithm::Kruskal));
        assert_eq!(
            "dfs".parse::<Algorithm>(),
            Err(ParseAlgorithmError("dfs".to_string()))
        );
        assert_eq!(
            ParseAlgorithmError("dfs".to_string()).to_string(),
            "unknown maze generator: dfs (expected prim or kruskal)"
        );
        for algorithm in [Algorithm::Prim, Algorithm::Kruskal] {
            assert_eq!(algorithm.to_string().parse(), Ok(algorithm));
        }
    }
}
