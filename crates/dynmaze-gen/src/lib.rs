//! Perfect maze generation for dynmaze.
//!
//! A perfect maze is a spanning tree over the grid graph: every cell is
//! reachable from every other through exactly one simple path.

pub mod mapgen;
pub mod unionfind;

pub use mapgen::{Algorithm, MazeGen, ParseAlgorithmError, generate, is_perfect};
pub use unionfind::UnionFind;
