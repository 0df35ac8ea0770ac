//! Grid graph model for the dynamic maze race.
//!
//! This crate provides the foundational types shared by the generator,
//! the pathfinding engines and the race coordinator: cell coordinates,
//! grid dimensions, the wall table with its adjacency queries, and the
//! structural error type.

pub mod error;
pub mod geom;
pub mod maze;

pub use error::MazeError;
pub use geom::{Cell, Dims, DimsIter};
pub use maze::Maze;
