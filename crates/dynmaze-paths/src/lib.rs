//! Stepwise pathfinding engines for maze grid graphs.
//!
//! - **Search engine** ([`SearchEngine`]): one priority-queue skeleton
//!   driven one expansion at a time, parameterized by [`Strategy`]
//!   (Dijkstra or A*).
//! - **BFS** distance maps ([`GraphScan::bfs_map`]), the brute-force
//!   reference for optimality checks.
//! - **Connected components** ([`GraphScan::cc_map_all`], [`GraphScan::cc_map`]).
//! - **Path verification** ([`verify_path`]).
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, connected components |
//! | [`WeightedPather`] : [`Pather`] | path costs |
//! | [`AstarPather`] : [`WeightedPather`] | [`SearchEngine`] (both strategies) |

mod bfs;
mod cc;
mod distance;
mod engine;
mod queue;
mod scan;
mod strategy;
mod traits;
mod verify;

pub use distance::manhattan;
pub use engine::{SearchEngine, SearchStatus, UNREACHABLE};
pub use queue::OpenQueue;
pub use scan::GraphScan;
pub use strategy::{ParseStrategyError, Strategy};
pub use traits::{AstarPather, CustomCost, Pather, WeightedPather};
pub use verify::{PathError, path_cost, verify_path};
