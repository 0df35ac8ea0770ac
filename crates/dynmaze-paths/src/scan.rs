use dynmaze_core::{Cell, Dims};

use crate::engine::UNREACHABLE;

/// Reusable scratch space for whole-graph scans: BFS distance maps and
/// connected-component labelling.
///
/// `GraphScan` owns its buffers so that repeated scans over the same grid
/// (e.g. one per race tick) incur no allocations after the first use.
pub struct GraphScan {
    pub(crate) dims: Dims,
    // BFS caches
    pub(crate) bfs_map: Vec<i32>,
    // CC caches
    pub(crate) cc_labels: Vec<i32>,
    pub(crate) cc_stack: Vec<usize>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Cell>,
}

impl GraphScan {
    /// Create a new `GraphScan` for the given grid dimensions.
    pub fn new(dims: Dims) -> Self {
        let len = dims.len();
        Self {
            dims,
            bfs_map: vec![UNREACHABLE; len],
            cc_labels: vec![-1; len],
            cc_stack: Vec::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// The grid being scanned.
    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }
}
