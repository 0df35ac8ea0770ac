//! Stepwise best-first search shared by every [`Strategy`].
//!
//! A [`SearchEngine`] owns its search state (open queue, per-cell best cost
//! and predecessor, closed flags) but never the graph: each call to
//! [`step`](SearchEngine::step) borrows the pather for exactly one
//! expansion, so the graph owner is free to edit walls between steps.

use dynmaze_core::{Cell, Dims, Maze, MazeError};

use crate::queue::OpenQueue;
use crate::strategy::Strategy;
use crate::traits::AstarPather;

/// Sentinel cost for cells the current search has not reached.
pub const UNREACHABLE: i32 = i32::MAX;

const NO_PARENT: usize = usize::MAX;

/// Lifecycle of one search attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// The open queue still has candidates.
    Running,
    /// The goal was popped; the path is available.
    Found,
    /// The open queue emptied before the goal was reached.
    Unreachable,
}

impl SearchStatus {
    /// Whether the search has terminated.
    #[inline]
    pub fn is_done(self) -> bool {
        self != SearchStatus::Running
    }
}

#[derive(Clone)]
struct Node {
    g: i32,
    parent: usize,
    generation: u32,
    closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            parent: NO_PARENT,
            generation: 0,
            closed: false,
        }
    }
}

/// One pathfinding engine racing from `start` to `goal`.
pub struct SearchEngine {
    strategy: Strategy,
    dims: Dims,
    start: Cell,
    goal: Cell,
    nodes: Vec<Node>,
    generation: u32,
    /// Queue items carry the cost they were pushed with so that entries
    /// superseded by a cheaper route can be skipped on pop.
    open: OpenQueue<(usize, i32)>,
    status: SearchStatus,
    expanded: u64,
    replans: u32,
    last_expanded: Option<Cell>,
    path: Option<Vec<Cell>>,
    path_cost: Option<i32>,
    nbuf: Vec<Cell>,
}

impl SearchEngine {
    /// Create an engine for a `dims` grid. Fails if `start` or `goal` is out
    /// of bounds.
    pub fn new(strategy: Strategy, dims: Dims, start: Cell, goal: Cell) -> Result<Self, MazeError> {
        for cell in [start, goal] {
            if !dims.contains(cell) {
                return Err(MazeError::OutOfBounds { cell, dims });
            }
        }
        Ok(Self::build(strategy, dims, start, goal))
    }

    /// Create an engine for a maze's own start and goal.
    pub fn for_maze(strategy: Strategy, maze: &Maze) -> Self {
        Self::build(strategy, maze.dims(), maze.start(), maze.goal())
    }

    fn build(strategy: Strategy, dims: Dims, start: Cell, goal: Cell) -> Self {
        let mut engine = Self {
            strategy,
            dims,
            start,
            goal,
            nodes: vec![Node::default(); dims.len()],
            generation: 0,
            open: OpenQueue::new(),
            status: SearchStatus::Running,
            expanded: 0,
            replans: 0,
            last_expanded: None,
            path: None,
            path_cost: None,
            nbuf: Vec::with_capacity(4),
        };
        engine.reset();
        engine
    }

    /// Bump the generation to lazily invalidate every node, then seed the
    /// open queue with `start`.
    fn reset(&mut self) {
        if self.nodes.len() != self.dims.len() {
            self.nodes.clear();
            self.nodes.resize(self.dims.len(), Node::default());
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Counter wrapped: stale nodes could alias the new generation.
            self.nodes.fill(Node::default());
            self.generation = 1;
        }
        self.open.clear();
        self.status = SearchStatus::Running;
        self.last_expanded = None;
        self.path = None;
        self.path_cost = None;

        if let Some(si) = self.dims.index(self.start) {
            let gen_ = self.generation;
            let node = &mut self.nodes[si];
            node.g = 0;
            node.parent = NO_PARENT;
            node.generation = gen_;
            node.closed = false;
            // The only entry, so its key does not matter.
            self.open.push((si, 0), 0);
        }
    }

    #[inline]
    fn node(&self, c: Cell) -> Option<&Node> {
        let i = self.dims.index(c)?;
        self.nodes.get(i).filter(|n| n.generation == self.generation)
    }

    /// Pop the lowest-key open node and expand it.
    ///
    /// Each call finalizes at most one cell. Entries made stale by a later
    /// cheaper push are discarded without counting as an expansion. Once the
    /// search has terminated this is a no-op that returns the final status.
    pub fn step<P: AstarPather>(&mut self, pather: &P) -> SearchStatus {
        if self.status.is_done() {
            return self.status;
        }
        let cur_gen = self.generation;

        let (ci, current_g) = loop {
            let Some((ci, g)) = self.open.pop() else {
                self.status = SearchStatus::Unreachable;
                self.last_expanded = None;
                log::debug!(
                    "{} search from {} exhausted after {} expansions",
                    self.strategy,
                    self.start,
                    self.expanded
                );
                return self.status;
            };
            let Some(n) = self.nodes.get(ci) else {
                continue;
            };
            // Skip stale entries.
            if n.generation != cur_gen || n.closed || g > n.g {
                continue;
            }
            break (ci, g);
        };

        self.nodes[ci].closed = true;
        self.expanded += 1;
        let current = self.dims.cell(ci);
        self.last_expanded = Some(current);

        if current == self.goal {
            self.status = SearchStatus::Found;
            self.path = Some(self.reconstruct(ci));
            self.path_cost = Some(current_g);
            log::debug!(
                "{} reached {} at cost {} after {} expansions",
                self.strategy,
                self.goal,
                current_g,
                self.expanded
            );
            return self.status;
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        pather.neighbors(current, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = self.dims.index(np) else {
                continue;
            };
            let tentative = current_g.saturating_add(pather.cost(current, np));

            let n = &mut self.nodes[ni];
            if n.generation == cur_gen {
                if n.closed || tentative >= n.g {
                    continue;
                }
            } else {
                n.generation = cur_gen;
                n.closed = false;
            }
            n.g = tentative;
            n.parent = ci;

            let key = tentative.saturating_add(self.strategy.heuristic(pather, np, self.goal));
            self.open.push((ni, tentative), key);
        }

        self.nbuf = nbuf;
        self.status
    }

    /// Step until the search terminates.
    pub fn run_to_completion<P: AstarPather>(&mut self, pather: &P) -> SearchStatus {
        while !self.status.is_done() {
            self.step(pather);
        }
        self.status
    }

    /// Discard the search state and restart from `start`.
    ///
    /// Used when a wall edit may have invalidated costs of already closed
    /// cells. `expanded_count` keeps accumulating across restarts.
    pub fn invalidate_and_replan(&mut self) {
        self.replans += 1;
        log::debug!(
            "{} replanning (#{}) after {} expansions",
            self.strategy,
            self.replans,
            self.expanded
        );
        self.reset();
    }

    /// Whether an edit of edge `a`-`b` can change this engine's result.
    ///
    /// True when either endpoint is closed. The current best path runs
    /// through closed cells only, so this also covers edits on that path.
    pub fn affected_by(&self, a: Cell, b: Cell) -> bool {
        self.is_closed(a) || self.is_closed(b)
    }

    /// Drop all search state. Metrics and any found path survive.
    pub fn release(&mut self) {
        self.nodes = Vec::new();
        self.open.shrink();
        self.nbuf = Vec::new();
        self.last_expanded = None;
    }

    /// Follow predecessor links from `idx` back to `start`.
    fn reconstruct(&self, idx: usize) -> Vec<Cell> {
        let mut path = Vec::new();
        let mut ci = idx;
        while ci != NO_PARENT {
            path.push(self.dims.cell(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }

    // -----------------------------------------------------------------------
    // Observability
    // -----------------------------------------------------------------------

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[inline]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }

    /// Cells popped and finalized, summed over every restart.
    #[inline]
    pub fn expanded_count(&self) -> u64 {
        self.expanded
    }

    /// Number of `invalidate_and_replan` calls.
    #[inline]
    pub fn replans(&self) -> u32 {
        self.replans
    }

    /// The cell finalized by the most recent step.
    #[inline]
    pub fn last_expanded(&self) -> Option<Cell> {
        self.last_expanded
    }

    /// Best known cost from `start` to `c`, if the current search reached it.
    pub fn current_best_cost_to(&self, c: Cell) -> Option<i32> {
        self.node(c).map(|n| n.g).filter(|&g| g != UNREACHABLE)
    }

    /// Whether `c` is finalized in the current search.
    pub fn is_closed(&self, c: Cell) -> bool {
        self.node(c).is_some_and(|n| n.closed)
    }

    /// The best known route from `start` to `c` in the current search.
    pub fn path_to(&self, c: Cell) -> Option<Vec<Cell>> {
        let i = self.dims.index(c)?;
        self.node(c)?;
        Some(self.reconstruct(i))
    }

    /// The path to the goal once found.
    pub fn path(&self) -> Option<&[Cell]> {
        self.path.as_deref()
    }

    /// Cost of the found path.
    pub fn path_cost(&self) -> Option<i32> {
        self.path_cost
    }

    /// Finalized cells of the current search, in row-major order.
    pub fn closed(&self) -> Vec<Cell> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.generation == self.generation && n.closed)
            .map(|(i, _)| self.dims.cell(i))
            .collect()
    }

    /// Open (reached but not finalized) cells, in row-major order.
    pub fn frontier(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self
            .open
            .items()
            .filter(|&&(i, g)| {
                self.nodes
                    .get(i)
                    .is_some_and(|n| n.generation == self.generation && !n.closed && n.g == g)
            })
            .map(|&(i, _)| self.dims.cell(i))
            .collect();
        cells.sort();
        cells.dedup();
        cells
    }
}
