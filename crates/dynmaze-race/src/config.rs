//! Race configuration, validation, and error types.
//!
//! [`RaceConfig`] is the builder-input for constructing a [`Race`](crate::Race).
//! [`validate()`](RaceConfig::validate) checks every structural constraint
//! before any generation work starts.

use std::error::Error;
use std::fmt;

use dynmaze_core::{Cell, Dims};
use dynmaze_gen::Algorithm;
use dynmaze_paths::Strategy;

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

/// One scheduled wall edit.
///
/// Edits due at tick `t` are applied before any engine steps in tick `t`.
/// Ticks are 1-based; an edit at tick 0 is applied before the first tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edit {
    pub tick: u32,
    pub a: Cell,
    pub b: Cell,
    /// `true` opens the wall, `false` closes it.
    pub open: bool,
}

impl Edit {
    pub fn new(tick: u32, a: Cell, b: Cell, open: bool) -> Self {
        Self { tick, a, b, open }
    }

    /// Open the wall between `a` and `b` at `tick`.
    pub fn open(tick: u32, a: Cell, b: Cell) -> Self {
        Self::new(tick, a, b, true)
    }

    /// Close the wall between `a` and `b` at `tick`.
    pub fn close(tick: u32, a: Cell, b: Cell) -> Self {
        Self::new(tick, a, b, false)
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors detected during [`RaceConfig::validate()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No strategies registered.
    NoStrategies,
    /// Width or height is zero or negative.
    InvalidDimensions {
        width: i32,
        height: i32,
    },
    /// The start cell lies outside the grid.
    StartOutOfBounds {
        cell: Cell,
        dims: Dims,
    },
    /// The goal cell lies outside the grid.
    GoalOutOfBounds {
        cell: Cell,
        dims: Dims,
    },
    /// A scheduled edit names a cell outside the grid.
    EditOutOfBounds {
        /// Position of the edit in `dynamic_edits`.
        index: usize,
        cell: Cell,
    },
    /// A scheduled edit names two cells that are not 4-neighbours.
    EditNotAdjacent {
        /// Position of the edit in `dynamic_edits`.
        index: usize,
        a: Cell,
        b: Cell,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoStrategies => write!(f, "at least one strategy must be registered"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "grid dimensions must be positive, got {width}x{height}")
            }
            Self::StartOutOfBounds { cell, dims } => {
                write!(f, "start {cell} is outside the {dims} grid")
            }
            Self::GoalOutOfBounds { cell, dims } => {
                write!(f, "goal {cell} is outside the {dims} grid")
            }
            Self::EditOutOfBounds { index, cell } => {
                write!(f, "edit #{index}: cell {cell} is out of bounds")
            }
            Self::EditNotAdjacent { index, a, b } => {
                write!(f, "edit #{index}: cells {a} and {b} are not adjacent")
            }
        }
    }
}

impl Error for ConfigError {}

// ---------------------------------------------------------------------------
// RaceConfig
// ---------------------------------------------------------------------------

/// Everything needed to set up a race.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RaceConfig {
    /// Grid width (columns). Default: 21.
    pub width: i32,
    /// Grid height (rows). Default: 21.
    pub height: i32,
    /// Generator seed. `None` draws a fresh one, recorded on the results.
    pub seed: Option<u64>,
    /// Competing strategies in registration order. Default: Dijkstra, A*.
    pub strategies: Vec<Strategy>,
    /// Start cell. Default: top-left corner.
    pub start: Option<Cell>,
    /// Goal cell. Default: bottom-right corner.
    pub goal: Option<Cell>,
    /// Wall edits applied during the race, in any order.
    pub dynamic_edits: Vec<Edit>,
    /// Maze generator. Default: Prim's.
    pub generator: Algorithm,
    /// Abort the race after this many ticks. Reaching the cap takes the
    /// same path as an external cancellation: the race moves to `Aborted`
    /// with [`AbortReason::TickLimit`](crate::AbortReason::TickLimit).
    /// Default: `None` (only cancellation aborts).
    pub max_ticks: Option<u32>,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            width: 21,
            height: 21,
            seed: None,
            strategies: Strategy::ALL.to_vec(),
            start: None,
            goal: None,
            dynamic_edits: Vec::new(),
            generator: Algorithm::Prim,
            max_ticks: None,
        }
    }
}

impl RaceConfig {
    /// A `width x height` race with default settings.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_strategies(mut self, strategies: impl IntoIterator<Item = Strategy>) -> Self {
        self.strategies = strategies.into_iter().collect();
        self
    }

    pub fn with_start(mut self, start: Cell) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_goal(mut self, goal: Cell) -> Self {
        self.goal = Some(goal);
        self
    }

    /// Append one scheduled edit.
    pub fn with_edit(mut self, edit: Edit) -> Self {
        self.dynamic_edits.push(edit);
        self
    }

    pub fn with_edits(mut self, edits: impl IntoIterator<Item = Edit>) -> Self {
        self.dynamic_edits.extend(edits);
        self
    }

    pub fn with_generator(mut self, generator: Algorithm) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: u32) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    /// Grid dimensions.
    pub fn dims(&self) -> Dims {
        Dims::new(self.height, self.width)
    }

    /// Start cell after applying the default.
    pub fn resolved_start(&self) -> Cell {
        self.start.unwrap_or(Cell::ZERO)
    }

    /// Goal cell after applying the default.
    pub fn resolved_goal(&self) -> Cell {
        self.goal
            .unwrap_or(Cell::new(self.height - 1, self.width - 1))
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.strategies.is_empty() {
            return Err(ConfigError::NoStrategies);
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let dims = self.dims();
        let start = self.resolved_start();
        if !dims.contains(start) {
            return Err(ConfigError::StartOutOfBounds { cell: start, dims });
        }
        let goal = self.resolved_goal();
        if !dims.contains(goal) {
            return Err(ConfigError::GoalOutOfBounds { cell: goal, dims });
        }
        for (index, edit) in self.dynamic_edits.iter().enumerate() {
            for cell in [edit.a, edit.b] {
                if !dims.contains(cell) {
                    return Err(ConfigError::EditOutOfBounds { index, cell });
                }
            }
            if !edit.a.is_adjacent(edit.b) {
                return Err(ConfigError::EditNotAdjacent {
                    index,
                    a: edit.a,
                    b: edit.b,
                });
            }
        }
        Ok(())
    }
}
