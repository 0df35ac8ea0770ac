use std::fmt;
use std::str::FromStr;

use dynmaze_core::Cell;

use crate::traits::AstarPather;

/// Search strategy for a [`SearchEngine`](crate::SearchEngine).
///
/// Both strategies share one search loop; they differ only in the
/// heuristic added to the accumulated cost when keying the open queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Uniform-cost search, heuristic ≡ 0.
    Dijkstra,
    /// Best-first search keyed by cost plus the pather's estimate.
    AStar,
}

impl Strategy {
    /// Every strategy, in canonical order.
    pub const ALL: [Strategy; 2] = [Strategy::Dijkstra, Strategy::AStar];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Dijkstra => "Dijkstra",
            Strategy::AStar => "A*",
        }
    }

    /// Heuristic term for `from` on the way to `goal`.
    #[inline]
    pub fn heuristic<P: AstarPather>(self, pather: &P, from: Cell, goal: Cell) -> i32 {
        match self {
            Strategy::Dijkstra => 0,
            Strategy::AStar => pather.estimate(from, goal),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrategyError(pub String);

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown strategy: {} (expected dijkstra or astar)",
            self.0
        )
    }
}

impl std::error::Error for ParseStrategyError {}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Strategy::Dijkstra),
            "astar" | "a*" | "a-star" => Ok(Strategy::AStar),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}
