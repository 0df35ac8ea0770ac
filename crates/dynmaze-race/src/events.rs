//! Events emitted by a race for renderers and reporters.

use dynmaze_core::Cell;
use dynmaze_paths::Strategy;

use crate::result::RaceOutcome;

/// Why a race was aborted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbortReason {
    /// The cancellation token was set.
    Cancelled,
    /// The configured tick cap was reached.
    TickLimit,
}

/// Something that happened during a race.
///
/// Events accumulate inside the race until drained with
/// [`Race::drain_events`](crate::Race::drain_events).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RaceEvent {
    /// The race entered `Running`.
    Started { seed: Option<u64>, entrants: usize },
    /// A scheduled wall edit was applied before the steps of `tick`.
    EditApplied {
        tick: u32,
        a: Cell,
        b: Cell,
        open: bool,
        changed: bool,
    },
    /// An entrant will discard its search state and restart this tick.
    ReplanScheduled {
        tick: u32,
        entrant: usize,
        strategy: Strategy,
    },
    /// An entrant terminated.
    EntrantFinished {
        tick: u32,
        entrant: usize,
        strategy: Strategy,
        outcome: RaceOutcome,
        expanded: u64,
    },
    /// Every entrant terminated.
    Finished { tick: u32, winner: Option<usize> },
    /// The race stopped early.
    Aborted { tick: u32, reason: AbortReason },
}
