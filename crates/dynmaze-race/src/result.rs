//! Immutable race result snapshots.

use std::cmp::Ordering;
use std::fmt;

use dynmaze_core::Cell;
use dynmaze_paths::Strategy;

use crate::race::RaceState;

/// How one entrant's search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RaceOutcome {
    /// The goal was reached.
    Found,
    /// The open queue emptied: no open route from start to goal.
    Unreachable,
    /// The race was aborted before this entrant finished.
    Incomplete,
}

impl RaceOutcome {
    /// Ranking class: found entrants first, then unreachable, then incomplete.
    fn class(self) -> u8 {
        match self {
            RaceOutcome::Found => 0,
            RaceOutcome::Unreachable => 1,
            RaceOutcome::Incomplete => 2,
        }
    }
}

impl fmt::Display for RaceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaceOutcome::Found => f.write_str("found"),
            RaceOutcome::Unreachable => f.write_str("unreachable"),
            RaceOutcome::Incomplete => f.write_str("incomplete"),
        }
    }
}

/// One entrant's result.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RaceResult {
    pub strategy: Strategy,
    /// Position in registration order.
    pub registration: usize,
    pub outcome: RaceOutcome,
    /// Cells from start to goal, when found.
    pub path: Option<Vec<Cell>>,
    /// Total path cost, when found.
    pub cost: Option<i32>,
    /// Cells popped and finalized, summed over every replan.
    pub expanded: u64,
    pub replans: u32,
    /// Tick on which the entrant terminated.
    pub finished_tick: Option<u32>,
    /// 1-based completion rank.
    pub rank: usize,
    /// Whether the outcome agrees with a breadth-first search over the maze
    /// as it stood when the entrant finished. `None` when incomplete.
    pub optimal: Option<bool>,
}

impl RaceResult {
    pub fn is_found(&self) -> bool {
        self.outcome == RaceOutcome::Found
    }

    /// Ranking order: outcome class, completion tick, path cost, then
    /// registration order.
    pub(crate) fn rank_cmp(&self, other: &Self) -> Ordering {
        self.outcome
            .class()
            .cmp(&other.outcome.class())
            .then_with(|| {
                let a = self.finished_tick.unwrap_or(u32::MAX);
                let b = other.finished_tick.unwrap_or(u32::MAX);
                a.cmp(&b)
            })
            .then_with(|| {
                let a = self.cost.unwrap_or(i32::MAX);
                let b = other.cost.unwrap_or(i32::MAX);
                a.cmp(&b)
            })
            .then_with(|| self.registration.cmp(&other.registration))
    }
}

/// The full result set of one race.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RaceResults {
    /// One entry per entrant, in registration order.
    pub entries: Vec<RaceResult>,
    /// Registration indices, best first.
    pub ranking: Vec<usize>,
    /// `Finished` or `Aborted`.
    pub state: RaceState,
    /// Ticks played.
    pub ticks: u32,
    /// Generator seed, when the maze was generated by the race.
    pub seed: Option<u64>,
}

impl RaceResults {
    /// Build a result set, filling in ranks.
    pub(crate) fn new(
        mut entries: Vec<RaceResult>,
        state: RaceState,
        ticks: u32,
        seed: Option<u64>,
    ) -> Self {
        let mut ranking: Vec<usize> = (0..entries.len()).collect();
        ranking.sort_by(|&a, &b| entries[a].rank_cmp(&entries[b]));
        for (pos, &idx) in ranking.iter().enumerate() {
            entries[idx].rank = pos + 1;
        }
        Self {
            entries,
            ranking,
            state,
            ticks,
            seed,
        }
    }

    /// The best-ranked entrant, if it reached the goal.
    pub fn winner(&self) -> Option<&RaceResult> {
        self.ranked().next().filter(|r| r.is_found())
    }

    /// Entries in rank order.
    pub fn ranked(&self) -> impl Iterator<Item = &RaceResult> {
        self.ranking.iter().map(|&i| &self.entries[i])
    }

    /// Whether every entrant terminated on its own.
    pub fn is_complete(&self) -> bool {
        self.entries
            .iter()
            .all(|e| e.outcome != RaceOutcome::Incomplete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(
        registration: usize,
        outcome: RaceOutcome,
        tick: Option<u32>,
        cost: Option<i32>,
    ) -> RaceResult {
        RaceResult {
            strategy: Strategy::Dijkstra,
            registration,
            outcome,
            path: None,
            cost,
            expanded: 0,
            replans: 0,
            finished_tick: tick,
            rank: 0,
            optimal: None,
        }
    }

    #[test]
    fn ranks_by_tick_then_cost_then_registration() {
        let results = RaceResults::new(
            vec![
                entry(0, RaceOutcome::Found, Some(9), Some(8)),
                entry(1, RaceOutcome::Found, Some(5), Some(8)),
                entry(2, RaceOutcome::Found, Some(9), Some(6)),
                entry(3, RaceOutcome::Found, Some(5), Some(8)),
            ],
            RaceState::Finished,
            9,
            Some(1),
        );
        assert_eq!(results.ranking, vec![1, 3, 2, 0]);
        assert_eq!(results.entries[1].rank, 1);
        assert_eq!(results.entries[0].rank, 4);
        assert_eq!(results.winner().map(|w| w.registration), Some(1));
    }

    #[test]
    fn found_beats_unreachable_beats_incomplete() {
        let results = RaceResults::new(
            vec![
                entry(0, RaceOutcome::Incomplete, None, None),
                entry(1, RaceOutcome::Unreachable, Some(2), None),
                entry(2, RaceOutcome::Found, Some(40), Some(30)),
            ],
            RaceState::Aborted,
            40,
            None,
        );
        assert_eq!(results.ranking, vec![2, 1, 0]);
        assert!(!results.is_complete());
    }

    #[test]
    fn no_winner_when_nobody_found() {
        let results = RaceResults::new(
            vec![
                entry(0, RaceOutcome::Unreachable, Some(3), None),
                entry(1, RaceOutcome::Unreachable, Some(3), None),
            ],
            RaceState::Finished,
            3,
            None,
        );
        assert!(results.winner().is_none());
        assert!(results.is_complete());
        let order: Vec<usize> = results.ranked().map(|r| r.registration).collect();
        assert_eq!(order, vec![0, 1]);
    }
}
