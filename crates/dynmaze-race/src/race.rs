//! The race coordinator.
//!
//! A [`Race`] owns the maze, the mutator and one [`SearchEngine`] per
//! registered strategy. Every tick it first applies the edits due at that
//! tick, then advances each unfinished engine by exactly one expansion in
//! registration order. Ranking is by tick, never wall-clock time.

use std::fmt;

use dynmaze_core::Maze;
use dynmaze_gen::MazeGen;
use dynmaze_paths::{GraphScan, SearchEngine, SearchStatus};

use crate::cancel::CancelToken;
use crate::config::RaceConfig;
use crate::error::RaceError;
use crate::events::{AbortReason, RaceEvent};
use crate::mutator::Mutator;
use crate::result::{RaceOutcome, RaceResult, RaceResults};

/// Lifecycle of a race: `Setup → Running → {Finished, Aborted}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RaceState {
    /// Maze generated, strategies registered, start and goal fixed.
    Setup,
    /// Ticks are being played.
    Running,
    /// Every entrant found the goal or proved it unreachable.
    Finished,
    /// Stopped by cancellation or the tick cap.
    Aborted,
}

impl RaceState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RaceState::Finished | RaceState::Aborted)
    }
}

impl fmt::Display for RaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaceState::Setup => f.write_str("setup"),
            RaceState::Running => f.write_str("running"),
            RaceState::Finished => f.write_str("finished"),
            RaceState::Aborted => f.write_str("aborted"),
        }
    }
}

struct Entrant {
    engine: SearchEngine,
    pending_replan: bool,
    finished_tick: Option<u32>,
    optimal: Option<bool>,
}

/// A step-synchronous race between pathfinding strategies.
pub struct Race {
    maze: Maze,
    entrants: Vec<Entrant>,
    mutator: Mutator,
    state: RaceState,
    tick: u32,
    seed: Option<u64>,
    max_ticks: Option<u32>,
    cancel: CancelToken,
    events: Vec<RaceEvent>,
    scan: GraphScan,
    results: Option<RaceResults>,
}

impl Race {
    /// Validate `config` and generate its maze.
    ///
    /// Without a configured seed a fresh one is drawn; it is reported by
    /// [`seed`](Self::seed) and on the results.
    pub fn new(config: RaceConfig) -> Result<Self, RaceError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);

        let mut maze = Maze::new(config.height, config.width)?;
        maze.set_start(config.resolved_start())?;
        maze.set_goal(config.resolved_goal())?;
        let mut mg = MazeGen::seeded(maze, seed);
        mg.generate(config.generator)?;

        log::info!(
            "race setup: {} maze ({}) seed {seed}, {} entrants",
            config.dims(),
            config.generator,
            config.strategies.len()
        );
        Ok(Self::build(mg.into_maze(), &config, Some(seed)))
    }

    /// Race over a caller-supplied maze.
    ///
    /// The config's dimensions, seed and generator are ignored. Its start
    /// and goal, when set, replace the maze's own.
    pub fn with_maze(mut maze: Maze, mut config: RaceConfig) -> Result<Self, RaceError> {
        config.width = maze.width();
        config.height = maze.height();
        config.start = Some(config.start.unwrap_or(maze.start()));
        config.goal = Some(config.goal.unwrap_or(maze.goal()));
        config.validate()?;
        maze.set_start(config.resolved_start())?;
        maze.set_goal(config.resolved_goal())?;
        Ok(Self::build(maze, &config, None))
    }

    fn build(maze: Maze, config: &RaceConfig, seed: Option<u64>) -> Self {
        let entrants = config
            .strategies
            .iter()
            .map(|&strategy| Entrant {
                engine: SearchEngine::for_maze(strategy, &maze),
                pending_replan: false,
                finished_tick: None,
                optimal: None,
            })
            .collect();
        Self {
            scan: GraphScan::new(maze.dims()),
            maze,
            entrants,
            mutator: Mutator::new(config.dynamic_edits.iter().copied()),
            state: RaceState::Setup,
            tick: 0,
            seed,
            max_ticks: config.max_ticks,
            cancel: CancelToken::new(),
            events: Vec::new(),
            results: None,
        }
    }

    /// Share an external cancellation token.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Move from `Setup` to `Running`.
    pub fn start(&mut self) -> Result<(), RaceError> {
        if self.state != RaceState::Setup {
            return Err(RaceError::AlreadyStarted(self.state));
        }
        self.state = RaceState::Running;
        self.events.push(RaceEvent::Started {
            seed: self.seed,
            entrants: self.entrants.len(),
        });
        log::info!(
            "race started: {} from {} to {}",
            self.entrants
                .iter()
                .map(|e| e.engine.strategy().name())
                .collect::<Vec<_>>()
                .join(" vs "),
            self.maze.start(),
            self.maze.goal()
        );
        Ok(())
    }

    /// Play one tick and return the resulting state.
    ///
    /// Cancellation and the tick cap are checked before anything else, so a
    /// tick that aborts performs no expansions.
    pub fn tick(&mut self) -> Result<RaceState, RaceError> {
        if self.state != RaceState::Running {
            return Err(RaceError::NotRunning(self.state));
        }
        if self.cancel.is_cancelled() {
            self.abort(AbortReason::Cancelled);
            return Ok(self.state);
        }
        if self.max_ticks.is_some_and(|max| self.tick >= max) {
            self.abort(AbortReason::TickLimit);
            return Ok(self.state);
        }

        self.tick += 1;
        let tick = self.tick;
        let Self {
            maze,
            entrants,
            mutator,
            events,
            scan,
            ..
        } = &mut *self;

        for applied in mutator.apply_due(maze, tick)? {
            let edit = applied.edit;
            events.push(RaceEvent::EditApplied {
                tick,
                a: edit.a,
                b: edit.b,
                open: edit.open,
                changed: applied.changed,
            });
            if !applied.changed {
                continue;
            }
            let [a, b] = applied.hint;
            for (idx, entrant) in entrants.iter_mut().enumerate() {
                if entrant.engine.is_done() || entrant.pending_replan {
                    continue;
                }
                if entrant.engine.affected_by(a, b) {
                    entrant.pending_replan = true;
                    events.push(RaceEvent::ReplanScheduled {
                        tick,
                        entrant: idx,
                        strategy: entrant.engine.strategy(),
                    });
                }
            }
        }

        let maze: &Maze = maze;
        // Shortest distance on this tick's maze, computed on first use.
        let mut reference: Option<Option<i32>> = None;
        for (idx, entrant) in entrants.iter_mut().enumerate() {
            if entrant.engine.is_done() {
                continue;
            }
            if std::mem::take(&mut entrant.pending_replan) {
                entrant.engine.invalidate_and_replan();
            }
            let status = entrant.engine.step(maze);
            if !status.is_done() {
                continue;
            }
            let shortest = *reference
                .get_or_insert_with(|| scan.shortest_distance(maze, maze.start(), maze.goal()));
            entrant.finished_tick = Some(tick);
            entrant.optimal = Some(match status {
                SearchStatus::Found => entrant.engine.path_cost() == shortest,
                _ => shortest.is_none(),
            });
            let outcome = outcome_of(status);
            log::debug!(
                "tick {tick}: {} {outcome} after {} expansions",
                entrant.engine.strategy(),
                entrant.engine.expanded_count()
            );
            events.push(RaceEvent::EntrantFinished {
                tick,
                entrant: idx,
                strategy: entrant.engine.strategy(),
                outcome,
                expanded: entrant.engine.expanded_count(),
            });
        }

        if self.entrants.iter().all(|e| e.engine.is_done()) {
            self.finish();
        }
        Ok(self.state)
    }

    /// Start if needed, then tick until the race is finished or aborted.
    pub fn run(&mut self) -> Result<&RaceResults, RaceError> {
        if self.state == RaceState::Setup {
            self.start()?;
        }
        while self.state == RaceState::Running {
            self.tick()?;
        }
        self.results
            .as_ref()
            .ok_or(RaceError::NotRunning(self.state))
    }

    /// Request cancellation; takes effect at the next tick.
    pub fn cancel(&self) {
        self.cancel.request_cancel();
    }

    /// A handle that can cancel this race from elsewhere.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    fn finish(&mut self) {
        self.state = RaceState::Finished;
        let results = self.snapshot();
        let winner = results.winner().map(|w| w.registration);
        log::info!(
            "race finished after {} ticks, winner: {}",
            self.tick,
            winner
                .and_then(|i| self.entrants.get(i))
                .map_or("none", |e| e.engine.strategy().name())
        );
        self.events.push(RaceEvent::Finished {
            tick: self.tick,
            winner,
        });
        self.results = Some(results);
    }

    fn abort(&mut self, reason: AbortReason) {
        self.state = RaceState::Aborted;
        log::warn!("race aborted at tick {}: {reason:?}", self.tick);
        for entrant in &mut self.entrants {
            entrant.pending_replan = false;
            entrant.engine.release();
        }
        self.events.push(RaceEvent::Aborted {
            tick: self.tick,
            reason,
        });
        self.results = Some(self.snapshot());
    }

    /// Results as of now. Entrants still searching are `Incomplete`.
    pub fn snapshot(&self) -> RaceResults {
        let entries = self
            .entrants
            .iter()
            .enumerate()
            .map(|(registration, e)| RaceResult {
                strategy: e.engine.strategy(),
                registration,
                outcome: outcome_of(e.engine.status()),
                path: e.engine.path().map(<[_]>::to_vec),
                cost: e.engine.path_cost(),
                expanded: e.engine.expanded_count(),
                replans: e.engine.replans(),
                finished_tick: e.finished_tick,
                rank: 0,
                optimal: e.optimal,
            })
            .collect();
        RaceResults::new(entries, self.state, self.tick, self.seed)
    }

    // -----------------------------------------------------------------------
    // Observability
    // -----------------------------------------------------------------------

    /// Final results, once `Finished` or `Aborted`.
    pub fn results(&self) -> Option<&RaceResults> {
        self.results.as_ref()
    }

    /// Take every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<RaceEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn state(&self) -> RaceState {
        self.state
    }

    /// Ticks played so far.
    pub fn ticks(&self) -> u32 {
        self.tick
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn mutator(&self) -> &Mutator {
        &self.mutator
    }

    /// Engines in registration order.
    pub fn engines(&self) -> impl Iterator<Item = &SearchEngine> {
        self.entrants.iter().map(|e| &e.engine)
    }

    pub fn engine(&self, registration: usize) -> Option<&SearchEngine> {
        self.entrants.get(registration).map(|e| &e.engine)
    }
}

fn outcome_of(status: SearchStatus) -> RaceOutcome {
    match status {
        SearchStatus::Found => RaceOutcome::Found,
        SearchStatus::Unreachable => RaceOutcome::Unreachable,
        SearchStatus::Running => RaceOutcome::Incomplete,
    }
}
