//! Wall-clock benchmarking of single engines on a static maze.

use std::time::{Duration, Instant};

use dynmaze_core::Maze;
use dynmaze_paths::{SearchEngine, SearchStatus, Strategy};

/// Outcome of running one engine to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BenchReport {
    pub strategy: Strategy,
    pub status: SearchStatus,
    pub expanded: u64,
    /// Number of cells on the path, start and goal included.
    pub path_len: Option<usize>,
    pub cost: Option<i32>,
    pub elapsed: Duration,
}

/// Run `strategy` from the maze's start to its goal without interruption.
pub fn benchmark(maze: &Maze, strategy: Strategy) -> BenchReport {
    let started = Instant::now();
    let mut engine = SearchEngine::for_maze(strategy, maze);
    let status = engine.run_to_completion(maze);
    let elapsed = started.elapsed();
    log::debug!(
        "benchmark {strategy}: {status:?}, {} expansions in {elapsed:?}",
        engine.expanded_count()
    );
    BenchReport {
        strategy,
        status,
        expanded: engine.expanded_count(),
        path_len: engine.path().map(<[_]>::len),
        cost: engine.path_cost(),
        elapsed,
    }
}

/// [`benchmark`] each strategy in turn on the same maze.
pub fn benchmark_all(
    maze: &Maze,
    strategies: impl IntoIterator<Item = Strategy>,
) -> Vec<BenchReport> {
    strategies
        .into_iter()
        .map(|strategy| benchmark(maze, strategy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynmaze_gen::{Algorithm, generate};

    #[test]
    fn reports_agree_on_cost() {
        let (maze, _) = generate(25, 25, Some(42), Algorithm::Prim).unwrap();
        let reports = benchmark_all(&maze, Strategy::ALL);
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.status == SearchStatus::Found));
        assert_eq!(reports[0].cost, reports[1].cost);
        assert_eq!(reports[0].path_len, reports[0].cost.map(|c| c as usize + 1));
        assert!(reports[1].expanded <= reports[0].expanded);
    }

    #[test]
    fn unreachable_goal_has_no_path() {
        let maze = Maze::new(3, 3).unwrap();
        let report = benchmark(&maze, Strategy::AStar);
        assert_eq!(report.status, SearchStatus::Unreachable);
        assert_eq!(report.path_len, None);
        assert_eq!(report.expanded, 1);
    }
}
