use dynmaze_core::{Cell, Maze};
use dynmaze_gen::{Algorithm, generate};
use dynmaze_paths::{
    GraphScan, SearchEngine, SearchStatus, Strategy, UNREACHABLE, path_cost, verify_path,
};
use proptest::prelude::*;

fn solve(strategy: Strategy, maze: &Maze) -> SearchEngine {
    let mut engine = SearchEngine::for_maze(strategy, maze);
    engine.run_to_completion(maze);
    engine
}

fn bfs_distance(maze: &Maze, from: Cell, to: Cell) -> i32 {
    let mut scan = GraphScan::new(maze.dims());
    scan.bfs_map(maze, &[from]);
    scan.bfs_at(to)
}

/// Open `extra` additional walls chosen by index, creating cycles.
fn with_loops(mut maze: Maze, extra: &[usize]) -> Maze {
    let mut walls = Vec::new();
    for c in maze.dims().iter() {
        for n in [c.shift(0, 1), c.shift(1, 0)] {
            if maze.contains(n) && !maze.is_open(c, n).unwrap() {
                walls.push((c, n));
            }
        }
    }
    if walls.is_empty() {
        return maze;
    }
    for &i in extra {
        let (a, b) = walls[i % walls.len()];
        maze.set_open(a, b, true).unwrap();
    }
    maze
}

proptest! {
    #[test]
    fn both_strategies_find_optimal_paths(
        h in 1i32..20,
        w in 1i32..20,
        seed in any::<u64>(),
        extra in proptest::collection::vec(any::<usize>(), 0..12),
    ) {
        let (maze, _) = generate(h, w, Some(seed), Algorithm::Prim).unwrap();
        let maze = with_loops(maze, &extra);
        let expected = bfs_distance(&maze, maze.start(), maze.goal());
        prop_assert_ne!(expected, UNREACHABLE);

        for strategy in Strategy::ALL {
            let engine = solve(strategy, &maze);
            prop_assert_eq!(engine.status(), SearchStatus::Found);
            let path = engine.path().unwrap();
            prop_assert!(verify_path(&maze, path, maze.start(), maze.goal()).is_ok());
            prop_assert_eq!(engine.path_cost(), Some(expected));
            prop_assert_eq!(path_cost(&maze, path), expected);
        }
    }

    #[test]
    fn astar_never_expands_more_than_dijkstra(
        h in 1i32..20,
        w in 1i32..20,
        seed in any::<u64>(),
        extra in proptest::collection::vec(any::<usize>(), 0..12),
    ) {
        let (maze, _) = generate(h, w, Some(seed), Algorithm::Kruskal).unwrap();
        let maze = with_loops(maze, &extra);
        let dijkstra = solve(Strategy::Dijkstra, &maze);
        let astar = solve(Strategy::AStar, &maze);
        prop_assert!(astar.expanded_count() <= dijkstra.expanded_count());
    }

    #[test]
    fn expansion_order_is_reproducible(
        h in 2i32..12,
        w in 2i32..12,
        seed in any::<u64>(),
    ) {
        let (maze, _) = generate(h, w, Some(seed), Algorithm::Prim).unwrap();
        for strategy in Strategy::ALL {
            let mut a = SearchEngine::for_maze(strategy, &maze);
            let mut b = SearchEngine::for_maze(strategy, &maze);
            loop {
                let sa = a.step(&maze);
                let sb = b.step(&maze);
                prop_assert_eq!(sa, sb);
                prop_assert_eq!(a.last_expanded(), b.last_expanded());
                if sa.is_done() {
                    break;
                }
            }
            prop_assert_eq!(a.path(), b.path());
        }
    }
}

#[test]
fn disconnected_goal_is_unreachable() {
    let (mut maze, _) = generate(6, 6, Some(9), Algorithm::Prim).unwrap();
    let goal = maze.goal();
    for n in goal.neighbors_4() {
        if maze.contains(n) {
            maze.set_open(goal, n, false).unwrap();
        }
    }
    for strategy in Strategy::ALL {
        let engine = solve(strategy, &maze);
        assert_eq!(engine.status(), SearchStatus::Unreachable);
        assert!(engine.path().is_none());
        assert_eq!(engine.path_cost(), None);
    }
}

#[test]
fn replan_after_wall_closure_routes_around() {
    // 2x3 ring: the short route along the top is cut mid-search.
    let mut maze = Maze::new(2, 3).unwrap();
    let open = [
        ((0, 0), (0, 1)),
        ((0, 1), (0, 2)),
        ((0, 0), (1, 0)),
        ((1, 0), (1, 1)),
        ((1, 1), (1, 2)),
        ((0, 2), (1, 2)),
    ];
    for (a, b) in open {
        maze.set_open(a.into(), b.into(), true).unwrap();
    }
    maze.set_goal(Cell::new(0, 2)).unwrap();

    let mut engine = SearchEngine::for_maze(Strategy::AStar, &maze);
    engine.step(&maze);
    engine.step(&maze);
    assert!(engine.is_closed(Cell::new(0, 1)));

    maze.set_open(Cell::new(0, 1), Cell::new(0, 2), false).unwrap();
    assert!(engine.affected_by(Cell::new(0, 1), Cell::new(0, 2)));
    engine.invalidate_and_replan();

    assert_eq!(engine.run_to_completion(&maze), SearchStatus::Found);
    assert_eq!(engine.path_cost(), Some(4));
    assert_eq!(engine.replans(), 1);
    assert!(verify_path(&maze, engine.path().unwrap(), maze.start(), maze.goal()).is_ok());
}

#[test]
fn connectivity_matches_generator() {
    let (maze, _) = generate(10, 7, Some(3), Algorithm::Kruskal).unwrap();
    let mut scan = GraphScan::new(maze.dims());
    assert_eq!(scan.cc_map_all(&maze), 1);
    assert!(scan.is_connected(&maze));
}
