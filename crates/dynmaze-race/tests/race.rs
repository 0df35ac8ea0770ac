use dynmaze_core::{Cell, Maze};
use dynmaze_paths::{Strategy, verify_path};
use dynmaze_race::{
    AbortReason, CancelToken, Edit, Race, RaceConfig, RaceEvent, RaceOutcome, RaceState,
};
use proptest::prelude::*;
use proptest::strategy::Strategy as _;

fn scenario_config() -> RaceConfig {
    RaceConfig::new(5, 5)
        .with_seed(42)
        .with_start(Cell::new(0, 0))
        .with_goal(Cell::new(4, 4))
        .with_strategies([Strategy::Dijkstra, Strategy::AStar])
}

#[test]
fn static_race_ranks_by_tick_then_cost_then_registration() {
    let mut race = Race::new(scenario_config()).unwrap();
    let maze = race.maze().clone();
    let results = race.run().unwrap();

    assert_eq!(results.state, RaceState::Finished);
    assert_eq!(results.seed, Some(42));
    let dijkstra = &results.entries[0];
    let astar = &results.entries[1];
    assert_eq!(dijkstra.strategy, Strategy::Dijkstra);
    assert_eq!(astar.strategy, Strategy::AStar);

    for entry in &results.entries {
        assert_eq!(entry.outcome, RaceOutcome::Found);
        assert_eq!(entry.optimal, Some(true));
        assert_eq!(entry.replans, 0);
        let path = entry.path.as_deref().unwrap();
        assert!(verify_path(&maze, path, Cell::new(0, 0), Cell::new(4, 4)).is_ok());
    }
    assert_eq!(dijkstra.cost, astar.cost);
    assert!(astar.expanded <= dijkstra.expanded);

    let expected_winner = if astar.finished_tick < dijkstra.finished_tick {
        Strategy::AStar
    } else {
        Strategy::Dijkstra
    };
    assert_eq!(results.winner().map(|w| w.strategy), Some(expected_winner));
    assert_eq!(results.winner().map(|w| w.rank), Some(1));
}

#[test]
fn closing_leaders_path_at_tick_three_forces_replan() {
    // Play two ticks to find the edge the leader has just crossed.
    let mut scout = Race::new(scenario_config()).unwrap();
    scout.start().unwrap();
    scout.tick().unwrap();
    scout.tick().unwrap();
    let leader = scout.engine(1).unwrap();
    let last = leader.last_expanded().unwrap();
    let path = leader.path_to(last).unwrap();
    assert!(path.len() >= 2);
    let (a, b) = (path[path.len() - 2], path[path.len() - 1]);

    let mut race = Race::new(scenario_config().with_edit(Edit::close(3, a, b))).unwrap();
    race.start().unwrap();
    race.tick().unwrap();
    race.tick().unwrap();
    race.tick().unwrap();
    assert!(!race.maze().is_open(a, b).unwrap());

    let events = race.drain_events();
    assert!(events.contains(&RaceEvent::ReplanScheduled {
        tick: 3,
        entrant: 1,
        strategy: Strategy::AStar,
    }));
    assert_eq!(race.engine(1).unwrap().replans(), 1);

    let results = race.run().unwrap();
    assert_eq!(results.state, RaceState::Finished);
    assert!(results.is_complete());
    assert!(results.entries[1].replans >= 1);
    assert!(results.entries.iter().all(|e| e.optimal == Some(true)));
}

#[test]
fn isolating_the_goal_makes_every_entrant_unreachable() {
    let scout = Race::new(scenario_config()).unwrap();
    let goal = scout.maze().goal();
    let edits: Vec<Edit> = goal
        .neighbors_4()
        .into_iter()
        .filter(|&n| scout.maze().contains(n))
        .map(|n| Edit::close(1, goal, n))
        .collect();

    let mut race = Race::new(scenario_config().with_edits(edits)).unwrap();
    let results = race.run().unwrap();
    assert_eq!(results.state, RaceState::Finished);
    assert!(results.winner().is_none());
    for entry in &results.entries {
        assert_eq!(entry.outcome, RaceOutcome::Unreachable);
        assert_eq!(entry.path, None);
        assert_eq!(entry.optimal, Some(true));
    }
    assert_eq!(race.maze().degree(goal).unwrap(), 0);
}

#[test]
fn reopening_a_wall_lets_a_stalled_race_finish() {
    // Two disconnected halves, bridged once the left half is exhausted.
    let mut maze = Maze::new(1, 4).unwrap();
    maze.set_open(Cell::new(0, 0), Cell::new(0, 1), true).unwrap();
    maze.set_open(Cell::new(0, 2), Cell::new(0, 3), true).unwrap();
    let bridge = Edit::open(3, Cell::new(0, 1), Cell::new(0, 2));

    let mut race = Race::with_maze(maze, RaceConfig::default().with_edit(bridge)).unwrap();
    let results = race.run().unwrap();
    for entry in &results.entries {
        assert_eq!(entry.outcome, RaceOutcome::Found);
        assert_eq!(entry.cost, Some(3));
        assert_eq!(entry.replans, 1);
    }
}

#[test]
fn external_cancellation_aborts_before_any_expansion() {
    let token = CancelToken::new();
    let mut race = Race::new(scenario_config())
        .unwrap()
        .with_cancel_token(token.clone());
    std::thread::spawn(move || token.request_cancel())
        .join()
        .unwrap();

    let results = race.run().unwrap();
    assert_eq!(results.state, RaceState::Aborted);
    assert_eq!(results.ticks, 0);
    assert!(results.entries.iter().all(|e| e.outcome == RaceOutcome::Incomplete));
    assert!(race.drain_events().contains(&RaceEvent::Aborted {
        tick: 0,
        reason: AbortReason::Cancelled,
    }));
    assert_eq!(race.maze().open_edge_count(), 24);
}

#[test]
fn kruskal_generated_race_finishes() {
    let cfg = RaceConfig::new(12, 8)
        .with_seed(9)
        .with_generator(dynmaze_gen::Algorithm::Kruskal);
    let mut race = Race::new(cfg).unwrap();
    let results = race.run().unwrap();
    assert!(results.entries.iter().all(|e| e.is_found()));
}

fn arb_edits(h: i32, w: i32) -> impl proptest::strategy::Strategy<Value = Vec<Edit>> {
    proptest::collection::vec(
        (0u32..40, 0..h, 0..w, any::<bool>(), any::<bool>()),
        0..10,
    )
    .prop_map(move |raw| {
        raw.into_iter()
            .map(|(tick, r, c, south, open)| {
                let a = Cell::new(r, c);
                let b = if south && r + 1 < h {
                    Cell::new(r + 1, c)
                } else if c + 1 < w {
                    Cell::new(r, c + 1)
                } else if r + 1 < h {
                    Cell::new(r + 1, c)
                } else {
                    Cell::new(r - 1, c)
                };
                Edit::new(tick, a, b, open)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn dynamic_races_always_finish_with_consistent_results(
        seed in any::<u64>(),
        edits in arb_edits(6, 6),
    ) {
        let cfg = RaceConfig::new(6, 6).with_seed(seed).with_edits(edits);
        let mut race = Race::new(cfg).unwrap();
        let results = race.run().unwrap();
        prop_assert_eq!(results.state, RaceState::Finished);
        for entry in &results.entries {
            prop_assert_eq!(entry.optimal, Some(true));
            prop_assert_eq!(entry.path.is_some(), entry.outcome == RaceOutcome::Found);
        }
        let mut ranks: Vec<usize> = results.entries.iter().map(|e| e.rank).collect();
        ranks.sort_unstable();
        prop_assert_eq!(ranks, vec![1, 2]);
    }
}
