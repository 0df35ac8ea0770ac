use dynmaze_core::{Cell, Maze};
use dynmaze_gen::{Algorithm, MazeGen, generate, is_perfect};
use proptest::prelude::*;

fn algorithm() -> impl Strategy<Value = Algorithm> {
    prop_oneof![Just(Algorithm::Prim), Just(Algorithm::Kruskal)]
}

proptest! {
    #[test]
    fn generated_mazes_are_spanning_trees(
        h in 1i32..24,
        w in 1i32..24,
        seed in any::<u64>(),
        alg in algorithm(),
    ) {
        let (maze, used) = generate(h, w, Some(seed), alg).unwrap();
        prop_assert_eq!(used, seed);
        prop_assert_eq!(maze.open_edge_count(), (h * w - 1) as usize);
        prop_assert!(is_perfect(&maze));
    }

    #[test]
    fn generation_is_deterministic(
        h in 1i32..16,
        w in 1i32..16,
        seed in any::<u64>(),
        alg in algorithm(),
    ) {
        let (a, _) = generate(h, w, Some(seed), alg).unwrap();
        let (b, _) = generate(h, w, Some(seed), alg).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prim_from_any_root_is_perfect(
        h in 1i32..12,
        w in 1i32..12,
        seed in any::<u64>(),
        r in 0i32..12,
        c in 0i32..12,
    ) {
        let root = Cell::new(r % h, c % w);
        let mut mg = MazeGen::seeded(Maze::new(h, w).unwrap(), seed);
        prop_assert_eq!(mg.prim(root).unwrap(), (h * w - 1) as usize);
        prop_assert!(is_perfect(&mg.maze));
    }
}

#[test]
fn regenerating_discards_previous_walls() {
    let mut full = Maze::new(6, 6).unwrap();
    for c in full.dims().iter() {
        for n in [c.shift(0, 1), c.shift(1, 0)] {
            if full.contains(n) {
                full.set_open(c, n, true).unwrap();
            }
        }
    }
    let mut mg = MazeGen::seeded(full, 42);
    mg.generate(Algorithm::Kruskal).unwrap();
    assert!(is_perfect(&mg.maze));
}

#[test]
fn invalid_dimensions_are_rejected() {
    assert!(generate(0, 5, Some(1), Algorithm::Prim).is_err());
    assert!(generate(5, -1, Some(1), Algorithm::Kruskal).is_err());
}

#[cfg(feature = "serde")]
#[test]
fn algorithm_serde() {
    let json = serde_json::to_string(&Algorithm::Kruskal).unwrap();
    let back: Algorithm = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Algorithm::Kruskal);
}
