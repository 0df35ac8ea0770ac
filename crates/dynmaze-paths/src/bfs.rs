use std::collections::VecDeque;

use dynmaze_core::Cell;

use crate::engine::UNREACHABLE;
use crate::scan::GraphScan;
use crate::traits::Pather;

impl GraphScan {
    /// Compute a multi-source breadth-first search distance map.
    ///
    /// Each step has cost 1. On a uniform-cost maze this is the exact
    /// shortest-path distance, which makes it the reference that engine
    /// results are checked against.
    pub fn bfs_map<P: Pather>(&mut self, pather: &P, sources: &[Cell]) -> &[i32] {
        self.bfs_map.fill(UNREACHABLE);

        let mut queue: VecDeque<usize> = VecDeque::new();

        for &src in sources {
            if let Some(si) = self.dims.index(src) {
                if self.bfs_map[si] != UNREACHABLE {
                    continue;
                }
                self.bfs_map[si] = 0;
                queue.push_back(si);
            }
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(ci) = queue.pop_front() {
            let current_dist = self.bfs_map[ci];
            let cp = self.dims.cell(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.dims.index(np) else {
                    continue;
                };
                if self.bfs_map[ni] != UNREACHABLE {
                    continue;
                }
                self.bfs_map[ni] = current_dist + 1;
                queue.push_back(ni);
            }
        }

        self.nbuf = nbuf;
        &self.bfs_map
    }

    /// Query the BFS distance at a specific cell.
    ///
    /// Returns [`UNREACHABLE`] if the cell is outside the grid or was not
    /// reached by the last `bfs_map` call.
    pub fn bfs_at(&self, c: Cell) -> i32 {
        match self.dims.index(c) {
            Some(i) => self.bfs_map[i],
            None => UNREACHABLE,
        }
    }

    /// Shortest number of steps from `from` to `to`, or `None` when the two
    /// cells are disconnected.
    pub fn shortest_distance<P: Pather>(&mut self, pather: &P, from: Cell, to: Cell) -> Option<i32> {
        self.bfs_map(pather, &[from]);
        let d = self.bfs_at(to);
        (d != UNREACHABLE).then_some(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynmaze_core::Maze;

    fn c(row: i32, col: i32) -> Cell {
        Cell::new(row, col)
    }

    #[test]
    fn distances_along_corridor() {
        let mut m = Maze::new(1, 4).unwrap();
        for col in 0..3 {
            m.set_open(c(0, col), c(0, col + 1), true).unwrap();
        }
        let mut scan = GraphScan::new(m.dims());
        assert_eq!(scan.bfs_map(&m, &[c(0, 0)]), &[0, 1, 2, 3]);
        assert_eq!(scan.bfs_map(&m, &[c(0, 0), c(0, 3)]), &[0, 1, 1, 0]);
        assert_eq!(scan.bfs_at(c(0, 9)), UNREACHABLE);
    }

    #[test]
    fn walls_block_distance() {
        let mut m = Maze::new(2, 2).unwrap();
        m.set_open(c(0, 0), c(0, 1), true).unwrap();
        let mut scan = GraphScan::new(m.dims());
        assert_eq!(scan.shortest_distance(&m, c(0, 0), c(0, 1)), Some(1));
        assert_eq!(scan.shortest_distance(&m, c(0, 0), c(1, 1)), None);
        assert_eq!(scan.bfs_at(c(1, 0)), UNREACHABLE);
    }
}
