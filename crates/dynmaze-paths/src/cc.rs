//! Connected-component labelling.

use dynmaze_core::Cell;

use crate::scan::GraphScan;
use crate::traits::Pather;

impl GraphScan {
    /// Label every cell with a connected-component ID and return the number
    /// of components.
    ///
    /// Two cells belong to the same component if there is a path of open
    /// walls between them. After this call use [`cc_at`](Self::cc_at) to
    /// query the label of a given cell.
    pub fn cc_map_all<P: Pather>(&mut self, pather: &P) -> usize {
        let len = self.dims.len();
        self.cc_labels.fill(-1);

        let mut label: i32 = 0;
        let mut nbuf = std::mem::take(&mut self.nbuf);

        for start in 0..len {
            if self.cc_labels[start] >= 0 {
                continue;
            }

            // Iterative DFS from `start`.
            self.cc_stack.clear();
            self.cc_stack.push(start);
            self.cc_labels[start] = label;

            while let Some(ci) = self.cc_stack.pop() {
                let cp = self.dims.cell(ci);
                nbuf.clear();
                pather.neighbors(cp, &mut nbuf);

                for &np in nbuf.iter() {
                    if let Some(ni) = self.dims.index(np) {
                        if self.cc_labels[ni] < 0 {
                            self.cc_labels[ni] = label;
                            self.cc_stack.push(ni);
                        }
                    }
                }
            }

            label += 1;
        }

        self.nbuf = nbuf;
        label as usize
    }

    /// Flood-fill from a single cell and return the cells connected to it,
    /// in discovery order.
    pub fn cc_map<P: Pather>(&mut self, pather: &P, c: Cell) -> Vec<Cell> {
        self.cc_labels.fill(-1);

        let mut result = Vec::new();
        let Some(si) = self.dims.index(c) else {
            return result;
        };

        let mut nbuf = std::mem::take(&mut self.nbuf);

        self.cc_stack.clear();
        self.cc_stack.push(si);
        self.cc_labels[si] = 0;
        result.push(c);

        while let Some(ci) = self.cc_stack.pop() {
            let cp = self.dims.cell(ci);
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                if let Some(ni) = self.dims.index(np) {
                    if self.cc_labels[ni] < 0 {
                        self.cc_labels[ni] = 0;
                        self.cc_stack.push(ni);
                        result.push(np);
                    }
                }
            }
        }

        self.nbuf = nbuf;
        result
    }

    /// Query the connected-component label of a cell.
    ///
    /// Returns `None` if the cell is outside the grid or was not labelled
    /// by the last `cc_map_all` / `cc_map` call.
    pub fn cc_at(&self, c: Cell) -> Option<usize> {
        let i = self.dims.index(c)?;
        let label = self.cc_labels[i];
        if label < 0 { None } else { Some(label as usize) }
    }

    /// Whether every cell is reachable from every other cell.
    pub fn is_connected<P: Pather>(&mut self, pather: &P) -> bool {
        self.cc_map_all(pather) <= 1
    }

    /// Whether `a` and `b` lie in the same component.
    pub fn same_component<P: Pather>(&mut self, pather: &P, a: Cell, b: Cell) -> bool {
        if !self.dims.contains(a) || !self.dims.contains(b) {
            return false;
        }
        self.cc_map(pather, a);
        self.cc_at(b).is_some()
    }
}
