//! Scheduled wall edits applied between race ticks.

use dynmaze_core::{Cell, Maze, MazeError};

use crate::config::Edit;

/// A wall edit that has been applied to the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppliedEdit {
    pub edit: Edit,
    /// Whether the wall actually changed state.
    pub changed: bool,
    /// Cells whose optimal-path membership may be affected.
    pub hint: [Cell; 2],
}

/// Applies a bounded schedule of wall edits to a maze.
///
/// The mutator never enforces connectivity: an edit may cut `start` off
/// from `goal`, which the race handles as an unreachable outcome.
#[derive(Clone, Debug, Default)]
pub struct Mutator {
    /// Sorted by tick; equal ticks keep their configured order.
    schedule: Vec<Edit>,
    cursor: usize,
    applied: usize,
}

impl Mutator {
    pub fn new(edits: impl IntoIterator<Item = Edit>) -> Self {
        let mut schedule: Vec<Edit> = edits.into_iter().collect();
        schedule.sort_by_key(|e| e.tick);
        Self {
            schedule,
            cursor: 0,
            applied: 0,
        }
    }

    /// Open or close the wall between `a` and `b`.
    ///
    /// Returns the two endpoints as an invalidation hint.
    pub fn apply_edit(
        &mut self,
        maze: &mut Maze,
        a: Cell,
        b: Cell,
        open: bool,
    ) -> Result<[Cell; 2], MazeError> {
        maze.set_open(a, b, open)?;
        self.applied += 1;
        Ok([a, b])
    }

    /// Apply every scheduled edit due at or before `tick` that has not been
    /// applied yet, in schedule order.
    pub fn apply_due(&mut self, maze: &mut Maze, tick: u32) -> Result<Vec<AppliedEdit>, MazeError> {
        let mut out = Vec::new();
        while let Some(&edit) = self.schedule.get(self.cursor) {
            if edit.tick > tick {
                break;
            }
            let before = maze.is_open(edit.a, edit.b)?;
            let hint = self.apply_edit(maze, edit.a, edit.b, edit.open)?;
            self.cursor += 1;
            log::debug!(
                "tick {tick}: {} wall {} - {}",
                if edit.open { "opened" } else { "closed" },
                edit.a,
                edit.b
            );
            out.push(AppliedEdit {
                edit,
                changed: before != edit.open,
                hint,
            });
        }
        Ok(out)
    }

    /// Edits not yet applied.
    pub fn pending(&self) -> &[Edit] {
        &self.schedule[self.cursor..]
    }

    /// Number of edits applied so far.
    pub fn applied(&self) -> usize {
        self.applied
    }
}
