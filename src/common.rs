use serde::{Deserialize, Serialize};

use crate::map::Map;

/// Grid coordinate as `(x, y)`, `x` being the column and `y` the row.
pub type Position = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub start: Position,
    pub goal: Position,
}

impl Task {
    pub fn verify(&self, map: &Map) -> bool {
        map.contains(self.start)
            && map.contains(self.goal)
            && map.is_passable(self.start.0, self.start.1)
            && map.is_passable(self.goal.0, self.goal.1)
    }
}

/// Ordered route from start to goal, both endpoints included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    pub steps: Vec<Position>,
}

impl Path {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn first(&self) -> Option<Position> {
        self.steps.first().copied()
    }

    pub fn last(&self) -> Option<Position> {
        self.steps.last().copied()
    }

    /// Number of moves, i.e. one less than the number of cells.
    pub fn moves(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// A path is valid when it joins the task's endpoints through walkable,
    /// pairwise 8-adjacent cells.
    pub fn verify(&self, map: &Map, task: &Task) -> bool {
        if self.first() != Some(task.start) || self.last() != Some(task.goal) {
            return false;
        }
        if !self
            .steps
            .iter()
            .all(|&(x, y)| map.contains((x, y)) && map.is_passable(x, y))
        {
            return false;
        }
        self.steps.windows(2).all(|pair| {
            let (a, b) = (pair[0], pair[1]);
            a != b && a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1
        })
    }
}
