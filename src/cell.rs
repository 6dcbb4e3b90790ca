use serde::{Deserialize, Serialize};

use crate::common::Position;

/// Cost model used for step costs and the goal estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Squared distance for both the heuristic and the step cost, with the
    /// step cost taken from the current cell only (not summed along the path).
    #[default]
    Legacy,
    /// Euclidean step length accumulated along the path, Euclidean estimate.
    Euclidean,
}

impl Metric {
    pub fn distance(self, a: Position, b: Position) -> f64 {
        match self {
            Metric::Legacy => squared_distance(a, b),
            Metric::Euclidean => squared_distance(a, b).sqrt(),
        }
    }

    /// Candidate cost-so-far for `to` when reached from `from`.
    pub fn step_cost(self, from: Position, from_cost: f64, to: Position) -> f64 {
        match self {
            Metric::Legacy => squared_distance(from, to),
            Metric::Euclidean => from_cost + self.distance(from, to),
        }
    }
}

pub fn squared_distance(a: Position, b: Position) -> f64 {
    let dx = a.0.abs_diff(b.0) as f64;
    let dy = a.1.abs_diff(b.1) as f64;
    dx * dx + dy * dy
}

#[derive(Debug, Clone)]
pub struct Cell {
    position: Position,
    walkable: bool,
    cost_so_far: f64,
    heuristic: f64,
    total_cost: f64,
    parent: Option<Position>,
    closed: bool,
}

impl Cell {
    pub fn new(position: Position, walkable: bool) -> Self {
        Cell {
            position,
            walkable,
            cost_so_far: f64::INFINITY,
            heuristic: f64::INFINITY,
            total_cost: f64::INFINITY,
            parent: None,
            closed: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_walkable(&self) -> bool {
        self.walkable
    }

    pub fn cost_so_far(&self) -> f64 {
        self.cost_so_far
    }

    pub fn heuristic(&self) -> f64 {
        self.heuristic
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn parent(&self) -> Option<Position> {
        self.parent
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Overwrites g. `total_cost` is stale until `compute_total_cost` runs.
    pub fn set_cost_so_far(&mut self, value: f64) {
        self.cost_so_far = value;
    }

    pub fn set_heuristic(&mut self, value: f64) {
        self.heuristic = value;
    }

    pub fn compute_heuristic(&mut self, target: Position) {
        self.compute_heuristic_with(target, Metric::Legacy);
    }

    pub fn compute_heuristic_with(&mut self, target: Position, metric: Metric) {
        self.heuristic = metric.distance(self.position, target);
    }

    pub fn compute_total_cost(&mut self) {
        self.total_cost = self.cost_so_far + self.heuristic;
    }

    pub fn set_parent(&mut self, parent: Position) {
        self.parent = Some(parent);
    }

    pub fn close(&mut self) {
        debug_assert!(!self.closed, "cell {:?} closed twice", self.position);
        self.closed = true;
    }

    /// Drops all search state, keeping position and walkability.
    pub fn reset(&mut self) {
        *self = Cell::new(self.position, self.walkable);
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for Cell {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_unreached() {
        let cell = Cell::new((3, 4), true);
        assert_eq!(cell.position(), (3, 4));
        assert!(cell.is_walkable());
        assert!(cell.cost_so_far().is_infinite());
        assert!(cell.heuristic().is_infinite());
        assert!(cell.total_cost().is_infinite());
        assert_eq!(cell.parent(), None);
        assert!(!cell.is_closed());
    }

    #[test]
    fn test_heuristic_is_squared_distance() {
        let mut cell = Cell::new((1, 1), true);
        cell.compute_heuristic((4, 5));
        assert_eq!(cell.heuristic(), 25.0);

        cell.compute_heuristic_with((4, 5), Metric::Euclidean);
        assert_eq!(cell.heuristic(), 5.0);
    }

    #[test]
    fn test_total_cost_tracks_mutations() {
        let mut cell = Cell::new((0, 0), true);
        cell.compute_heuristic((2, 2));
        for g in [0.0, 7.0, 2.0, 1.0] {
            cell.set_cost_so_far(g);
            cell.compute_total_cost();
            assert_eq!(cell.total_cost(), g + cell.heuristic());
        }

        cell.set_cost_so_far(1.5);
        cell.compute_heuristic_with((3, 4), Metric::Euclidean);
        cell.compute_total_cost();
        assert_eq!(cell.total_cost(), 1.5 + 5.0);
    }

    #[test]
    fn test_equality_by_position_only() {
        let mut a = Cell::new((2, 3), true);
        let b = Cell::new((2, 3), false);
        a.set_cost_so_far(4.0);
        a.set_parent((1, 3));
        assert_eq!(a, b);
        assert_ne!(a, Cell::new((3, 2), true));
    }

    #[test]
    fn test_reset_keeps_identity() {
        let mut cell = Cell::new((5, 6), false);
        cell.set_cost_so_far(0.0);
        cell.compute_heuristic((0, 0));
        cell.compute_total_cost();
        cell.set_parent((5, 5));
        cell.close();

        cell.reset();
        assert_eq!(cell.position(), (5, 6));
        assert!(!cell.is_walkable());
        assert!(cell.cost_so_far().is_infinite());
        assert_eq!(cell.parent(), None);
        assert!(!cell.is_closed());
    }

    #[test]
    fn test_step_cost() {
        assert_eq!(Metric::Legacy.step_cost((1, 1), 10.0, (2, 2)), 2.0);
        assert_eq!(Metric::Legacy.step_cost((1, 1), 10.0, (1, 2)), 1.0);
        assert_eq!(Metric::Euclidean.step_cost((1, 1), 10.0, (1, 2)), 11.0);
        assert_eq!(
            Metric::Euclidean.step_cost((1, 1), 1.0, (2, 2)),
            1.0 + std::f64::consts::SQRT_2
        );
    }
}
