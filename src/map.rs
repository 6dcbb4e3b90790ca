use std::fs::File;
use std::io::{BufRead, BufReader};

use tracing::debug;

use crate::cell::{Cell, Metric};
use crate::common::{Path, Position};
use crate::error::{Error, Result};

/// Dense grid of cells stored row-major, addressed by `(x, y)`.
#[derive(Debug, Clone)]
pub struct Map {
    pub height: usize,
    pub width: usize,
    cells: Vec<Cell>,
}

impl Map {
    pub fn from_fn(
        width: usize,
        height: usize,
        mut walkable: impl FnMut(Position) -> bool,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidGrid {
                reason: format!("grid must not be empty, got {width}x{height}"),
            });
        }

        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new((x, y), walkable((x, y))));
            }
        }

        Ok(Map {
            height,
            width,
            cells,
        })
    }

    /// Obstacle-free grid.
    pub fn open(width: usize, height: usize) -> Result<Self> {
        Self::from_fn(width, height, |_| true)
    }

    /// Builds a grid from an occupancy mask given as rows, `rows[y][x]`.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some(y) = rows.iter().position(|row| row.len() != width) {
            return Err(Error::InvalidGrid {
                reason: format!(
                    "row {y} has {} cells, expected {width}",
                    rows[y].len()
                ),
            });
        }
        Self::from_fn(width, height, |(x, y)| rows[y][x])
    }

    /// Reads a text map:
    ///
    /// ```text
    /// type octile
    /// height 3
    /// width 3
    /// map
    /// ...
    /// .@.
    /// ...
    /// ```
    ///
    /// `.`, `G` and `S` are walkable, every other character is an obstacle.
    pub fn from_file(path: &str) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let lines = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
        debug!("read map {path}: {} lines", lines.len());
        Self::parse_map(&lines)
    }

    pub fn from_map_str(text: &str) -> Result<Self> {
        let lines: Vec<String> = text.lines().map(str::to_owned).collect();
        Self::parse_map(&lines)
    }

    fn parse_map(lines: &[String]) -> Result<Self> {
        let mut lines = lines.iter();

        let _type = lines.next().ok_or_else(|| missing_header("type"))?;
        let height = parse_header(lines.next(), "height")?;
        let width = parse_header(lines.next(), "width")?;
        let _map = lines.next().ok_or_else(|| missing_header("map"))?;

        let rows: Vec<Vec<bool>> = lines
            .take(height)
            .map(|line| {
                line.trim_end()
                    .chars()
                    .map(|ch| matches!(ch, '.' | 'G' | 'S'))
                    .collect()
            })
            .collect();

        if rows.len() != height {
            return Err(Error::InvalidGrid {
                reason: format!("expected {height} rows, found {}", rows.len()),
            });
        }
        if let Some(y) = rows.iter().position(|row| row.len() != width) {
            return Err(Error::InvalidGrid {
                reason: format!(
                    "row {y} has {} cells, expected {width}",
                    rows[y].len()
                ),
            });
        }

        Self::from_rows(&rows)
    }

    pub fn contains(&self, position: Position) -> bool {
        position.0 < self.width && position.1 < self.height
    }

    fn idx(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.1 * self.width + position.0)
    }

    /// Arena index of `position`, or `OutOfBounds`.
    pub fn check(&self, position: Position) -> Result<usize> {
        self.idx(position).ok_or(Error::OutOfBounds {
            position,
            width: self.width,
            height: self.height,
        })
    }

    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.idx(position).map(|idx| &self.cells[idx])
    }

    pub fn cell_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.idx(position).map(move |idx| &mut self.cells[idx])
    }

    pub(crate) fn cell_at(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    pub(crate) fn cell_at_mut(&mut self, idx: usize) -> &mut Cell {
        &mut self.cells[idx]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn is_passable(&self, x: usize, y: usize) -> bool {
        self.cell((x, y)).is_some_and(Cell::is_walkable)
    }

    /// In-bounds 8-neighbors of `position`, row offset outer, column offset
    /// inner. Search tie-breaks depend on this order.
    pub fn get_neighbors(&self, position: Position) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(8);
        let (x, y) = (position.0 as isize, position.1 as isize);

        for dy in -1..=1 {
            let new_y = y + dy;
            if new_y < 0 || new_y >= self.height as isize {
                continue;
            }
            for dx in -1..=1 {
                let new_x = x + dx;
                if new_x < 0 || new_x >= self.width as isize {
                    continue;
                }
                if (dx, dy) == (0, 0) {
                    continue;
                }
                neighbors.push((new_x as usize, new_y as usize));
            }
        }

        neighbors
    }

    /// Clears every cell's search state.
    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset);
    }

    /// Resets the grid and seeds the start cell: g = 0, h and f relative to
    /// `goal`.
    pub fn prepare(&mut self, start: Position, goal: Position, metric: Metric) -> Result<()> {
        let start_idx = self.check(start)?;
        self.check(goal)?;
        self.reset();

        let start_cell = &mut self.cells[start_idx];
        start_cell.set_cost_so_far(0.0);
        start_cell.compute_heuristic_with(goal, metric);
        start_cell.compute_total_cost();
        Ok(())
    }

    /// Parent chain from `goal` back to the root of the search tree, goal
    /// first.
    pub fn trace_back(&self, goal: Position) -> Result<Vec<Position>> {
        let mut current = Some(self.check(goal).map(|_| goal)?);
        let mut chain = Vec::new();

        while let Some(position) = current {
            // A chain longer than the grid would mean a cycle.
            if chain.len() == self.cells.len() {
                return Err(Error::InvalidGrid {
                    reason: format!("parent chain from {goal:?} does not terminate"),
                });
            }
            chain.push(position);
            let idx = self.check(position)?;
            current = self.cells[idx].parent();
        }

        Ok(chain)
    }

    /// Start-to-goal path recovered from parent links after a search.
    pub fn reconstruct_path(&self, start: Position, goal: Position) -> Result<Path> {
        self.check(start)?;
        let mut steps = self.trace_back(goal)?;
        if steps.last() != Some(&start) {
            return Err(Error::NoPathFound { start, goal });
        }
        steps.reverse();
        Ok(Path { steps })
    }
}

fn missing_header(field: &str) -> Error {
    Error::InvalidGrid {
        reason: format!("missing `{field}` header line"),
    }
}

fn parse_header(line: Option<&String>, field: &str) -> Result<usize> {
    let line = line.ok_or_else(|| missing_header(field))?;
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next().map(str::parse::<usize>)) {
        (Some(name), Some(Ok(value))) if name == field => Ok(value),
        _ => Err(Error::InvalidGrid {
            reason: format!("malformed `{field}` header: {line:?}"),
        }),
    }
}
