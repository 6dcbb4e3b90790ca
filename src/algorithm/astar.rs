use super::SearchOptions;
use crate::common::{Path, Position, Task};
use crate::error::{Error, Result};
use crate::frontier::Frontier;
use crate::map::Map;
use crate::stat::Stats;

use std::time::Instant;
use tracing::{debug, instrument, trace};

/// Runs the search with default options. See [`find_path_with`].
pub fn find_path(map: &mut Map, start: Position, goal: Position) -> Result<Stats> {
    find_path_with(map, start, goal, &SearchOptions::default())
}

/// Best-first search from `start` until `goal` is closed.
///
/// Cell state is left in `map`; the route is read back by following parent
/// links from the goal (see [`Map::reconstruct_path`]). The grid is reset and
/// the start cell seeded before searching, so a map can be searched repeatedly.
#[instrument(skip_all, name = "a_star", fields(start = format!("{start:?}"), goal = format!("{goal:?}"), metric = ?options.metric), level = "debug")]
pub fn find_path_with(
    map: &mut Map,
    start: Position,
    goal: Position,
    options: &SearchOptions,
) -> Result<Stats> {
    let search_start_time = Instant::now();
    let metric = options.metric;
    let start_idx = map.check(start)?;
    let goal_idx = map.check(goal)?;
    map.prepare(start, goal, metric)?;

    let mut stats = Stats::default();
    let mut frontier = Frontier::new();
    frontier.push_or_update(start_idx, map.cell_at(start_idx).total_cost());

    while !map.cell_at(goal_idx).is_closed() {
        if let Some(limit) = options.max_expansions {
            if stats.expanded_nodes >= limit {
                debug!("expansion budget {limit} exhausted");
                return Err(Error::BudgetExhausted {
                    expansions: stats.expanded_nodes,
                });
            }
        }

        let Some(current_idx) = frontier.pop_first() else {
            debug!("cannot find solution");
            return Err(Error::NoPathFound { start, goal });
        };

        let current = map.cell_at_mut(current_idx);
        current.close();
        let position = current.position();
        let cost_so_far = current.cost_so_far();
        trace!("expand node: {position:?} f {}", current.total_cost());

        // Update stats.
        stats.expanded_nodes += 1;

        for neighbor in map.get_neighbors(position) {
            let neighbor_idx = map.check(neighbor)?;
            let cell = map.cell_at_mut(neighbor_idx);

            // Skip obstacles and finalized cells.
            if !cell.is_walkable() || cell.is_closed() {
                continue;
            }

            let candidate = metric.step_cost(position, cost_so_far, neighbor);
            if candidate < cell.cost_so_far() {
                cell.set_cost_so_far(candidate);
                cell.compute_heuristic_with(goal, metric);
                cell.compute_total_cost();
                cell.set_parent(position);
                frontier.push_or_update(neighbor_idx, cell.total_cost());
                stats.relaxed_nodes += 1;
            }
        }

        stats.max_open_nodes = stats.max_open_nodes.max(frontier.len());
    }

    stats.time_us = search_start_time.elapsed().as_micros();
    debug!(
        "goal closed after {} expansions, {} cells still open",
        stats.expanded_nodes,
        frontier.len()
    );
    Ok(stats)
}

/// Searches and reconstructs the start-to-goal path in one go.
pub fn solve(map: &mut Map, task: &Task, options: &SearchOptions) -> Result<(Path, Stats)> {
    let mut stats = find_path_with(map, task.start, task.goal, options)?;
    let path = map.reconstruct_path(task.start, task.goal)?;
    stats.path_len = path.len();
    Ok((path, stats))
}
