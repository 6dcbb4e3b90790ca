mod astar;

pub use astar::{find_path, find_path_with, solve};

use serde::{Deserialize, Serialize};

use crate::cell::Metric;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub metric: Metric,
    /// Upper bound on expansions; `None` searches until the open set is empty.
    pub max_expansions: Option<usize>,
}

impl SearchOptions {
    pub fn with_metric(metric: Metric) -> Self {
        SearchOptions {
            metric,
            ..Default::default()
        }
    }
}
