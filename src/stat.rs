use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub expanded_nodes: usize,
    pub relaxed_nodes: usize,
    pub max_open_nodes: usize,
    pub time_us: u128,
    pub path_len: usize,
}

impl Stats {
    pub fn print(&self) {
        info!(
            "Path length {:?} Time(microseconds) {:?} Expanded nodes: {:?} Relaxed nodes: {:?} Peak open nodes: {:?}",
            self.path_len, self.time_us, self.expanded_nodes, self.relaxed_nodes, self.max_open_nodes
        );
    }
}
