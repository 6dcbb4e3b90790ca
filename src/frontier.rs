use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct FloatOrd(pub(crate) f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Ordering key: lowest total cost first, then earliest entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenKey {
    total_cost: FloatOrd,
    sequence: u64,
    idx: usize,
}

/// Open set keyed by total cost with first-in tie-break.
///
/// A cell keeps the sequence number it received on first entry when its cost
/// is lowered, so among equal costs the longest-waiting cell wins.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    open_list: BTreeSet<OpenKey>,
    members: HashMap<usize, OpenKey>,
    next_sequence: u64,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.members.len()
    }

    /// Inserts `idx`, or repositions it if already present. Returns true on
    /// first insertion.
    pub(crate) fn push_or_update(&mut self, idx: usize, total_cost: f64) -> bool {
        let total_cost = FloatOrd(total_cost);

        if let Some(key) = self.members.get_mut(&idx) {
            self.open_list.remove(&*key);
            key.total_cost = total_cost;
            self.open_list.insert(*key);
            return false;
        }

        let key = OpenKey {
            total_cost,
            sequence: self.next_sequence,
            idx,
        };
        self.next_sequence += 1;
        self.open_list.insert(key);
        self.members.insert(idx, key);
        true
    }

    pub(crate) fn pop_first(&mut self) -> Option<usize> {
        let key = self.open_list.pop_first()?;
        self.members.remove(&key.idx);
        Some(key.idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_lowest_cost_first() {
        let mut frontier = Frontier::new();
        frontier.push_or_update(10, 6.0);
        frontier.push_or_update(11, 2.0);
        frontier.push_or_update(12, 4.0);

        assert_eq!(frontier.pop_first(), Some(11));
        assert_eq!(frontier.pop_first(), Some(12));
        assert_eq!(frontier.pop_first(), Some(10));
        assert_eq!(frontier.pop_first(), None);
        assert_eq!(frontier.len(), 0);
    }

    #[test]
    fn test_ties_go_to_earliest_entry() {
        let mut frontier = Frontier::new();
        frontier.push_or_update(7, 2.0);
        frontier.push_or_update(3, 2.0);
        frontier.push_or_update(5, 2.0);

        assert_eq!(frontier.pop_first(), Some(7));
        assert_eq!(frontier.pop_first(), Some(3));
        assert_eq!(frontier.pop_first(), Some(5));
    }

    #[test]
    fn test_update_keeps_entry_order() {
        let mut frontier = Frontier::new();
        assert!(frontier.push_or_update(1, 5.0));
        assert!(frontier.push_or_update(2, 1.0));
        assert!(!frontier.push_or_update(1, 1.0));

        assert_eq!(frontier.len(), 2);
        // Both cost 1.0 now; 1 entered first.
        assert_eq!(frontier.pop_first(), Some(1));
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.pop_first(), Some(2));
    }

    #[test]
    fn test_infinite_cost_sorts_last() {
        let mut frontier = Frontier::new();
        frontier.push_or_update(0, f64::INFINITY);
        frontier.push_or_update(1, 1e300);
        assert_eq!(frontier.pop_first(), Some(1));
        assert_eq!(frontier.pop_first(), Some(0));
    }
}
