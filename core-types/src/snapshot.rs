use serde::{Deserialize, Serialize};

/// Occupancy of every monitored slot at one instant.
///
/// Immutable once captured. Producers that sample continuously are expected
/// to build a fresh snapshot and swap it in whole (see the engine's shared
/// cell), never to mutate one in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancySnapshot {
    slots: Vec<bool>,
}

impl OccupancySnapshot {
    pub fn new(slots: Vec<bool>) -> Self {
        Self { slots }
    }

    /// A snapshot with every slot free.
    pub fn all_free(slot_count: usize) -> Self {
        Self {
            slots: vec![false; slot_count],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[bool] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.slots.get(index).copied()
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|occupied| **occupied).count()
    }

    /// Integer percent of slots occupied, `100 * occupied / len`.
    ///
    /// An empty snapshot reports 0 rather than dividing by zero.
    pub fn percent_full(&self) -> u32 {
        if self.slots.is_empty() {
            return 0;
        }
        (100 * self.occupied_count() / self.slots.len()) as u32
    }
}

impl From<Vec<bool>> for OccupancySnapshot {
    fn from(slots: Vec<bool>) -> Self {
        Self::new(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_full_is_integer_division() {
        let snapshot = OccupancySnapshot::new(vec![true, true, false]);
        assert_eq!(snapshot.occupied_count(), 2);
        assert_eq!(snapshot.percent_full(), 66);
    }

    #[test]
    fn empty_snapshot_reports_zero() {
        let snapshot = OccupancySnapshot::new(Vec::new());
        assert_eq!(snapshot.percent_full(), 0);
    }

    #[test]
    fn all_free_has_no_occupancy() {
        let snapshot = OccupancySnapshot::all_free(25);
        assert_eq!(snapshot.len(), 25);
        assert_eq!(snapshot.occupied_count(), 0);
    }
}
