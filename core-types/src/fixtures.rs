//! Random occupancy generators for tests and demos.

use rand::Rng;

use crate::snapshot::OccupancySnapshot;

/// One snapshot with each slot occupied or free at random.
pub fn random_snapshot(slot_count: usize) -> OccupancySnapshot {
    let mut rng = rand::thread_rng();
    OccupancySnapshot::new((0..slot_count).map(|_| rng.gen_bool(0.5)).collect())
}

/// A full day's grid: one snapshot per time slot.
pub fn random_day_grid(slots_per_day: usize, slot_count: usize) -> Vec<OccupancySnapshot> {
    (0..slots_per_day)
        .map(|_| random_snapshot(slot_count))
        .collect()
}

/// A full week's grid: `days` x `slots_per_day` snapshots.
pub fn random_week_grid(
    days: usize,
    slots_per_day: usize,
    slot_count: usize,
) -> Vec<Vec<OccupancySnapshot>> {
    (0..days)
        .map(|_| random_day_grid(slots_per_day, slot_count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grids_have_requested_shape() {
        let week = random_week_grid(8, 28, 25);
        assert_eq!(week.len(), 8);
        assert!(week.iter().all(|day| day.len() == 28));
        assert!(week
            .iter()
            .flatten()
            .all(|snapshot| snapshot.len() == 25));
    }
}
