use std::sync::Arc;

use core_types::OccupancySnapshot;
use parking_lot::RwLock;

/// Atomically-swapped handle to the latest complete snapshot.
///
/// The sampling source publishes whole immutable snapshots; readers always
/// observe a consistent one. There is no in-place mutation path.
#[derive(Clone, Default)]
pub struct SharedSnapshot {
    inner: Arc<RwLock<Option<Arc<OccupancySnapshot>>>>,
}

impl SharedSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, snapshot: Arc<OccupancySnapshot>) {
        *self.inner.write() = Some(snapshot);
    }

    pub fn latest(&self) -> Option<Arc<OccupancySnapshot>> {
        self.inner.read().clone()
    }

    /// Current summary metric, when anything has been published yet.
    pub fn percent_full(&self) -> Option<u32> {
        self.inner.read().as_ref().map(|s| s.percent_full())
    }
}
