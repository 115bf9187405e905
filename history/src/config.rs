use std::{
    fs,
    path::{Path, PathBuf},
};

use core_types::TimeSlotCatalog;

use crate::error::Result;

/// Days retained before the oldest is evicted.
pub const DEFAULT_DAY_CAPACITY: usize = 8;
/// Monitored slots per snapshot.
pub const DEFAULT_SLOT_COUNT: usize = 25;

const HISTORY_FILE: &str = "occupancy-history.json";
const PLAIN_TEXT_FILE: &str = "occupancy-history.txt";

/// Construction-supplied configuration for a [`crate::HistoryStore`].
///
/// There is no environment or CLI surface here; the embedding application
/// owns that and passes the resolved values in.
#[derive(Clone)]
pub struct HistoryConfig {
    pub state_dir: PathBuf,
    pub day_capacity: usize,
    pub slot_count: usize,
    pub catalog: TimeSlotCatalog,
}

impl HistoryConfig {
    pub fn new(state_dir: PathBuf, catalog: TimeSlotCatalog) -> Self {
        Self {
            state_dir,
            day_capacity: DEFAULT_DAY_CAPACITY,
            slot_count: DEFAULT_SLOT_COUNT,
            catalog,
        }
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    /// The persisted tree, the store's durable form.
    pub fn history_path(&self) -> PathBuf {
        self.state_dir.join(HISTORY_FILE)
    }

    /// The companion human-readable export; written, never parsed back.
    pub fn plain_text_path(&self) -> PathBuf {
        self.state_dir.join(PLAIN_TEXT_FILE)
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        if !self.state_dir.exists() {
            fs::create_dir_all(&self.state_dir)?;
        }
        Ok(())
    }
}
