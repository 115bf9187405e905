use std::path::PathBuf;

use chrono::NaiveDateTime;
use core_types::OccupancySnapshot;
use parking_lot::Mutex;

use crate::{
    config::HistoryConfig,
    day::{Day, TimeSlotRecord},
    document,
    error::{Result, StoreError},
    render,
};

/// Fixed-capacity, time-indexed store of occupancy history.
///
/// At most `day_capacity` days are retained, oldest evicted first. Every
/// mutation is written through to the persisted tree before the in-memory
/// state is updated, so a failed write leaves both the file and the store
/// as they were. Reporting reads re-hydrate from disk so they reflect the
/// latest durable state even if another process rewrote the file.
///
/// All public methods are internally serialized; concurrent stimuli (a
/// manual day import racing the sampling loop) cannot interleave mid-write.
pub struct HistoryStore {
    config: HistoryConfig,
    days: Mutex<Vec<Day>>,
}

impl HistoryStore {
    /// Opens the store, hydrating from the persisted tree when one exists.
    pub fn open(mut config: HistoryConfig) -> Result<Self> {
        // Capacity below one cannot hold today's day.
        config.day_capacity = config.day_capacity.max(1);
        config.ensure_dirs()?;
        let days = document::read(&config.history_path(), config.slot_count)?;
        log::info!(
            "occupancy history opened with {} recorded day(s) at {}",
            days.len(),
            config.history_path().display()
        );
        Ok(Self {
            config,
            days: Mutex::new(days),
        })
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// In-memory view of the recorded days, oldest first.
    pub fn days(&self) -> Vec<Day> {
        self.days.lock().clone()
    }

    /// Records one snapshot against the time slot nearest-but-not-exceeding
    /// `now`, creating today's day on demand.
    ///
    /// Two calls within the same labeled window both append; the caller is
    /// responsible for at-most-once-per-slot invocation (the engine's slot
    /// boundary gate).
    pub fn append_sample(&self, snapshot: &OccupancySnapshot, now: NaiveDateTime) -> Result<()> {
        self.validate_snapshot(snapshot)?;
        let slot = self
            .config
            .catalog
            .slot_at_or_before(now.time())
            // Samples before the first catalog entry clamp to it.
            .unwrap_or(0);
        let label = self
            .config
            .catalog
            .label(slot)
            .expect("slot index within catalog");

        let mut days = self.days.lock();
        let mut candidate = days.clone();
        let today = now.date();
        if candidate.last().map(|day| day.date) != Some(today) {
            candidate.push(Day::new(today));
            while candidate.len() > self.config.day_capacity {
                candidate.remove(0);
            }
        }
        candidate
            .last_mut()
            .expect("today's day exists after insertion")
            .push(TimeSlotRecord::new(label, snapshot.clone()));

        self.persist(&candidate)?;
        *days = candidate;
        Ok(())
    }

    /// Replaces the entire store contents with `days`.
    ///
    /// Oversized input is rejected rather than silently truncated, to
    /// surface caller bugs.
    pub fn commit_week(&self, incoming: Vec<Day>) -> Result<()> {
        if incoming.len() > self.config.day_capacity {
            return Err(StoreError::CapacityExceeded {
                offered: incoming.len(),
                capacity: self.config.day_capacity,
            });
        }
        for day in &incoming {
            self.validate_day(day)?;
        }
        let mut days = self.days.lock();
        self.persist(&incoming)?;
        *days = incoming;
        Ok(())
    }

    /// Appends one fully-populated day, evicting the oldest first when the
    /// store is at capacity.
    pub fn append_day(&self, day: Day) -> Result<()> {
        self.validate_day(&day)?;
        let mut days = self.days.lock();
        let mut candidate = days.clone();
        while candidate.len() >= self.config.day_capacity {
            candidate.remove(0);
        }
        candidate.push(day);
        self.persist(&candidate)?;
        *days = candidate;
        Ok(())
    }

    /// Percent full per day and time slot, `100 * occupied / slot_count`.
    pub fn percentages(&self) -> Result<Vec<Vec<f64>>> {
        let days = self.rehydrate()?;
        let slot_count = self.config.slot_count.max(1) as f64;
        Ok(days
            .iter()
            .map(|day| {
                day.records
                    .iter()
                    .map(|record| 100.0 * record.snapshot.occupied_count() as f64 / slot_count)
                    .collect()
            })
            .collect())
    }

    /// Integer percent full for one recorded day, 0 = most recent.
    ///
    /// An offset past the oldest recorded day clamps to the oldest; the
    /// presentation layer must never crash on a bad offset. An empty store
    /// yields an empty row.
    pub fn day_percentages(&self, days_ago: usize) -> Result<Vec<u32>> {
        let days = self.rehydrate()?;
        Ok(clamped_day(&days, days_ago)
            .map(Day::percent_rows)
            .unwrap_or_default())
    }

    /// Re-hydrated copy of every recorded day.
    pub fn week_raw(&self) -> Result<Vec<Day>> {
        self.rehydrate()
    }

    /// Re-hydrated copy of one recorded day, with the same clamp policy as
    /// [`Self::day_percentages`]. `None` only when nothing is recorded.
    pub fn day_raw(&self, days_ago: usize) -> Result<Option<Day>> {
        let days = self.rehydrate()?;
        Ok(clamped_day(&days, days_ago).cloned())
    }

    /// Fixed-column table of the recorded history. Pure read.
    pub fn render_plain_text(&self) -> Result<String> {
        let days = self.rehydrate()?;
        Ok(render::render(&days, self.config.slot_count))
    }

    /// Writes the plain-text table to the configured companion path.
    ///
    /// The export is write-only; nothing ever parses it back.
    pub fn export_plain_text(&self) -> Result<PathBuf> {
        let path = self.config.plain_text_path();
        let table = self.render_plain_text()?;
        std::fs::write(&path, table).map_err(|err| {
            log::error!("failed to export plain-text history: {err}");
            StoreError::Io(err)
        })?;
        Ok(path)
    }

    fn validate_snapshot(&self, snapshot: &OccupancySnapshot) -> Result<()> {
        if snapshot.len() != self.config.slot_count {
            return Err(StoreError::ShapeMismatch {
                expected: self.config.slot_count,
                actual: snapshot.len(),
            });
        }
        Ok(())
    }

    fn validate_day(&self, day: &Day) -> Result<()> {
        day.records
            .iter()
            .try_for_each(|record| self.validate_snapshot(&record.snapshot))
    }

    fn persist(&self, days: &[Day]) -> Result<()> {
        document::write_atomic(&self.config.history_path(), days).map_err(|err| {
            log::error!("failed to persist occupancy history: {err}");
            err
        })
    }

    fn rehydrate(&self) -> Result<Vec<Day>> {
        document::read(&self.config.history_path(), self.config.slot_count).map_err(|err| {
            log::error!("failed to hydrate occupancy history: {err}");
            err
        })
    }
}

/// `len - 1 - days_ago`, clamped to the oldest day on underflow.
fn clamped_day(days: &[Day], days_ago: usize) -> Option<&Day> {
    if days.is_empty() {
        return None;
    }
    let index = days.len().checked_sub(1 + days_ago).unwrap_or(0);
    days.get(index)
}
