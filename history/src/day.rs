use chrono::NaiveDate;
use core_types::OccupancySnapshot;

/// One snapshot tagged with the catalog label of the window it was taken in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeSlotRecord {
    pub label: String,
    pub snapshot: OccupancySnapshot,
}

impl TimeSlotRecord {
    pub fn new(label: impl Into<String>, snapshot: OccupancySnapshot) -> Self {
        Self {
            label: label.into(),
            snapshot,
        }
    }
}

/// One calendar day's recorded time slots, oldest first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Day {
    pub date: NaiveDate,
    pub records: Vec<TimeSlotRecord>,
}

impl Day {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            records: Vec::new(),
        }
    }

    pub fn with_records(date: NaiveDate, records: Vec<TimeSlotRecord>) -> Self {
        Self { date, records }
    }

    pub fn push(&mut self, record: TimeSlotRecord) {
        self.records.push(record);
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Integer percent full per recorded slot, in record order.
    pub fn percent_rows(&self) -> Vec<u32> {
        self.records
            .iter()
            .map(|record| record.snapshot.percent_full())
            .collect()
    }
}
