use chrono::NaiveTime;
use thiserror::Error;

/// Half-hour sampling schedule covering 7:00 AM through 9:00 PM.
///
/// Taken as-is from the deployment this system records; note the schedule
/// skips 11:30 AM.
pub const DEFAULT_TIME_LABELS: [&str; 28] = [
    "7:00 AM", "7:30 AM", "8:00 AM", "8:30 AM", "9:00 AM", "9:30 AM", "10:00 AM", "10:30 AM",
    "11:00 AM", "12:00 PM", "12:30 PM", "1:00 PM", "1:30 PM", "2:00 PM", "2:30 PM", "3:00 PM",
    "3:30 PM", "4:00 PM", "4:30 PM", "5:00 PM", "5:30 PM", "6:00 PM", "6:30 PM", "7:00 PM",
    "7:30 PM", "8:00 PM", "8:30 PM", "9:00 PM",
];

const LABEL_FORMAT: &str = "%I:%M %p";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("time-slot catalog must contain at least one label")]
    EmptyCatalog,
    #[error("label {label:?} is not a clock time")]
    UnparsableLabel { label: String },
    #[error("label {label:?} is not strictly after the label before it")]
    OutOfOrder { label: String },
}

#[derive(Clone, Debug)]
struct CatalogEntry {
    label: String,
    time: NaiveTime,
}

/// Fixed ordered list of time-of-day labels, the discretized sampling
/// schedule for one day.
#[derive(Clone, Debug)]
pub struct TimeSlotCatalog {
    entries: Vec<CatalogEntry>,
}

impl TimeSlotCatalog {
    /// Builds a catalog from clock labels such as `"7:00 AM"`.
    ///
    /// Labels must parse and be strictly ascending.
    pub fn new<I, S>(labels: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries: Vec<CatalogEntry> = Vec::new();
        for label in labels {
            let label = label.into();
            let time = NaiveTime::parse_from_str(&label, LABEL_FORMAT)
                .map_err(|_| CatalogError::UnparsableLabel {
                    label: label.clone(),
                })?;
            if let Some(last) = entries.last() {
                if time <= last.time {
                    return Err(CatalogError::OutOfOrder { label });
                }
            }
            entries.push(CatalogEntry { label, time });
        }
        if entries.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        Ok(Self { entries })
    }

    /// The default half-hour schedule ([`DEFAULT_TIME_LABELS`]).
    pub fn standard() -> Self {
        Self::new(DEFAULT_TIME_LABELS).expect("default catalog is valid")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|entry| entry.label.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.label.as_str())
    }

    /// Index of the latest catalog entry at or before `time`, or `None` when
    /// `time` precedes the first entry.
    pub fn slot_at_or_before(&self, time: NaiveTime) -> Option<usize> {
        let following = self
            .entries
            .partition_point(|entry| entry.time <= time);
        following.checked_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_28_ascending_entries() {
        let catalog = TimeSlotCatalog::standard();
        assert_eq!(catalog.len(), 28);
        assert_eq!(catalog.label(0), Some("7:00 AM"));
        assert_eq!(catalog.label(27), Some("9:00 PM"));
    }

    #[test]
    fn lookup_returns_preceding_label() {
        let catalog = TimeSlotCatalog::standard();
        let t = NaiveTime::from_hms_opt(7, 29, 59).unwrap();
        assert_eq!(catalog.slot_at_or_before(t), Some(0));
        let t = NaiveTime::from_hms_opt(7, 30, 0).unwrap();
        assert_eq!(catalog.slot_at_or_before(t), Some(1));
        let t = NaiveTime::from_hms_opt(23, 0, 0).unwrap();
        assert_eq!(catalog.slot_at_or_before(t), Some(27));
    }

    #[test]
    fn lookup_before_first_label_is_none() {
        let catalog = TimeSlotCatalog::standard();
        let t = NaiveTime::from_hms_opt(6, 59, 59).unwrap();
        assert_eq!(catalog.slot_at_or_before(t), None);
    }

    #[test]
    fn rejects_unparsable_label() {
        let err = TimeSlotCatalog::new(["7:00 AM", "half past nine"]).unwrap_err();
        assert!(matches!(err, CatalogError::UnparsableLabel { .. }));
    }

    #[test]
    fn rejects_out_of_order_labels() {
        let err = TimeSlotCatalog::new(["8:00 AM", "7:00 AM"]).unwrap_err();
        assert!(matches!(err, CatalogError::OutOfOrder { .. }));
    }

    #[test]
    fn rejects_empty_catalog() {
        let err = TimeSlotCatalog::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyCatalog));
    }
}
