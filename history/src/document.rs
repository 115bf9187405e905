//! The store's durable form: a JSON tree of days and time-slot records,
//! each record's occupancy packed as a fixed-width digit string.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use core_types::OccupancySnapshot;
use serde::{Deserialize, Serialize};

use crate::{
    day::{Day, TimeSlotRecord},
    error::Result,
};

#[derive(Serialize, Deserialize)]
struct HistoryDoc {
    days: Vec<DayNode>,
}

#[derive(Serialize, Deserialize)]
struct DayNode {
    date: NaiveDate,
    slots: Vec<SlotNode>,
}

#[derive(Serialize, Deserialize)]
struct SlotNode {
    time: String,
    spots: String,
}

/// One ASCII digit per slot, `'1'` occupied, `'0'` free.
pub fn encode_spots(snapshot: &OccupancySnapshot) -> String {
    snapshot
        .slots()
        .iter()
        .map(|occupied| if *occupied { '1' } else { '0' })
        .collect()
}

/// Lenient inverse of [`encode_spots`].
///
/// Non-digit characters (formatting whitespace and the like) are skipped
/// without consuming a slot position. Missing trailing digits decode as
/// free; digits beyond `slot_count` are ignored. Never fails.
pub fn decode_spots(text: &str, slot_count: usize) -> OccupancySnapshot {
    let mut slots = vec![false; slot_count];
    for (index, digit) in text
        .chars()
        .filter(char::is_ascii_digit)
        .take(slot_count)
        .enumerate()
    {
        slots[index] = digit != '0';
    }
    OccupancySnapshot::new(slots)
}

fn to_doc(days: &[Day]) -> HistoryDoc {
    HistoryDoc {
        days: days
            .iter()
            .map(|day| DayNode {
                date: day.date,
                slots: day
                    .records
                    .iter()
                    .map(|record| SlotNode {
                        time: record.label.clone(),
                        spots: encode_spots(&record.snapshot),
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn from_doc(doc: HistoryDoc, slot_count: usize) -> Vec<Day> {
    doc.days
        .into_iter()
        .map(|node| {
            Day::with_records(
                node.date,
                node.slots
                    .into_iter()
                    .map(|slot| TimeSlotRecord::new(slot.time, decode_spots(&slot.spots, slot_count)))
                    .collect(),
            )
        })
        .collect()
}

/// Serializes `days` to a fresh temp file, then atomically replaces `path`.
///
/// A failure at any point leaves the previous file untouched.
pub(crate) fn write_atomic(path: &Path, days: &[Day]) -> Result<()> {
    let body = serde_json::to_vec_pretty(&to_doc(days))?;
    let tmp_path = tmp_sibling(path);
    let outcome = (|| -> io::Result<()> {
        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(&body)?;
        tmp.sync_data()?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    })();
    if outcome.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    Ok(outcome?)
}

/// Hydrates the recorded days from `path`; a missing file is an empty store.
pub(crate) fn read(path: &Path, slot_count: usize) -> Result<Vec<Day>> {
    let body = match fs::read(path) {
        Ok(body) => body,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };
    let doc: HistoryDoc = serde_json::from_slice(&body)?;
    Ok(from_doc(doc, slot_count))
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_then_decode_round_trips() {
        let snapshot = OccupancySnapshot::new(vec![false, true, true, false, true]);
        let encoded = encode_spots(&snapshot);
        assert_eq!(encoded, "01101");
        assert_eq!(decode_spots(&encoded, 5), snapshot);
    }

    #[test]
    fn decode_skips_interspersed_non_digits() {
        let clean = decode_spots("01101", 5);
        let noisy = decode_spots("  0\n\t1 10\n   1  ", 5);
        assert_eq!(noisy, clean);
    }

    #[test]
    fn decode_pads_missing_digits_as_free() {
        let snapshot = decode_spots("11", 5);
        assert_eq!(snapshot.slots(), &[true, true, false, false, false]);
    }

    #[test]
    fn decode_of_empty_text_is_all_free() {
        assert_eq!(decode_spots("", 4), OccupancySnapshot::all_free(4));
    }

    #[test]
    fn decode_ignores_excess_digits() {
        let snapshot = decode_spots("1111111", 3);
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.occupied_count(), 3);
    }

    #[test]
    fn document_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let date = NaiveDate::from_ymd_opt(2016, 4, 20).unwrap();
        let mut day = Day::new(date);
        day.push(TimeSlotRecord::new(
            "7:00 AM",
            OccupancySnapshot::new(vec![true, false, true]),
        ));
        write_atomic(&path, std::slice::from_ref(&day)).unwrap();

        let restored = read(&path, 3).unwrap();
        assert_eq!(restored, vec![day]);
        assert!(!path.with_file_name("history.json.tmp").exists());
    }

    #[test]
    fn read_of_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read(&dir.path().join("absent.json"), 3).unwrap().is_empty());
    }

    #[test]
    fn read_of_garbage_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, b"not a document").unwrap();
        assert!(matches!(
            read(&path, 3),
            Err(crate::StoreError::Parse(_))
        ));
    }
}
