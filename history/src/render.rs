//! Human-readable table of the recorded history.

use crate::day::Day;

const COLUMN_HEADER: &str = "Date:\t\tTime:\t\t%Full:\n";
const RULE: &str = "--------------------------------------------------------\n";
const TRAILER: &str = "\n\nEnd of recorded occupancy history.\n";

/// One block per day: column header, dashed rule, one row per recorded
/// slot, then a fixed trailer after the final block.
pub fn render(days: &[Day], slot_count: usize) -> String {
    let denominator = slot_count.max(1) as f64;
    let mut out = String::new();
    for day in days {
        out.push_str("\n\n");
        out.push_str(COLUMN_HEADER);
        out.push_str(RULE);
        for record in &day.records {
            let percent = 100.0 * record.snapshot.occupied_count() as f64 / denominator;
            out.push_str(&format!(
                "{}\t{}         {:.1}\n",
                day.date, record.label, percent
            ));
        }
    }
    out.push_str(TRAILER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::TimeSlotRecord;
    use chrono::NaiveDate;
    use core_types::OccupancySnapshot;

    #[test]
    fn renders_one_row_per_record() {
        let date = NaiveDate::from_ymd_opt(2016, 4, 20).unwrap();
        let day = Day::with_records(
            date,
            vec![
                TimeSlotRecord::new("7:00 AM", OccupancySnapshot::new(vec![true, false])),
                TimeSlotRecord::new("7:30 AM", OccupancySnapshot::new(vec![true, true])),
            ],
        );
        let table = render(&[day], 2);
        assert!(table.contains("2016-04-20\t7:00 AM         50.0\n"));
        assert!(table.contains("2016-04-20\t7:30 AM         100.0\n"));
        assert!(table.ends_with(TRAILER));
    }

    #[test]
    fn empty_history_is_just_the_trailer() {
        assert_eq!(render(&[], 25), TRAILER);
    }
}
