use chrono::{NaiveDateTime, Timelike};

/// At-most-once-per-half-hour recording latch.
///
/// The history store appends unconditionally; this gate is how the sampling
/// callback keeps itself to one record per labeled window. It fires on the
/// first observation of a boundary minute (:00 or :30) and re-arms on any
/// later non-boundary minute, so it stays correct even when ticks arrive
/// slower than once a minute.
#[derive(Debug)]
pub struct SlotBoundaryGate {
    armed: bool,
}

impl SlotBoundaryGate {
    pub fn new() -> Self {
        Self { armed: true }
    }

    pub fn should_record(&mut self, now: NaiveDateTime) -> bool {
        let at_boundary = now.minute() % 30 == 0;
        if at_boundary {
            if self.armed {
                self.armed = false;
                return true;
            }
            false
        } else {
            self.armed = true;
            false
        }
    }
}

impl Default for SlotBoundaryGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2016, 4, 20)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn fires_once_per_boundary_minute() {
        let mut gate = SlotBoundaryGate::new();
        assert!(gate.should_record(at(8, 0, 2)));
        assert!(!gate.should_record(at(8, 0, 30)));
        assert!(!gate.should_record(at(8, 0, 59)));
    }

    #[test]
    fn rearms_after_the_boundary_passes() {
        let mut gate = SlotBoundaryGate::new();
        assert!(gate.should_record(at(8, 0, 0)));
        assert!(!gate.should_record(at(8, 1, 0)));
        assert!(gate.should_record(at(8, 30, 0)));
    }

    #[test]
    fn survives_ticks_slower_than_a_minute() {
        let mut gate = SlotBoundaryGate::new();
        assert!(gate.should_record(at(8, 0, 0)));
        // Next observation lands well past the re-arm minute.
        assert!(!gate.should_record(at(8, 17, 0)));
        assert!(gate.should_record(at(8, 30, 0)));
    }

    #[test]
    fn off_boundary_ticks_never_fire() {
        let mut gate = SlotBoundaryGate::new();
        assert!(!gate.should_record(at(9, 12, 0)));
        assert!(!gate.should_record(at(9, 29, 59)));
    }
}
