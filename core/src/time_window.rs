//! Shift time windows and cache-expiry rounding. Pure functions, no state.

use chrono::{DateTime, Duration, Timelike, Utc};

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const QUARTER_HOUR_NANOS: i64 = 15 * 60 * NANOS_PER_SECOND;

/// True iff `start < now < end`. A shift is not active at its own boundaries.
pub fn shift_is_active(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    start < now && now < end
}

/// Round `now` up to a quarter-hour mark (:00, :15, :30, :45).
///
/// Computed as `ceil(x / 900s) * 900s` over the time elapsed in the hour,
/// so an instant already sitting exactly on a mark comes back unchanged
/// rather than advancing to the following mark.
pub fn next_quarter_hour(now: DateTime<Utc>) -> DateTime<Utc> {
    // Leap-second nanos (>= 1s) fold back into the last second.
    let sub_second = i64::from(now.nanosecond()) % NANOS_PER_SECOND;
    let into_hour = i64::from(now.minute() * 60 + now.second()) * NANOS_PER_SECOND + sub_second;
    let rounded = (into_hour + QUARTER_HOUR_NANOS - 1) / QUARTER_HOUR_NANOS * QUARTER_HOUR_NANOS;
    now + Duration::nanoseconds(rounded - into_hour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 1, h, m, s).unwrap()
    }

    #[test]
    fn active_strictly_inside_window() {
        let start = at(9, 0, 0);
        let end = at(17, 0, 0);
        assert!(shift_is_active(start, end, at(12, 0, 0)));
        assert!(shift_is_active(start, end, at(9, 0, 1)));
        assert!(shift_is_active(start, end, at(16, 59, 59)));
    }

    #[test]
    fn boundaries_are_not_active() {
        let start = at(9, 0, 0);
        let end = at(17, 0, 0);
        assert!(!shift_is_active(start, end, start));
        assert!(!shift_is_active(start, end, end));
        assert!(!shift_is_active(start, end, at(8, 59, 59)));
        assert!(!shift_is_active(start, end, at(17, 0, 1)));
    }

    #[test]
    fn rounds_up_to_next_mark() {
        assert_eq!(next_quarter_hour(at(10, 7, 30)), at(10, 15, 0));
        assert_eq!(next_quarter_hour(at(10, 15, 1)), at(10, 30, 0));
        assert_eq!(next_quarter_hour(at(10, 44, 59)), at(10, 45, 0));
        assert_eq!(next_quarter_hour(at(10, 59, 59)), at(11, 0, 0));
        assert_eq!(next_quarter_hour(at(23, 50, 0)), Utc.with_ymd_and_hms(2024, 8, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn sub_second_offsets_round_up() {
        let just_after = at(10, 0, 0) + Duration::microseconds(1);
        assert_eq!(next_quarter_hour(just_after), at(10, 15, 0));

        let just_before = at(10, 29, 59) + Duration::milliseconds(999);
        assert_eq!(next_quarter_hour(just_before), at(10, 30, 0));
    }

    #[test]
    fn aligned_instant_is_returned_unchanged() {
        for minute in [0, 15, 30, 45] {
            assert_eq!(next_quarter_hour(at(10, minute, 0)), at(10, minute, 0));
        }
    }

    #[test]
    fn result_is_a_quarter_mark_not_before_now() {
        let base = at(0, 0, 0);
        for step in 0..(24 * 60 * 4) {
            let now = base + Duration::seconds(step * 23) + Duration::milliseconds(step % 1000);
            let rounded = next_quarter_hour(now);
            assert!(rounded >= now, "{rounded} < {now}");
            assert!(rounded - now < Duration::minutes(15), "{now} rounded too far to {rounded}");
            assert_eq!(rounded.second(), 0, "{rounded}");
            assert_eq!(rounded.nanosecond(), 0, "{rounded}");
            assert!([0, 15, 30, 45].contains(&rounded.minute()), "{rounded}");
        }
    }
}
