use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

pub const SECONDS_IN_DAY: i64 = 86_400;
pub const TRAILING_DAYS: i64 = 28;

/// Time of day every scheduled run is pinned to, so consecutive rows cover
/// equally sized spans.
pub fn run_time() -> NaiveTime {
    NaiveTime::from_hms_opt(0, 3, 4).unwrap_or_default()
}

/// Closed range of unix seconds, `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub from: i64,
    pub to: i64,
}

impl TimeRange {
    pub fn new(from: i64, to: i64) -> Self {
        Self {
            from: from.min(to),
            to,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Windows {
    pub last_28: TimeRange,
    pub quarter: TimeRange,
    pub all_time: TimeRange,
}

pub fn windows(reference: DateTime<Utc>, all_time_from: i64) -> Windows {
    let to = reference.timestamp();
    Windows {
        last_28: TimeRange::new(to - TRAILING_DAYS * SECONDS_IN_DAY, to),
        quarter: TimeRange::new(quarter_start(reference).timestamp(), to),
        all_time: TimeRange::new(all_time_from, to),
    }
}

/// First day of the reference's calendar quarter at the run time of day.
pub fn quarter_start(reference: DateTime<Utc>) -> DateTime<Utc> {
    let date = reference.date_naive();
    let month = (date.month0() / 3) * 3 + 1;
    let first = NaiveDate::from_ymd_opt(date.year(), month, 1).unwrap_or(date);
    at_run_time(first)
}

pub fn at_run_time(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(run_time()).and_utc()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn trailing_window_is_exactly_28_days() {
        for reference in [
            utc(2024, 3, 1, 0, 3, 4),
            utc(2024, 2, 29, 12, 0, 0),
            utc(2023, 12, 31, 23, 59, 59),
            utc(2025, 7, 1, 0, 0, 0),
        ] {
            let w = windows(reference, 0);
            assert_eq!(w.last_28.to, reference.timestamp());
            assert_eq!(w.last_28.to - w.last_28.from, 28 * SECONDS_IN_DAY);
        }
    }

    #[test]
    fn quarter_starts_on_first_month_of_quarter() {
        let reference = utc(2024, 5, 15, 0, 3, 4);
        let w = windows(reference, 0);
        assert_eq!(w.quarter.from, utc(2024, 4, 1, 0, 3, 4).timestamp());
        assert_eq!(w.quarter.to, reference.timestamp());

        for month in 1..=12u32 {
            let start = quarter_start(utc(2025, month, 20, 18, 0, 0));
            assert!([1, 4, 7, 10].contains(&start.month()), "month {month}");
            assert_eq!(start.day(), 1);
            assert_eq!(start.year(), 2025);
            assert_eq!(start.time(), run_time());
        }
    }

    #[test]
    fn quarter_is_clamped_before_run_time_on_first_day() {
        let reference = utc(2024, 10, 1, 0, 1, 0);
        let w = windows(reference, 0);
        assert_eq!(w.quarter.from, reference.timestamp());
        assert!(w.quarter.from <= w.quarter.to);
    }

    #[test]
    fn all_time_uses_given_origin() {
        let reference = utc(2024, 5, 15, 0, 3, 4);
        let w = windows(reference, 1_609_459_200);
        assert_eq!(w.all_time, TimeRange::new(1_609_459_200, reference.timestamp()));
        assert_eq!(windows(reference, 0).all_time.from, 0);
    }

    #[test]
    fn run_time_normalization() {
        let day = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
        assert_eq!(at_run_time(day), utc(2025, 2, 10, 0, 3, 4));
    }
}
