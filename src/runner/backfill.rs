use std::time::Duration;

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::sink::Sink;
use crate::stats::at_run_time;

use super::Runner;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BackfillStats {
    pub days_processed: u64,
    pub days_failed: u64,
}

/// Delay between backfill days. Starts at `base`, doubles after a failed
/// day up to `max`, and drops back to `base` after a success.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    base: Duration,
    max: Duration,
    current: Duration,
}

impl Pacing {
    pub fn new(base: Duration, max: Duration) -> Self {
        Self {
            base,
            max: max.max(base),
            current: base,
        }
    }

    pub fn record(&mut self, succeeded: bool) -> Duration {
        self.current = if succeeded {
            self.base
        } else {
            (self.current * 2).max(self.base).min(self.max)
        };
        self.current
    }
}

/// Every calendar day from `start` through the day before `now`, ascending.
/// The current day is still in progress and is left out.
pub fn backfill_days(start: NaiveDate, now: DateTime<Utc>) -> impl Iterator<Item = NaiveDate> {
    let end = now
        .date_naive()
        .checked_sub_days(Days::new(1))
        .unwrap_or(NaiveDate::MIN);
    start.iter_days().take_while(move |day| *day <= end)
}

pub async fn run_backfill<S: Sink>(
    runner: &Runner<S>,
    start: NaiveDate,
    now: DateTime<Utc>,
    mut pacing: Pacing,
) -> BackfillStats {
    let reporter = &runner.reporter;
    reporter.info("Starting historical data backfill...");
    reporter.info(&format!("Start: {start}"));
    reporter.info(&format!("End: {}", (now - chrono::Duration::days(1)).date_naive()));

    let mut stats = BackfillStats::default();

    for day in backfill_days(start, now) {
        let reference = at_run_time(day);
        reporter.info(&format!("Processing {}", reference.format("%Y-%m-%d %H:%M:%S")));

        let succeeded = match runner.run_once(reference).await {
            Ok(_) => {
                stats.days_processed += 1;
                true
            }
            Err(e) => {
                stats.days_failed += 1;
                reporter.error(&format!("Error processing {day}: {e}"));
                false
            }
        };

        let delay = pacing.record(succeeded);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    reporter.info(&format!(
        "Historical data backfill complete: {} day(s) saved, {} failed",
        stats.days_processed, stats.days_failed
    ));

    stats
}
