use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::error::Result;
use crate::report::Reporter;
use crate::sink::{AnySink, Sink};
use crate::stats::{label_for, windows, ContractCounter, Network, SummaryRow};

pub mod backfill;

pub use backfill::{backfill_days, run_backfill, BackfillStats, Pacing};

/// One collection step: windows, six counts, one appended row.
pub struct Runner<S> {
    counter: ContractCounter,
    sink: S,
    reporter: Arc<dyn Reporter>,
    all_time_from: i64,
}

impl Runner<AnySink> {
    pub fn from_config(config: &Config, reporter: Arc<dyn Reporter>) -> Result<Self> {
        let counter = ContractCounter::new(&config.api, reporter.clone())?;
        let sink = AnySink::from_config(config, reporter.clone())?;
        Ok(Self::new(counter, sink, reporter, config.all_time_from))
    }
}

impl<S: Sink> Runner<S> {
    pub fn new(
        counter: ContractCounter,
        sink: S,
        reporter: Arc<dyn Reporter>,
        all_time_from: i64,
    ) -> Self {
        Self {
            counter,
            sink,
            reporter,
            all_time_from,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Builds the row for `reference` without persisting it.
    pub async fn collect(&self, reference: DateTime<Utc>) -> SummaryRow {
        let w = windows(reference, self.all_time_from);

        self.reporter.info("Calculated time periods:");
        self.reporter
            .info(&format!(" - Last 28 days: {} to {}", w.last_28.from, w.last_28.to));
        self.reporter
            .info(&format!(" - Quarter: {} to {}", w.quarter.from, w.quarter.to));
        self.reporter
            .info(&format!(" - All time: {} to {}", w.all_time.from, w.all_time.to));

        let c = &self.counter;
        let (m28, mq, mall, t28, tq, tall) = tokio::join!(
            c.count(Network::Mainnet, w.last_28),
            c.count(Network::Mainnet, w.quarter),
            c.count(Network::Mainnet, w.all_time),
            c.count(Network::Testnet, w.last_28),
            c.count(Network::Testnet, w.quarter),
            c.count(Network::Testnet, w.all_time),
        );

        SummaryRow::build(label_for(reference), [m28, mq, mall, t28, tq, tall])
    }

    /// Collects and appends the row for `reference`. Only sink failures
    /// are returned; failed counts already degraded to zero.
    pub async fn run_once(&self, reference: DateTime<Utc>) -> Result<SummaryRow> {
        let row = self.collect(reference).await;
        self.sink.append(&row).await?;
        Ok(row)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashSet;
    use std::num::NonZeroU32;
    use std::sync::Mutex;
    use std::time::Duration;

    use httpmock::MockServer;

    use crate::config::ApiConfig;
    use crate::error::{Result, StatsError};
    use crate::sink::Sink;
    use crate::stats::SummaryRow;

    /// Keeps appended rows in memory; labels listed in `fail_on` are refused.
    #[derive(Default)]
    pub struct MemorySink {
        pub rows: Mutex<Vec<SummaryRow>>,
        pub fail_on: HashSet<String>,
    }

    impl MemorySink {
        pub fn failing_on(labels: &[&str]) -> Self {
            Self {
                rows: Mutex::default(),
                fail_on: labels.iter().map(|l| l.to_string()).collect(),
            }
        }

        pub fn rows(&self) -> Vec<SummaryRow> {
            self.rows.lock().unwrap().clone()
        }
    }

    impl Sink for MemorySink {
        async fn append(&self, row: &SummaryRow) -> Result<()> {
            if self.fail_on.contains(&row.label) {
                return Err(StatsError::MissingCredentials);
            }
            self.rows.lock().unwrap().push(row.clone());
            Ok(())
        }
    }

    pub fn api_config(server: &MockServer) -> ApiConfig {
        ApiConfig {
            mainnet_url: server.url("/mainnet"),
            testnet_url: server.url("/testnet"),
            request_timeout: Duration::from_secs(5),
            requests_per_second: NonZeroU32::new(1000).unwrap(),
        }
    }
}
