use std::sync::Arc;

use chrono::Utc;

use contract_stats::config::Config;
use contract_stats::error::Result;
use contract_stats::report::{Reporter, TracingReporter};
use contract_stats::runner::{run_backfill, Pacing, Runner};

#[tokio::main]
async fn main() {
    contract_stats::init_tracing();
    let reporter: Arc<dyn Reporter> = Arc::new(TracingReporter);

    if let Err(e) = run(reporter.clone()).await {
        reporter.error(&format!("Backfill process error: {e}"));
    }
}

async fn run(reporter: Arc<dyn Reporter>) -> Result<()> {
    let config = Config::from_env()?;
    let runner = Runner::from_config(&config, reporter)?;

    let stats = run_backfill(
        &runner,
        config.backfill_start,
        Utc::now(),
        Pacing::new(config.backfill_delay, config.backfill_max_delay),
    )
    .await;

    tracing::info!(
        days_processed = stats.days_processed,
        days_failed = stats.days_failed,
        "Backfill finished"
    );
    Ok(())
}
