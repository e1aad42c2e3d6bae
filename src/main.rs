use std::sync::Arc;

use chrono::Utc;

use contract_stats::config::Config;
use contract_stats::error::Result;
use contract_stats::report::{Reporter, TracingReporter};
use contract_stats::runner::Runner;

#[tokio::main]
async fn main() {
    contract_stats::init_tracing();
    let reporter: Arc<dyn Reporter> = Arc::new(TracingReporter);

    if let Err(e) = run(reporter.clone()).await {
        reporter.error(&format!("An error occurred in the main process: {e}"));
    }
}

async fn run(reporter: Arc<dyn Reporter>) -> Result<()> {
    reporter.info(&format!(
        "Starting contract stats v{}",
        env!("CARGO_PKG_VERSION")
    ));

    let config = Config::from_env()?;
    tracing::info!(sink = ?config.sink, all_time_from = config.all_time_from, "Loaded config");

    let runner = Runner::from_config(&config, reporter.clone())?;
    let row = runner.run_once(Utc::now()).await?;

    tracing::info!(date = %row.label, counts = ?row.counts(), "Run complete");
    Ok(())
}
