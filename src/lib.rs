//! Daily cross-chain contract statistics: counts distinct destination
//! contracts seen by the Axelarscan `GMPStats` API for mainnet and testnet
//! over three windows and appends one summary row per run.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod config;
pub mod db;
pub mod error;
pub mod report;
pub mod runner;
pub mod sink;
pub mod stats;

pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
