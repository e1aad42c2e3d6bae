use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;

use crate::error::{Result, StatsError};

pub const DEFAULT_MAINNET_API_URL: &str = "https://api.axelarscan.io/gmp/GMPStats";
pub const DEFAULT_TESTNET_API_URL: &str = "https://testnet.api.axelarscan.io/gmp/GMPStats";
pub const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com";

// 2021-01-01T00:00:00Z, earliest history the analytics API serves
pub const EARLIEST_TIME: i64 = 1_609_459_200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Workbook,
    Database,
    Sheets,
}

impl FromStr for SinkKind {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "workbook" | "xlsx" => Ok(Self::Workbook),
            "database" | "sqlite" => Ok(Self::Database),
            "sheets" | "google-sheets" => Ok(Self::Sheets),
            other => Err(StatsError::Config(format!("Invalid SINK: {other}"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub mainnet_url: String,
    pub testnet_url: String,
    pub request_timeout: Duration,
    pub requests_per_second: NonZeroU32,
}

#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub api_url: String,
    pub spreadsheet_id: String,
    pub range: String,
    pub credentials: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub all_time_from: i64,
    pub sink: SinkKind,
    pub workbook_path: String,
    pub database_path: String,
    pub sheets: Option<SheetsConfig>,
    pub backfill_start: NaiveDate,
    pub backfill_delay: Duration,
    pub backfill_max_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let mainnet_url = var("MAINNET_API_URL", DEFAULT_MAINNET_API_URL);
        let testnet_url = var("TESTNET_API_URL", DEFAULT_TESTNET_API_URL);

        let request_timeout = var("REQUEST_TIMEOUT_SECS", "60")
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| StatsError::Config(format!("Invalid REQUEST_TIMEOUT_SECS: {e}")))?;

        // Six requests per run go out at once
        let requests_per_second = var("REQUESTS_PER_SECOND", "6")
            .parse::<NonZeroU32>()
            .map_err(|e| StatsError::Config(format!("Invalid REQUESTS_PER_SECOND: {e}")))?;

        let all_time_from = var("ALL_TIME_FROM", &EARLIEST_TIME.to_string())
            .parse::<i64>()
            .map_err(|e| StatsError::Config(format!("Invalid ALL_TIME_FROM: {e}")))?;

        let sink = var("SINK", "workbook").parse::<SinkKind>()?;

        let workbook_path = var("WORKBOOK_PATH", "./contracts.xlsx");
        let database_path = var("DATABASE_PATH", "./data/contracts.db");

        let sheets = match sink {
            SinkKind::Sheets => {
                let spreadsheet_id = lookup("SPREADSHEET_ID").ok_or_else(|| {
                    StatsError::Config("SPREADSHEET_ID is required when SINK=sheets".into())
                })?;
                Some(SheetsConfig {
                    api_url: var("SHEETS_API_URL", DEFAULT_SHEETS_API_URL),
                    spreadsheet_id,
                    range: var("SHEET_RANGE", "Sheet1"),
                    credentials: lookup("GOOGLE_CREDENTIALS"),
                })
            }
            SinkKind::Workbook | SinkKind::Database => None,
        };

        let backfill_start =
            NaiveDate::parse_from_str(&var("BACKFILL_START_DATE", "2025-02-10"), "%Y-%m-%d")
                .map_err(|e| StatsError::Config(format!("Invalid BACKFILL_START_DATE: {e}")))?;

        let backfill_delay = var("BACKFILL_DELAY_MS", "2000")
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| StatsError::Config(format!("Invalid BACKFILL_DELAY_MS: {e}")))?;

        let backfill_max_delay = var("BACKFILL_MAX_DELAY_MS", "60000")
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| StatsError::Config(format!("Invalid BACKFILL_MAX_DELAY_MS: {e}")))?;

        Ok(Self {
            api: ApiConfig {
                mainnet_url,
                testnet_url,
                request_timeout,
                requests_per_second,
            },
            all_time_from,
            sink,
            workbook_path,
            database_path,
            sheets,
            backfill_start,
            backfill_delay,
            backfill_max_delay: backfill_max_delay.max(backfill_delay),
        })
    }
}
