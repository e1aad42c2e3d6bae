use std::fmt;
use std::sync::Arc;

use chrono::DateTime;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::Result;
use crate::report::Reporter;

use super::messages::{collect_contract_keys, message_count, StatsQuery};
use super::windows::TimeRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts distinct destination contracts seen by the analytics API.
pub struct ContractCounter {
    client: Client,
    mainnet_url: String,
    testnet_url: String,
    limiter: DefaultDirectRateLimiter,
    reporter: Arc<dyn Reporter>,
}

impl ContractCounter {
    pub fn new(config: &ApiConfig, reporter: Arc<dyn Reporter>) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            mainnet_url: config.mainnet_url.clone(),
            testnet_url: config.testnet_url.clone(),
            limiter: RateLimiter::direct(Quota::per_second(config.requests_per_second)),
            reporter,
        })
    }

    pub fn endpoint(&self, network: Network) -> &str {
        match network {
            Network::Mainnet => &self.mainnet_url,
            Network::Testnet => &self.testnet_url,
        }
    }

    /// Number of distinct contract keys for `network` within `range`.
    ///
    /// Never fails: transport, status and decode errors are reported and
    /// counted as zero, as is a response without a `messages` array.
    pub async fn count(&self, network: Network, range: TimeRange) -> u64 {
        let payload = match self.fetch(network, range).await {
            Ok(payload) => payload,
            Err(e) => {
                self.reporter.error(&format!(
                    "Error fetching data for {network} (from {} to {}): {e}",
                    range.from, range.to
                ));
                return 0;
            }
        };

        let Some(keys) = collect_contract_keys(&payload) else {
            self.reporter
                .warning(&format!("No messages array in API response for {network}."));
            return 0;
        };

        self.reporter.info(&format!(
            "Processed API response for {network}: {} message(s), {} unique contract(s).",
            message_count(&payload),
            keys.len()
        ));
        keys.len() as u64
    }

    async fn fetch(&self, network: Network, range: TimeRange) -> Result<Value> {
        let url = self.endpoint(network);
        self.reporter.info(&format!(
            "API call to {} ({url}) from {} to {}",
            network.as_str().to_uppercase(),
            describe(range.from),
            describe(range.to)
        ));

        self.limiter.until_ready().await;

        let response = self
            .client
            .post(url)
            .json(&StatsQuery {
                from_time: range.from,
                to_time: range.to,
            })
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

fn describe(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
