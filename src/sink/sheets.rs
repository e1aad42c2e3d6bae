use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::json;

use crate::config::SheetsConfig;
use crate::error::{Result, StatsError};
use crate::report::Reporter;
use crate::stats::SummaryRow;

use super::Sink;

#[derive(Deserialize)]
struct SheetsCredentials {
    access_token: String,
}

/// Appends rows to a Google spreadsheet through `values:append`.
///
/// Credentials are only checked on append, so a missing or malformed
/// `GOOGLE_CREDENTIALS` fails the write rather than startup.
pub struct SheetsSink {
    client: Client,
    append_url: Url,
    credentials: Option<String>,
    reporter: Arc<dyn Reporter>,
}

impl SheetsSink {
    pub fn new(
        config: &SheetsConfig,
        request_timeout: Duration,
        reporter: Arc<dyn Reporter>,
    ) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(request_timeout).build()?,
            append_url: append_url(&config.api_url, &config.spreadsheet_id, &config.range)?,
            credentials: config.credentials.clone(),
            reporter,
        })
    }

    fn access_token(&self) -> Result<String> {
        let raw = self
            .credentials
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .ok_or(StatsError::MissingCredentials)?;
        let credentials: SheetsCredentials =
            serde_json::from_str(raw).map_err(StatsError::InvalidCredentials)?;
        Ok(credentials.access_token)
    }

    async fn send(&self, row: &SummaryRow) -> Result<()> {
        let token = self.access_token()?;

        let response = self
            .client
            .post(self.append_url.clone())
            .bearer_auth(token)
            .json(&json!({ "values": [row.cells()] }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StatsError::SheetsRejected { status, body });
        }
        Ok(())
    }
}

impl Sink for SheetsSink {
    async fn append(&self, row: &SummaryRow) -> Result<()> {
        match self.send(row).await {
            Ok(()) => {
                self.reporter
                    .success(&format!("Saved data for {}", row.label));
                Ok(())
            }
            Err(e) => {
                self.reporter.error(&format!("Error updating sheet: {e}"));
                Err(e)
            }
        }
    }
}

fn append_url(api_url: &str, spreadsheet_id: &str, range: &str) -> Result<Url> {
    let mut url = Url::parse(api_url)
        .map_err(|e| StatsError::Config(format!("Invalid SHEETS_API_URL: {e}")))?;

    url.path_segments_mut()
        .map_err(|_| StatsError::Config(format!("SHEETS_API_URL cannot be a base: {api_url}")))?
        .pop_if_empty()
        .extend(["v4", "spreadsheets", spreadsheet_id, "values"])
        .push(&format!("{range}:append"));

    url.query_pairs_mut()
        .append_pair("valueInputOption", "USER_ENTERED")
        .append_pair("insertDataOption", "INSERT_ROWS");

    Ok(url)
}
