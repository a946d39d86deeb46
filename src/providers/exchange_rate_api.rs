use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::error::LoadError;
use crate::core::rates::{RateSnapshotProvider, RateTable};

// ExchangeRateApiProvider implementation for RateSnapshotProvider
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            timeout,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    base_code: Option<String>,
    time_last_update_unix: Option<i64>,
    conversion_rates: Option<BTreeMap<String, f64>>,
}

#[async_trait]
impl RateSnapshotProvider for ExchangeRateApiProvider {
    #[instrument(
        name = "LatestRatesFetch",
        skip(self),
        fields(base = %base)
    )]
    async fn fetch_latest(&self, base: &str) -> Result<RateTable, LoadError> {
        let url = format!("{}/v6/{}/latest/{}", self.base_url, self.api_key, base);
        // The URL embeds the API key, so log the endpoint shape instead.
        debug!("Requesting latest rates from {}/v6/<key>/latest/{}", self.base_url, base);

        let client = reqwest::Client::builder()
            .user_agent("fxc/0.1")
            .timeout(self.timeout)
            .build()
            .map_err(|e| LoadError::Transport(format!("Failed to build HTTP client: {e}")))?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| LoadError::Transport(format!("Request error: {e} for base: {base}")))?;

        if !response.status().is_success() {
            return Err(LoadError::Transport(format!(
                "HTTP error: {} for base: {}",
                response.status(),
                base
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| LoadError::Transport(format!("Failed to read response body: {e}")))?;

        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| LoadError::Provider(format!("Failed to parse rates response: {e}")))?;

        if data.result.as_deref() == Some("error") {
            let reason = data
                .error_type
                .unwrap_or_else(|| "unspecified provider error".to_string());
            return Err(LoadError::Provider(reason));
        }

        let rates = data
            .conversion_rates
            .ok_or_else(|| LoadError::Provider("Response has no conversion_rates".to_string()))?;

        let base_code = data.base_code.as_deref().unwrap_or(base);
        let last_update = data
            .time_last_update_unix
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single());

        let table = RateTable::new(base_code, rates, last_update)
            .map_err(|e| LoadError::Provider(e.to_string()))?;

        debug!(currencies = table.len(), "Fetched rate snapshot");
        Ok(table)
    }
}
