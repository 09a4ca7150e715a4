use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    config::{LANG, ProviderSettings},
    payload::{CurrentPayload, ForecastPayload},
};

use super::WeatherProvider;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// WeatherAPI.com client for the `current.json` and `forecast.json` endpoints.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    base_url: String,
    api_key: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client for WeatherAPI")?;

        Ok(Self {
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        label: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{endpoint}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("lang", LANG), ("key", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("Failed to send request to WeatherAPI ({label})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read WeatherAPI {label} response body"))?;

        debug!(%status, bytes = body.len(), "WeatherAPI {label} response");

        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "WeatherAPI {label} request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse WeatherAPI {label} JSON"))
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip(self))]
    async fn get_current(&self, query: &str) -> Result<CurrentPayload> {
        self.get_json("current.json", "current", &[("q", query)]).await
    }

    #[instrument(skip(self))]
    async fn get_forecast(&self, query: &str, days: u8) -> Result<ForecastPayload> {
        let days = days.to_string();
        self.get_json("forecast.json", "forecast", &[("q", query), ("days", days.as_str())])
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
