use crate::{
    Config,
    payload::{CurrentPayload, ForecastPayload},
    provider::weatherapi::WeatherApiProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod weatherapi;

/// Remote source of current conditions and daily forecasts.
///
/// Implementations return the raw payloads; deciding whether a payload is
/// complete enough to show is left to the viewer.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_current(&self, query: &str) -> anyhow::Result<CurrentPayload>;

    async fn get_forecast(&self, query: &str, days: u8) -> anyhow::Result<ForecastPayload>;
}

/// Construct the shared provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let settings = config.provider_settings()?;
    let provider: Arc<dyn WeatherProvider> = Arc::new(WeatherApiProvider::new(&settings)?);

    Ok(provider)
}
