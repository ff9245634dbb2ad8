//! OpenWeatherMap API integration

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::weather::types::WeatherConfig;

/// Source of the current temperature for the report city
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Current temperature in Celsius
    async fn fetch_temperature(&self) -> Result<f64>;
}

/// OpenWeatherMap current-weather client
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenWeatherClient {
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn city(&self) -> &str {
        &self.config.city
    }

    fn weather_url(&self) -> String {
        format!(
            "{}/data/2.5/weather",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn fetch_temperature(&self) -> Result<f64> {
        let response = self
            .client
            .get(self.weather_url())
            .query(&[
                ("q", self.config.city.as_str()),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::WeatherApiError(format!(
                "OpenWeatherMap returned {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let temperature = json
            .get("main")
            .and_then(|m| m.get("temp"))
            .and_then(|t| t.as_f64())
            .ok_or_else(|| {
                Error::WeatherApiError("response is missing main.temp".to_string())
            })?;

        debug!("Current temperature in {}: {} °C", self.config.city, temperature);
        Ok(temperature)
    }
}
