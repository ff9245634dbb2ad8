//! Types for the weather integration

use serde::{Deserialize, Serialize};

/// Temperature recorded when the weather lookup fails
pub const TEMPERATURE_UNAVAILABLE: f64 = -1.0;

/// OpenWeatherMap connection settings
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct WeatherConfig {
    /// API base URL, without the `/data/2.5` path
    pub base_url: String,
    /// OpenWeatherMap `appid`
    pub api_key: String,
    /// City passed as the `q` parameter
    pub city: String,
}

impl WeatherConfig {
    pub fn new(api_key: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            city: city.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org".to_string(),
            api_key: String::new(),
            city: "Guntur".to_string(),
        }
    }
}
