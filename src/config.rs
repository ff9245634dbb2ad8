//! Service configuration
//!
//! Every setting is a CLI flag with an environment fallback; credentials
//! are never compiled in.

use std::net::SocketAddr;

use clap::Parser;

use crate::error::Result;
use crate::storage::StorageAccount;
use crate::weather::WeatherConfig;

#[derive(Parser, Clone, Debug)]
pub struct RunArgs {
    /// Address the HTTP server binds to
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: SocketAddr,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub weather_api_key: String,

    /// City whose temperature is added to each report
    #[arg(long, env = "WEATHER_CITY", default_value = "Guntur")]
    pub weather_city: String,

    /// OpenWeatherMap base URL
    #[arg(
        long,
        env = "OPENWEATHER_BASE_URL",
        default_value = "https://api.openweathermap.org"
    )]
    pub weather_base_url: String,

    /// Azure Storage connection string
    #[arg(long, env = "AZURE_STORAGE_CONNECTION_STRING", hide_env_values = true)]
    pub storage_connection_string: String,

    /// Blob container that receives the reports
    #[arg(long, env = "AZURE_STORAGE_CONTAINER", default_value = "report")]
    pub storage_container: String,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

impl RunArgs {
    pub fn weather_config(&self) -> WeatherConfig {
        WeatherConfig::new(self.weather_api_key.clone(), self.weather_city.clone())
            .with_base_url(self.weather_base_url.clone())
    }

    pub fn storage_account(&self) -> Result<StorageAccount> {
        StorageAccount::from_connection_string(&self.storage_connection_string)
    }
}
