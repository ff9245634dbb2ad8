//! Types for emission estimation

use chrono::NaiveDate;
use serde::Serialize;

use super::season::Season;

/// Emission factor for one activity
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmissionFactor {
    /// Lowercase activity key
    pub activity: &'static str,
    /// GHG accounting scope label
    pub scope: &'static str,
    /// kg CO2 per unit of usage
    pub factor: f64,
}

/// Scope and value computed for a single activity
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmissionEstimate {
    pub scope: String,
    pub value: f64,
}

/// Everything a report shows for one request
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionResult {
    /// Local calendar date of the request
    pub date: NaiveDate,
    /// Current temperature in Celsius, or -1 when the weather lookup failed
    pub temperature: f64,
    pub season: Season,
    /// Activity exactly as requested
    pub activity: String,
    pub scope: String,
    /// Estimated kg CO2 per day
    pub emissions_value: f64,
}

impl EmissionResult {
    /// Temperature line value, e.g. "28.5 °C"
    pub fn temperature_display(&self) -> String {
        format!("{} °C", self.temperature)
    }

    /// Emissions rounded to two decimals, e.g. "23.00 kg CO₂/day"
    pub fn emissions_display(&self) -> String {
        format!("{:.2} kg CO₂/day", self.emissions_value)
    }
}
