//! Current-temperature lookup for the report city
//!
//! The report pipeline only needs a single number, so the client exposes
//! one call and the [`WeatherSource`] seam that handlers depend on.

pub mod api;
pub mod types;

pub use api::{OpenWeatherClient, WeatherSource};
pub use types::{WeatherConfig, TEMPERATURE_UNAVAILABLE};
