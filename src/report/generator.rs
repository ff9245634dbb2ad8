//! Per-request report pipeline

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Local, NaiveDateTime};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::emissions::{calculate_emissions, EmissionResult, Season};
use crate::error::Error;
use crate::report::document::render_docx;
use crate::storage::ReportStore;
use crate::weather::{WeatherSource, TEMPERATURE_UNAVAILABLE};

/// Why a report could not be produced
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Usage value must be greater than zero.")]
    InvalidUsage,

    #[error("Failed to render report: {0}")]
    Render(#[source] Error),

    #[error("Failed to upload report: {0}")]
    Upload(#[source] Error),
}

/// A report that was rendered and stored
#[derive(Clone, Debug)]
pub struct GeneratedReport {
    pub file_name: String,
    pub result: EmissionResult,
}

/// Blob name for a report, e.g. `car_20250106100000.docx`
pub fn report_file_name(activity: &str, at: NaiveDateTime) -> String {
    format!("{}_{}.docx", activity, at.format("%Y%m%d%H%M%S"))
}

/// Runs validate, weather, estimate, render and upload for one request
#[derive(Clone)]
pub struct ReportGenerator {
    weather: Arc<dyn WeatherSource>,
    store: Arc<dyn ReportStore>,
}

impl ReportGenerator {
    pub fn new(weather: Arc<dyn WeatherSource>, store: Arc<dyn ReportStore>) -> Self {
        Self { weather, store }
    }

    /// Generate and store a report as of `now`.
    ///
    /// A failed weather lookup does not fail the report; the temperature is
    /// recorded as -1 instead.
    #[instrument(skip_all, fields(activity = %activity, usage_value = usage_value))]
    pub async fn generate(
        &self,
        activity: &str,
        usage_value: f64,
        now: DateTime<Local>,
    ) -> Result<GeneratedReport, ReportError> {
        if usage_value.is_nan() || usage_value <= 0.0 {
            record_outcome("rejected");
            return Err(ReportError::InvalidUsage);
        }

        let temperature = match self.weather.fetch_temperature().await {
            Ok(t) => t,
            Err(e) => {
                warn!("Weather lookup failed, recording temperature as unavailable: {}", e);
                #[cfg(feature = "metrics")]
                crate::metrics::inc_weather_fallback();
                TEMPERATURE_UNAVAILABLE
            }
        };

        let date = now.date_naive();
        let estimate = calculate_emissions(activity, usage_value);
        let result = EmissionResult {
            date,
            temperature,
            season: Season::for_date(date),
            activity: activity.to_string(),
            scope: estimate.scope,
            emissions_value: estimate.value,
        };

        let file_name = report_file_name(activity, now.naive_local());
        let bytes = render_docx(&result).map_err(|e| {
            error!("Failed to render {}: {}", file_name, e);
            record_outcome("render_failed");
            ReportError::Render(e)
        })?;

        let started = Instant::now();
        let uploaded = self.store.store(&file_name, bytes).await;
        let elapsed = started.elapsed();
        debug!("Upload of {} finished in {:?}", file_name, elapsed);
        #[cfg(feature = "metrics")]
        crate::metrics::observe_upload_duration_seconds(elapsed.as_secs_f64());

        if let Err(e) = uploaded {
            error!("Failed to upload {}: {}", file_name, e);
            record_outcome("upload_failed");
            return Err(ReportError::Upload(e));
        }

        info!("Successfully uploaded {}", file_name);
        record_outcome("uploaded");
        Ok(GeneratedReport { file_name, result })
    }
}

#[cfg_attr(not(feature = "metrics"), allow(unused_variables))]
fn record_outcome(outcome: &str) {
    #[cfg(feature = "metrics")]
    crate::metrics::inc_report(outcome);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeStore, FakeWeather};
    use chrono::TimeZone;

    fn january_morning() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 1, 6, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_report_file_name() {
        let at = january_morning().naive_local();
        assert_eq!(report_file_name("car", at), "car_20250106100000.docx");
        assert_eq!(
            report_file_name("Air Travel", at),
            "Air Travel_20250106100000.docx"
        );
    }

    #[tokio::test]
    async fn test_car_in_january() {
        let weather = FakeWeather::returning(Some(18.2));
        let store = FakeStore::working();
        let generator = ReportGenerator::new(weather.clone(), store.clone());

        let report = generator.generate("car", 10.0, january_morning()).await.unwrap();

        assert_eq!(report.file_name, "car_20250106100000.docx");
        assert_eq!(report.result.scope, "Scope 1 (Direct Emissions - Fuel Combustion)");
        assert_eq!(report.result.emissions_display(), "23.00 kg CO₂/day");
        assert_eq!(report.result.season, Season::Winter);
        assert_eq!(report.result.temperature, 18.2);

        let stored = store.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].0, "car_20250106100000.docx");
        assert!(stored[0].1.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn test_non_positive_usage_makes_no_calls() {
        for usage in [0.0, -5.0, f64::NAN] {
            let weather = FakeWeather::returning(Some(20.0));
            let store = FakeStore::working();
            let generator = ReportGenerator::new(weather.clone(), store.clone());

            let err = generator
                .generate("car", usage, january_morning())
                .await
                .unwrap_err();

            assert!(matches!(err, ReportError::InvalidUsage));
            assert_eq!(weather.calls(), 0);
            assert!(store.stored().is_empty());
        }
    }

    #[tokio::test]
    async fn test_weather_failure_uses_sentinel() {
        let weather = FakeWeather::returning(None);
        let store = FakeStore::working();
        let generator = ReportGenerator::new(weather.clone(), store.clone());

        let report = generator.generate("boiler", 2.0, january_morning()).await.unwrap();

        assert_eq!(report.result.temperature, TEMPERATURE_UNAVAILABLE);
        assert_eq!(weather.calls(), 1);
        assert_eq!(store.stored().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_activity_still_uploads() {
        let generator =
            ReportGenerator::new(FakeWeather::returning(Some(30.0)), FakeStore::working());

        let report = generator.generate("skateboard", 7.0, january_morning()).await.unwrap();
        assert_eq!(report.result.scope, "Unknown Scope");
        assert_eq!(report.result.emissions_value, 0.0);
    }

    #[tokio::test]
    async fn test_upload_failure_is_an_error() {
        let generator =
            ReportGenerator::new(FakeWeather::returning(Some(30.0)), FakeStore::failing());

        let err = generator.generate("ac", 3.0, january_morning()).await.unwrap_err();
        assert!(matches!(err, ReportError::Upload(Error::StorageError { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_activity_case_is_kept_in_result() {
        let generator =
            ReportGenerator::new(FakeWeather::returning(Some(30.0)), FakeStore::working());

        let july = Local.with_ymd_and_hms(2025, 7, 1, 8, 30, 0).unwrap();
        let report = generator.generate("Electricity", 100.0, july).await.unwrap();
        assert_eq!(report.result.activity, "Electricity");
        assert_eq!(report.result.season, Season::Summer);
        assert_eq!(report.result.scope, "Scope 2 (Indirect Emissions - Electricity Grid)");
        assert!((report.result.emissions_value - 40.0).abs() < 1e-9);
        assert_eq!(report.file_name, "Electricity_20250701083000.docx");
    }
}
