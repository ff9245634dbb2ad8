//! In-memory weather and storage fakes for unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::storage::ReportStore;
use crate::weather::WeatherSource;

pub struct FakeWeather {
    temperature: Option<f64>,
    calls: AtomicUsize,
}

impl FakeWeather {
    /// `None` makes every lookup fail
    pub fn returning(temperature: Option<f64>) -> Arc<Self> {
        Arc::new(Self {
            temperature,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherSource for FakeWeather {
    async fn fetch_temperature(&self) -> Result<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.temperature
            .ok_or_else(|| Error::WeatherApiError("unreachable".to_string()))
    }
}

#[derive(Default)]
pub struct FakeStore {
    fail: bool,
    stored: Mutex<Vec<(String, Vec<u8>)>>,
}

impl FakeStore {
    pub fn working() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Default::default()
        })
    }

    pub fn stored(&self) -> Vec<(String, Vec<u8>)> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportStore for FakeStore {
    async fn store(&self, name: &str, data: Vec<u8>) -> Result<()> {
        if self.fail {
            return Err(Error::StorageError {
                status: 500,
                code: "InternalError".to_string(),
            });
        }
        self.stored.lock().unwrap().push((name.to_string(), data));
        Ok(())
    }
}
