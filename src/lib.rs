//! Emission report service
//!
//! Estimates the emissions of an activity from a static factor table, adds
//! the current temperature of a configured city, renders the result as a
//! Word document and archives it in Azure Blob Storage.

pub mod config;
pub mod emissions;
pub mod error;
pub mod report;
pub mod rest_api;
pub mod storage;
pub mod weather;

#[cfg(feature = "metrics")]
pub mod metrics;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::error::{Error, Result};
