//! REST API module
//!
//! Serves the emission report endpoint plus health and metrics.

mod dto;
mod handlers;
mod server;

pub use dto::{ErrorResponse, HealthResponse, ReportResponse};
pub use server::{build_router, run_server, AppState};
