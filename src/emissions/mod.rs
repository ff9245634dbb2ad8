//! Emission estimation
//!
//! Static activity emission factors, the month-to-season mapping and the
//! per-request result that gets rendered into a report.

pub mod factors;
pub mod season;
pub mod types;

pub use factors::{calculate_emissions, lookup_factor, EMISSION_FACTORS, UNKNOWN_SCOPE};
pub use season::Season;
pub use types::{EmissionEstimate, EmissionFactor, EmissionResult};
