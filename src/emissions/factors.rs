//! Static emission factor table

use super::types::{EmissionEstimate, EmissionFactor};

/// Scope label for activities missing from the table
pub const UNKNOWN_SCOPE: &str = "Unknown Scope";

pub const EMISSION_FACTORS: &[EmissionFactor] = &[
    EmissionFactor {
        activity: "car",
        scope: "Scope 1 (Direct Emissions - Fuel Combustion)",
        factor: 2.3,
    },
    EmissionFactor {
        activity: "boiler",
        scope: "Scope 1 (Direct Emissions - Gas Combustion)",
        factor: 2.2,
    },
    EmissionFactor {
        activity: "ac",
        scope: "Scope 2 (Indirect Emissions - Electricity Usage)",
        factor: 0.4,
    },
    EmissionFactor {
        activity: "electricity",
        scope: "Scope 2 (Indirect Emissions - Electricity Grid)",
        factor: 0.4,
    },
    EmissionFactor {
        activity: "air travel",
        scope: "Scope 3 (Indirect Emissions - Business Travel)",
        factor: 0.15,
    },
    EmissionFactor {
        activity: "purchased goods",
        scope: "Scope 3 (Indirect Emissions - Supply Chain)",
        factor: 0.5,
    },
];

/// Find the factor for an activity, ignoring case
pub fn lookup_factor(activity: &str) -> Option<&'static EmissionFactor> {
    let key = activity.to_lowercase();
    EMISSION_FACTORS.iter().find(|f| f.activity == key)
}

/// Estimate emissions for `usage_value` units of `activity`.
///
/// Unknown activities yield [`UNKNOWN_SCOPE`] and zero rather than an error.
pub fn calculate_emissions(activity: &str, usage_value: f64) -> EmissionEstimate {
    match lookup_factor(activity) {
        Some(f) => EmissionEstimate {
            scope: f.scope.to_string(),
            value: usage_value * f.factor,
        },
        None => EmissionEstimate {
            scope: UNKNOWN_SCOPE.to_string(),
            value: 0.0,
        },
    }
}
