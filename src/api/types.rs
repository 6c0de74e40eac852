//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::cost::InvestmentDetails;
use crate::sim::{SimulationResult, SiteInput};

/// Optimal size for the served site, with its cost breakdown and the
/// fixed-size comparison.
#[derive(Debug, Serialize)]
pub struct ResultResponse {
    /// Site the optimization ran for.
    pub site: SiteInput,
    /// Selected battery size.
    pub optimal: SimulationResult,
    /// Investment breakdown of the selected size.
    pub investment: InvestmentDetails,
    /// Comparison sizes, in ascending order.
    pub comparison: Vec<SimulationResult>,
}

/// Query for an ad-hoc simulation.
#[derive(Debug, Deserialize)]
pub struct SimulateQuery {
    /// Battery capacity (kWh).
    pub capacity: f64,
    /// Include representative-day detail.
    #[serde(default)]
    pub detail: bool,
}

/// Query for an investment quote.
#[derive(Debug, Deserialize)]
pub struct InvestmentQuery {
    /// Battery capacity (kWh).
    pub capacity: f64,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
