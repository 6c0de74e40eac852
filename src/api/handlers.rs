//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{ErrorResponse, InvestmentQuery, ResultResponse, SimulateQuery};
use crate::cost::InvestmentDetails;
use crate::error::{SimulationError, ensure_non_negative};
use crate::sim::SimulationResult;
use crate::sim::optimizer::sizing_power_kw;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(e: &SimulationError) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// Returns the optimal size with its investment and the comparison sizes.
///
/// `GET /result` → 200 + `ResultResponse` JSON
pub async fn get_result(State(state): State<Arc<AppState>>) -> Json<ResultResponse> {
    let optimal = &state.optimal;
    let investment = state.optimizer.engine().cost_curve().investment(
        optimal.battery_capacity_kwh,
        optimal.max_power_kw,
        state.site.subsidy_per_kw,
    );

    Json(ResultResponse {
        site: state.site.clone(),
        optimal: optimal.clone(),
        investment,
        comparison: state.comparison.clone(),
    })
}

/// Returns every swept candidate in candidate order.
///
/// `GET /candidates` → 200 + `Vec<SimulationResult>` JSON
pub async fn get_candidates(State(state): State<Arc<AppState>>) -> Json<Vec<SimulationResult>> {
    Json(state.candidates.clone())
}

/// Simulates an arbitrary capacity at the sizing C-rate.
///
/// `GET /simulate?capacity=N` → 200 + `SimulationResult` JSON
/// `GET /simulate?capacity=N&detail=true` → includes representative days
/// `GET /simulate?capacity=-1` → 400 + `ErrorResponse`
pub async fn get_simulate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SimulateQuery>,
) -> Result<Json<SimulationResult>, ApiError> {
    state
        .optimizer
        .engine()
        .simulate(&state.site.with_battery(query.capacity), query.detail)
        .map(Json)
        .map_err(|e| bad_request(&e))
}

/// Returns the investment breakdown of an arbitrary capacity.
///
/// `GET /investment?capacity=N` → 200 + `InvestmentDetails` JSON
/// `GET /investment?capacity=-1` → 400 + `ErrorResponse`
pub async fn get_investment(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InvestmentQuery>,
) -> Result<Json<InvestmentDetails>, ApiError> {
    ensure_non_negative("capacity", query.capacity).map_err(|e| bad_request(&e))?;
    Ok(Json(state.optimizer.engine().cost_curve().investment(
        query.capacity,
        sizing_power_kw(query.capacity),
        state.site.subsidy_per_kw,
    )))
}
