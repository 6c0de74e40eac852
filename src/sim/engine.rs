//! Single-size simulation path: profiles, dispatch, investment, economics.

use tracing::debug;

use crate::cost::CostCurve;
use crate::error::SimulationError;
use crate::profile::HourlySeries;

use super::dispatch;
use super::economics::SimulationResult;
use super::types::{SimulationInput, SiteInput};

/// Simulation engine bound to a cost curve.
///
/// Holds no per-run state; every call generates its own profiles and
/// battery state, so one engine may serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    cost_curve: CostCurve,
}

impl Engine {
    /// Creates an engine pricing storage with `cost_curve`.
    pub fn new(cost_curve: CostCurve) -> Self {
        Self { cost_curve }
    }

    /// Returns the cost curve used for investments.
    pub fn cost_curve(&self) -> &CostCurve {
        &self.cost_curve
    }

    /// Simulates one year for the given site and battery.
    ///
    /// # Arguments
    ///
    /// * `input` - Site, tariff and battery parameters
    /// * `capture_detail` - Record hourly flows for the representative days
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidInput`] if `input` fails validation;
    /// nothing is simulated in that case.
    pub fn simulate(
        &self,
        input: &SimulationInput,
        capture_detail: bool,
    ) -> Result<SimulationResult, SimulationError> {
        input.validate()?;
        let site = &input.site;

        let series = HourlySeries::generate(
            site.annual_consumption_kwh,
            site.annual_production_kwh,
            site.business_category,
        );
        let run = dispatch::run(&series, &input.battery(), capture_detail);
        let investment = self.cost_curve.investment(
            input.battery_capacity_kwh,
            input.max_power_kw,
            site.subsidy_per_kw,
        );

        let result = SimulationResult::from_totals(
            input,
            &run.totals,
            investment.total_investment,
            run.daily,
        );
        debug!(
            capacity_kwh = result.battery_capacity_kwh,
            savings = result.annual_savings,
            payback = ?result.payback.years(),
            self_sufficiency = result.self_sufficiency,
            "simulated battery size"
        );
        Ok(result)
    }

    /// Re-simulates a previous result's capacity scaled by `factor`.
    ///
    /// Power is re-derived from the sizing C-rate, so doubling and then
    /// halving returns the original configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidScale`] if `factor` is not a
    /// positive finite number, or any validation error of the new input.
    pub fn rescale(
        &self,
        site: &SiteInput,
        previous: &SimulationResult,
        factor: f64,
        capture_detail: bool,
    ) -> Result<SimulationResult, SimulationError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(SimulationError::InvalidScale(factor));
        }
        let capacity = previous.battery_capacity_kwh * factor;
        self.simulate(&site.with_battery(capacity), capture_detail)
    }
}

/// Simulates one year under the default cost curve.
///
/// # Errors
///
/// See [`Engine::simulate`].
pub fn simulate(
    input: &SimulationInput,
    capture_detail: bool,
) -> Result<SimulationResult, SimulationError> {
    Engine::default().simulate(input, capture_detail)
}
