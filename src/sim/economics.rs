//! Annual cost, savings, autarky metrics and payback from dispatch totals.

use serde::{Serialize, Serializer};

use super::dispatch::DispatchTotals;
use super::types::{DailyBreakdown, SimulationInput};

/// Years until the investment is recovered, or never.
///
/// Serializes as a number or `null`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payback {
    Years(f64),
    Never,
}

impl Payback {
    /// Payback for an investment and the annual savings it produces.
    ///
    /// # Examples
    ///
    /// ```
    /// use bess_sizer::sim::economics::Payback;
    ///
    /// assert_eq!(Payback::from_savings(10_000.0, 2_000.0), Payback::Years(5.0));
    /// assert_eq!(Payback::from_savings(10_000.0, 0.0), Payback::Never);
    /// ```
    pub fn from_savings(investment: f64, annual_savings: f64) -> Self {
        if annual_savings > 0.0 {
            Self::Years(investment / annual_savings)
        } else {
            Self::Never
        }
    }

    /// Payback in years, `None` when it never pays back.
    pub fn years(self) -> Option<f64> {
        match self {
            Self::Years(y) => Some(y),
            Self::Never => None,
        }
    }
}

impl Serialize for Payback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.years().serialize(serializer)
    }
}

/// Outcome of simulating one battery size for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    /// Simulated capacity (kWh).
    pub battery_capacity_kwh: f64,
    /// Power rating used (kW).
    pub max_power_kw: f64,
    /// Total up-front investment.
    pub investment: f64,
    pub grid_import_with_battery: f64,
    pub grid_export_with_battery: f64,
    pub grid_import_without_battery: f64,
    pub grid_export_without_battery: f64,
    pub annual_cost_with_battery: f64,
    pub annual_cost_without_battery: f64,
    /// `annual_cost_without_battery - annual_cost_with_battery`.
    pub annual_savings: f64,
    /// Share of consumption not drawn from the grid.
    pub self_sufficiency: f64,
    /// Share of production consumed or stored on site.
    pub self_consumption: f64,
    pub payback: Payback,
    /// Representative-day detail, if captured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily: Option<DailyBreakdown>,
}

impl SimulationResult {
    /// Derives the economics of a run from its grid totals.
    pub fn from_totals(
        input: &SimulationInput,
        totals: &DispatchTotals,
        investment: f64,
        daily: Option<DailyBreakdown>,
    ) -> Self {
        let site = &input.site;
        let price = site.electricity_price;
        let tariff = site.feed_in_tariff;

        let annual_cost_without_battery =
            totals.import_without_battery * price - totals.export_without_battery * tariff;
        let annual_cost_with_battery =
            totals.import_with_battery * price - totals.export_with_battery * tariff;
        let annual_savings = annual_cost_without_battery - annual_cost_with_battery;

        let self_consumption = if site.annual_production_kwh > 0.0 {
            (site.annual_production_kwh - totals.export_with_battery) / site.annual_production_kwh
        } else {
            0.0
        };
        let self_sufficiency = if site.annual_consumption_kwh > 0.0 {
            1.0 - totals.import_with_battery / site.annual_consumption_kwh
        } else {
            1.0
        };

        Self {
            battery_capacity_kwh: input.battery_capacity_kwh,
            max_power_kw: input.max_power_kw,
            investment,
            grid_import_with_battery: totals.import_with_battery,
            grid_export_with_battery: totals.export_with_battery,
            grid_import_without_battery: totals.import_without_battery,
            grid_export_without_battery: totals.export_without_battery,
            annual_cost_with_battery,
            annual_cost_without_battery,
            annual_savings,
            self_sufficiency,
            self_consumption,
            payback: Payback::from_savings(investment, annual_savings),
            daily,
        }
    }
}
