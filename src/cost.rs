//! Capacity-dependent storage cost and total investment.

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// One point of the unit-cost curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CostBreakpoint {
    /// Storage capacity (kWh).
    pub capacity_kwh: f64,
    /// Cost per kWh of capacity at this size.
    pub unit_cost: f64,
}

impl CostBreakpoint {
    pub const fn new(capacity_kwh: f64, unit_cost: f64) -> Self {
        Self {
            capacity_kwh,
            unit_cost,
        }
    }
}

/// Default unit-cost table: larger systems are cheaper per kWh.
pub const DEFAULT_BREAKPOINTS: [CostBreakpoint; 6] = [
    CostBreakpoint::new(0.0, 500.0),
    CostBreakpoint::new(100.0, 400.0),
    CostBreakpoint::new(250.0, 350.0),
    CostBreakpoint::new(500.0, 315.0),
    CostBreakpoint::new(1000.0, 280.0),
    CostBreakpoint::new(2000.0, 255.0),
];

/// Piecewise-linear unit cost over storage capacity.
///
/// Breakpoints are kept sorted by capacity. Capacities below the first or
/// above the last breakpoint take that breakpoint's unit cost.
#[derive(Debug, Clone, PartialEq)]
pub struct CostCurve {
    breakpoints: Vec<CostBreakpoint>,
}

impl CostCurve {
    /// Builds a curve from an unordered breakpoint table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is empty, contains non-finite or
    /// negative values, or repeats a capacity.
    pub fn new(mut breakpoints: Vec<CostBreakpoint>) -> Result<Self, SimulationError> {
        if breakpoints.is_empty() {
            return Err(SimulationError::EmptyCostCurve);
        }
        for bp in &breakpoints {
            crate::error::ensure_non_negative("cost.capacity_kwh", bp.capacity_kwh)?;
            crate::error::ensure_non_negative("cost.unit_cost", bp.unit_cost)?;
        }
        breakpoints.sort_by(|a, b| a.capacity_kwh.total_cmp(&b.capacity_kwh));
        if let Some(pair) = breakpoints
            .windows(2)
            .find(|w| w[0].capacity_kwh == w[1].capacity_kwh)
        {
            return Err(SimulationError::DuplicateBreakpoint(pair[0].capacity_kwh));
        }
        Ok(Self { breakpoints })
    }

    /// Sorted breakpoints backing this curve.
    pub fn breakpoints(&self) -> &[CostBreakpoint] {
        &self.breakpoints
    }

    /// Unit cost (per kWh) at `capacity_kwh`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bess_sizer::cost::CostCurve;
    ///
    /// let curve = CostCurve::default();
    /// assert_eq!(curve.unit_cost(50.0), 450.0);
    /// assert_eq!(curve.unit_cost(5000.0), 255.0);
    /// ```
    pub fn unit_cost(&self, capacity_kwh: f64) -> f64 {
        let first = self.breakpoints[0];
        let last = self.breakpoints[self.breakpoints.len() - 1];
        if capacity_kwh <= first.capacity_kwh {
            return first.unit_cost;
        }
        if capacity_kwh >= last.capacity_kwh {
            return last.unit_cost;
        }

        self.breakpoints
            .windows(2)
            .find(|w| capacity_kwh <= w[1].capacity_kwh)
            .map_or(last.unit_cost, |w| {
                let (lo, hi) = (w[0], w[1]);
                let pos = (capacity_kwh - lo.capacity_kwh) / (hi.capacity_kwh - lo.capacity_kwh);
                lo.unit_cost + pos * (hi.unit_cost - lo.unit_cost)
            })
    }

    /// Total investment for a storage system and its grid connection.
    ///
    /// # Arguments
    ///
    /// * `capacity_kwh` - Storage capacity
    /// * `power_kw` - Rated charge/discharge power
    /// * `subsidy_per_kw` - Construction subsidy charged per kW of power
    pub fn investment(
        &self,
        capacity_kwh: f64,
        power_kw: f64,
        subsidy_per_kw: f64,
    ) -> InvestmentDetails {
        let unit_cost = self.unit_cost(capacity_kwh);
        let storage_cost = unit_cost * capacity_kwh;
        let subsidy_cost = power_kw * subsidy_per_kw;
        InvestmentDetails {
            unit_cost,
            storage_cost,
            subsidy_cost,
            total_investment: storage_cost + subsidy_cost,
        }
    }
}

impl Default for CostCurve {
    fn default() -> Self {
        Self {
            breakpoints: DEFAULT_BREAKPOINTS.to_vec(),
        }
    }
}

/// Breakdown of the up-front cost of one storage configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvestmentDetails {
    /// Unit cost at the configured capacity (per kWh).
    pub unit_cost: f64,
    /// `unit_cost × capacity`.
    pub storage_cost: f64,
    /// `power × subsidy_per_kw`.
    pub subsidy_cost: f64,
    /// `storage_cost + subsidy_cost`.
    pub total_investment: f64,
}

/// Investment under the default cost curve.
pub fn investment(capacity_kwh: f64, power_kw: f64, subsidy_per_kw: f64) -> InvestmentDetails {
    CostCurve::default().investment(capacity_kwh, power_kw, subsidy_per_kw)
}
