//! Core simulation types: site and battery inputs, hourly detail records.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SimulationError, ensure_non_negative};
use crate::profile::BusinessCategory;

/// Charge/discharge power as a fraction of capacity used when sizing.
pub const C_RATE: f64 = 0.5;

/// Site and tariff parameters shared by every candidate battery.
///
/// # Examples
///
/// ```
/// use bess_sizer::sim::types::SiteInput;
///
/// let site = SiteInput::default();
/// let input = site.with_battery(200.0);
/// assert_eq!(input.max_power_kw, 100.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteInput {
    /// Business category selecting the consumption shape.
    pub business_category: BusinessCategory,
    /// Annual consumption (kWh).
    pub annual_consumption_kwh: f64,
    /// Annual PV production (kWh).
    pub annual_production_kwh: f64,
    /// Grid purchase price (currency per kWh).
    pub electricity_price: f64,
    /// Feed-in remuneration (currency per kWh).
    pub feed_in_tariff: f64,
    /// Round-trip efficiency, applied on discharge (0.0-1.0).
    pub efficiency: f64,
    /// Construction subsidy charged per kW of battery power.
    pub subsidy_per_kw: f64,
}

impl Default for SiteInput {
    fn default() -> Self {
        Self {
            business_category: BusinessCategory::General,
            annual_consumption_kwh: 50_000.0,
            annual_production_kwh: 60_000.0,
            electricity_price: 0.28,
            feed_in_tariff: 0.07,
            efficiency: 0.90,
            subsidy_per_kw: 100.0,
        }
    }
}

impl SiteInput {
    /// Full input for a battery of `capacity_kwh` at the sizing C-rate.
    pub fn with_battery(&self, capacity_kwh: f64) -> SimulationInput {
        self.with_battery_power(capacity_kwh, capacity_kwh * C_RATE)
    }

    /// Full input for a battery with an explicit power rating.
    pub fn with_battery_power(&self, capacity_kwh: f64, max_power_kw: f64) -> SimulationInput {
        SimulationInput {
            site: self.clone(),
            battery_capacity_kwh: capacity_kwh,
            max_power_kw,
        }
    }

    /// Rejects inputs that cannot describe a physical site.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidInput`] for negative or non-finite
    /// totals and subsidy, non-finite prices, or efficiency outside [0, 1].
    pub fn validate(&self) -> Result<(), SimulationError> {
        ensure_non_negative("annual_consumption_kwh", self.annual_consumption_kwh)?;
        ensure_non_negative("annual_production_kwh", self.annual_production_kwh)?;
        ensure_non_negative("subsidy_per_kw", self.subsidy_per_kw)?;
        if !self.electricity_price.is_finite() {
            return Err(SimulationError::invalid("electricity_price", "must be finite"));
        }
        if !self.feed_in_tariff.is_finite() {
            return Err(SimulationError::invalid("feed_in_tariff", "must be finite"));
        }
        if !(0.0..=1.0).contains(&self.efficiency) {
            return Err(SimulationError::invalid(
                "efficiency",
                format!("must be in [0.0, 1.0], got {}", self.efficiency),
            ));
        }
        Ok(())
    }
}

/// One simulation request: a site plus a concrete battery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Site and tariff parameters.
    #[serde(flatten)]
    pub site: SiteInput,
    /// Usable storage capacity (kWh).
    pub battery_capacity_kwh: f64,
    /// Symmetric charge/discharge power limit (kW).
    pub max_power_kw: f64,
}

impl SimulationInput {
    /// Validates the site and the battery.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidInput`] naming the first bad field.
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.site.validate()?;
        ensure_non_negative("battery_capacity_kwh", self.battery_capacity_kwh)?;
        ensure_non_negative("max_power_kw", self.max_power_kw)
    }

    /// Battery parameters for the dispatch loop.
    pub fn battery(&self) -> BatteryParams {
        BatteryParams {
            capacity_kwh: self.battery_capacity_kwh,
            max_power_kw: self.max_power_kw,
            efficiency: self.site.efficiency,
        }
    }
}

/// Battery parameters seen by the dispatch state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryParams {
    /// Usable capacity (kWh).
    pub capacity_kwh: f64,
    /// Charge and discharge limit per hour (kW, hence kWh per hour).
    pub max_power_kw: f64,
    /// Fraction of discharged energy that reaches the load.
    pub efficiency: f64,
}

/// Months whose representative day is captured in hourly detail.
///
/// Ordered chronologically so a [`DailyBreakdown`] iterates Jan, Apr, Jul,
/// Nov.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepresentativeMonth {
    January,
    April,
    July,
    November,
}

impl RepresentativeMonth {
    /// All representative months, one per quarter.
    pub const ALL: [Self; 4] = [Self::January, Self::April, Self::July, Self::November];

    /// Zero-based day index within the reference year.
    pub const fn day_index(self) -> usize {
        match self {
            Self::January => 14,
            Self::April => 104,
            Self::July => 195,
            Self::November => 319,
        }
    }

    /// Representative month whose day contains `hour` of the year, if any.
    pub fn for_hour(hour: usize) -> Option<Self> {
        let day = hour / 24;
        Self::ALL.into_iter().find(|m| m.day_index() == day)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::January => "January",
            Self::April => "April",
            Self::July => "July",
            Self::November => "November",
        }
    }
}

impl fmt::Display for RepresentativeMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Energy flows of one captured hour (all kWh).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyDataPoint {
    /// Hour of day (0-23).
    pub hour: usize,
    pub consumption: f64,
    pub production: f64,
    /// PV energy consumed directly by the load.
    pub pv_to_load: f64,
    /// Energy delivered by the battery after efficiency losses.
    pub battery_discharge: f64,
    pub grid_import: f64,
    pub battery_charge: f64,
    pub grid_export: f64,
    /// State of charge at the end of the hour.
    pub battery_soc: f64,
}

/// Hourly detail of each representative day, keyed by month.
pub type DailyBreakdown = BTreeMap<RepresentativeMonth, Vec<HourlyDataPoint>>;
