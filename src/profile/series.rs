//! Synthetic hourly consumption and production for a reference year.

use chrono::{Datelike, NaiveDate, Weekday};

use super::category::BusinessCategory;
use super::solar::{SOLAR_DAILY_SHAPE, seasonal_factor};

/// Days in the (non-leap) reference year.
pub const DAYS_PER_YEAR: usize = 365;

/// Hours in the reference year.
pub const HOURS_PER_YEAR: usize = DAYS_PER_YEAR * 24;

/// Calendar year used only to derive weekdays.
const REFERENCE_YEAR: i32 = 2023;

/// Hourly consumption and production over one reference year, in kWh.
///
/// Both series have [`HOURS_PER_YEAR`] entries and sum exactly (within
/// floating-point tolerance) to the annual totals they were built from.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySeries {
    /// Consumption per hour (kWh).
    pub consumption: Vec<f64>,
    /// PV production per hour (kWh).
    pub production: Vec<f64>,
}

impl HourlySeries {
    /// Synthesizes both series from annual totals and a business category.
    ///
    /// Each hour first receives a relative weight (daily shape, weekend
    /// factor, seasonal factor); the weights are then rescaled so every
    /// series reproduces its annual total. A series whose weights sum to
    /// zero is all zeros.
    ///
    /// # Examples
    ///
    /// ```
    /// use bess_sizer::profile::{BusinessCategory, HourlySeries};
    ///
    /// let series = HourlySeries::generate(50_000.0, 60_000.0, BusinessCategory::General);
    /// assert_eq!(series.len(), 8760);
    /// assert!((series.total_consumption() - 50_000.0).abs() < 1e-6);
    /// ```
    pub fn generate(
        annual_consumption: f64,
        annual_production: f64,
        category: BusinessCategory,
    ) -> Self {
        let shape = category.load_shape();
        let mut consumption = Vec::with_capacity(HOURS_PER_YEAR);
        let mut production = Vec::with_capacity(HOURS_PER_YEAR);

        for day in 0..DAYS_PER_YEAR {
            let day_of_year = day as u32 + 1;
            let weekend = is_weekend(day_of_year);
            let consumption_season = shape.seasonal.factor(day_of_year);
            let production_season = seasonal_factor(day_of_year);

            for hour in 0..24 {
                let mut weight = shape.hourly[hour];
                if weekend {
                    weight *= shape.weekend_factor;
                }
                weight *= consumption_season;
                consumption.push(weight.max(0.0));
                production.push(SOLAR_DAILY_SHAPE[hour] * production_season);
            }
        }

        scale_to_total(&mut consumption, annual_consumption);
        scale_to_total(&mut production, annual_production);

        Self {
            consumption,
            production,
        }
    }

    /// Number of hours in the series.
    pub fn len(&self) -> usize {
        self.consumption.len()
    }

    /// Returns `true` if the series holds no hours.
    pub fn is_empty(&self) -> bool {
        self.consumption.is_empty()
    }

    /// Sum of hourly consumption (kWh).
    pub fn total_consumption(&self) -> f64 {
        self.consumption.iter().sum()
    }

    /// Sum of hourly production (kWh).
    pub fn total_production(&self) -> f64 {
        self.production.iter().sum()
    }

    /// Iterates `(consumption, production)` pairs in hour order.
    pub fn hours(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.consumption
            .iter()
            .copied()
            .zip(self.production.iter().copied())
    }
}

/// Rescales `weights` in place so they sum to `total`.
fn scale_to_total(weights: &mut [f64], total: f64) {
    let sum: f64 = weights.iter().sum();
    let scale = if sum > 0.0 { total / sum } else { 0.0 };
    for w in weights.iter_mut() {
        *w *= scale;
    }
}

/// Whether the 1-based day of the reference year is a Saturday or Sunday.
fn is_weekend(day_of_year: u32) -> bool {
    NaiveDate::from_yo_opt(REFERENCE_YEAR, day_of_year)
        .is_some_and(|date| matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
}
