//! Hour-by-hour battery dispatch over a reference year.
//!
//! The battery is a self-consumption buffer: surplus PV charges it, deficits
//! drain it, and only what it cannot absorb or supply crosses the grid.
//! State of charge is the single piece of carried state; the year is a fold
//! over hours producing [`DispatchTotals`] and the final SoC.

use crate::profile::HourlySeries;

use super::types::{BatteryParams, DailyBreakdown, HourlyDataPoint, RepresentativeMonth};

/// Annual grid exchange with and without the battery (kWh).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DispatchTotals {
    pub import_with_battery: f64,
    pub export_with_battery: f64,
    pub import_without_battery: f64,
    pub export_without_battery: f64,
}

/// Battery state carried from one hour to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DispatchState {
    /// Stored energy (kWh), always within `[0, capacity]`.
    pub soc_kwh: f64,
}

/// Flows resolved for a single hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourOutcome {
    /// Energy put into the battery.
    pub charge: f64,
    /// Energy taken out of the battery, before efficiency losses.
    pub discharge: f64,
    /// Discharged energy that reaches the load.
    pub effective_discharge: f64,
    pub grid_import: f64,
    pub grid_export: f64,
    /// State after the hour.
    pub next: DispatchState,
}

/// Resolves one hour of surplus or deficit against the battery.
///
/// Charging is lossless; the efficiency is applied once, when energy
/// leaves the battery.
///
/// # Examples
///
/// ```
/// use bess_sizer::sim::dispatch::{DispatchState, step};
/// use bess_sizer::sim::types::BatteryParams;
///
/// let battery = BatteryParams { capacity_kwh: 10.0, max_power_kw: 5.0, efficiency: 0.9 };
/// let out = step(DispatchState::default(), 1.0, 8.0, &battery);
/// assert_eq!(out.charge, 5.0);
/// assert_eq!(out.grid_export, 2.0);
/// assert_eq!(out.next.soc_kwh, 5.0);
/// ```
pub fn step(
    state: DispatchState,
    consumption: f64,
    production: f64,
    battery: &BatteryParams,
) -> HourOutcome {
    let net = production - consumption;
    let soc = state.soc_kwh;

    if net > 0.0 {
        let headroom = (battery.capacity_kwh - soc).max(0.0);
        let charge = net.min(battery.max_power_kw).min(headroom);
        HourOutcome {
            charge,
            discharge: 0.0,
            effective_discharge: 0.0,
            grid_import: 0.0,
            grid_export: net - charge,
            next: DispatchState {
                soc_kwh: soc + charge,
            },
        }
    } else {
        let deficit = -net;
        let discharge = deficit.min(battery.max_power_kw).min(soc);
        let effective_discharge = discharge * battery.efficiency;
        HourOutcome {
            charge: 0.0,
            discharge,
            effective_discharge,
            grid_import: (deficit - effective_discharge).max(0.0),
            grid_export: 0.0,
            next: DispatchState {
                soc_kwh: soc - discharge,
            },
        }
    }
}

/// Output of a full-year dispatch run.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRun {
    pub totals: DispatchTotals,
    /// State after the last hour.
    pub final_state: DispatchState,
    /// Representative-day detail, present when capture was requested.
    pub daily: Option<DailyBreakdown>,
}

/// Runs the dispatch policy over every hour of `series`.
///
/// The battery starts empty at hour 0 and is never reset.
pub fn run(series: &HourlySeries, battery: &BatteryParams, capture_detail: bool) -> DispatchRun {
    let mut daily = capture_detail.then(|| {
        RepresentativeMonth::ALL
            .into_iter()
            .map(|m| (m, Vec::with_capacity(24)))
            .collect::<DailyBreakdown>()
    });

    let (totals, final_state) = series.hours().enumerate().fold(
        (DispatchTotals::default(), DispatchState::default()),
        |(mut totals, state), (hour, (consumption, production))| {
            let net = production - consumption;
            if net > 0.0 {
                totals.export_without_battery += net;
            } else {
                totals.import_without_battery -= net;
            }

            let out = step(state, consumption, production, battery);
            totals.import_with_battery += out.grid_import;
            totals.export_with_battery += out.grid_export;

            if let Some(days) = daily.as_mut()
                && let Some(month) = RepresentativeMonth::for_hour(hour)
            {
                days.entry(month)
                    .or_default()
                    .push(data_point(hour % 24, consumption, production, &out));
            }

            (totals, out.next)
        },
    );

    DispatchRun {
        totals,
        final_state,
        daily,
    }
}

fn data_point(
    hour_of_day: usize,
    consumption: f64,
    production: f64,
    out: &HourOutcome,
) -> HourlyDataPoint {
    HourlyDataPoint {
        hour: hour_of_day,
        consumption,
        production,
        pv_to_load: production.min(consumption),
        battery_discharge: out.effective_discharge,
        grid_import: out.grid_import,
        battery_charge: out.charge,
        grid_export: out.grid_export,
        battery_soc: out.next.soc_kwh,
    }
}
