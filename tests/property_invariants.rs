//! Invariants checked over randomized sites and batteries.

mod common;

use approx::assert_relative_eq;
use bess_sizer::profile::HourlySeries;
use bess_sizer::sim::dispatch::{self, DispatchState, step};
use bess_sizer::sim::simulate;
use bess_sizer::sim::types::BatteryParams;
use rand::Rng;

const CASES: u64 = 12;
const EPS: f64 = 1e-9;

#[test]
fn profiles_reproduce_annual_totals() {
    let mut rng = common::seeded_rng(7);
    for _ in 0..CASES {
        let site = common::random_site(&mut rng);
        let series = HourlySeries::generate(
            site.annual_consumption_kwh,
            site.annual_production_kwh,
            site.business_category,
        );
        assert_eq!(series.len(), 8760);
        assert_relative_eq!(
            series.total_consumption(),
            site.annual_consumption_kwh,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            series.total_production(),
            site.annual_production_kwh,
            max_relative = 1e-9,
            epsilon = 1e-9
        );
        assert!(series.hours().all(|(c, p)| c >= 0.0 && p >= 0.0));
    }
}

#[test]
fn soc_and_power_stay_within_limits() {
    let mut rng = common::seeded_rng(11);
    for _ in 0..CASES {
        let site = common::random_site(&mut rng);
        let battery = BatteryParams {
            capacity_kwh: rng.random_range(0.0..2_000.0),
            max_power_kw: rng.random_range(0.0..1_000.0),
            efficiency: site.efficiency,
        };
        let series = HourlySeries::generate(
            site.annual_consumption_kwh,
            site.annual_production_kwh,
            site.business_category,
        );

        let mut state = DispatchState::default();
        for (consumption, production) in series.hours() {
            let out = step(state, consumption, production, &battery);
            assert!(out.next.soc_kwh >= -EPS);
            assert!(out.next.soc_kwh <= battery.capacity_kwh + EPS);
            assert!(out.charge <= battery.max_power_kw + EPS);
            assert!(out.discharge <= battery.max_power_kw + EPS);
            assert!(out.charge == 0.0 || out.discharge == 0.0);
            assert!(out.grid_import >= 0.0 && out.grid_export >= 0.0);
            assert!(out.effective_discharge <= out.discharge + EPS);
            state = out.next;
        }
    }
}

#[test]
fn hourly_energy_balances() {
    let mut rng = common::seeded_rng(23);
    let battery = BatteryParams {
        capacity_kwh: 50.0,
        max_power_kw: 25.0,
        efficiency: 0.9,
    };
    let mut state = DispatchState {
        soc_kwh: rng.random_range(0.0..50.0),
    };
    for _ in 0..1_000 {
        let consumption = rng.random_range(0.0..40.0);
        let production = rng.random_range(0.0..40.0);
        let out = step(state, consumption, production, &battery);
        // production + import + delivered discharge = consumption + export + charge
        assert_relative_eq!(
            production + out.grid_import + out.effective_discharge,
            consumption + out.grid_export + out.charge,
            epsilon = 1e-9
        );
        state = out.next;
    }
}

#[test]
fn baseline_does_not_depend_on_battery() {
    let mut rng = common::seeded_rng(31);
    for _ in 0..CASES {
        let site = common::random_site(&mut rng);
        let small = simulate(&site.with_battery(rng.random_range(0.0..100.0)), false).unwrap();
        let large = simulate(&site.with_battery(rng.random_range(100.0..2_000.0)), false).unwrap();
        assert_eq!(small.grid_import_without_battery, large.grid_import_without_battery);
        assert_eq!(small.grid_export_without_battery, large.grid_export_without_battery);
        assert_eq!(small.annual_cost_without_battery, large.annual_cost_without_battery);
    }
}

#[test]
fn battery_never_increases_grid_exchange() {
    let mut rng = common::seeded_rng(43);
    for _ in 0..CASES {
        let site = common::random_site(&mut rng);
        let series = HourlySeries::generate(
            site.annual_consumption_kwh,
            site.annual_production_kwh,
            site.business_category,
        );
        let battery = BatteryParams {
            capacity_kwh: rng.random_range(0.0..1_000.0),
            max_power_kw: rng.random_range(0.0..500.0),
            efficiency: site.efficiency,
        };
        let run = dispatch::run(&series, &battery, false);
        assert!(run.totals.export_with_battery <= run.totals.export_without_battery + EPS);
        assert!(run.final_state.soc_kwh <= battery.capacity_kwh + EPS);
        assert!(run.daily.is_none());
    }
}

#[test]
fn ratios_stay_in_unit_interval() {
    let mut rng = common::seeded_rng(59);
    for _ in 0..CASES {
        let site = common::random_site(&mut rng);
        let r = simulate(&site.with_battery(rng.random_range(0.0..1_500.0)), false).unwrap();
        assert!((-EPS..=1.0 + EPS).contains(&r.self_sufficiency));
        assert!((-EPS..=1.0 + EPS).contains(&r.self_consumption));
    }
}
