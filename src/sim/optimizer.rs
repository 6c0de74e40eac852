//! Battery size search: sweep candidate capacities and pick the best.

use std::ops::Deref;

use tracing::{info, warn};

use crate::error::SimulationError;

use super::economics::SimulationResult;
use super::engine::Engine;
use super::types::{C_RATE, SiteInput};

/// Capacity simulated when no candidate is configured (kWh).
pub const FALLBACK_CAPACITY_KWH: f64 = 100.0;

/// Capacities shown side by side in the comparison table (kWh).
pub const COMPARISON_SIZES: [f64; 5] = [50.0, 100.0, 250.0, 500.0, 1000.0];

/// Ordered list of capacities (kWh) swept by the optimizer.
///
/// Order matters: ties are resolved in favour of the earlier candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSizes(Vec<f64>);

impl CandidateSizes {
    pub fn from_vec(sizes: Vec<f64>) -> Self {
        Self(sizes)
    }
}

impl Default for CandidateSizes {
    /// 10-200 in steps of 10, 250-1000 in steps of 50, 1100-2000 in steps
    /// of 100.
    fn default() -> Self {
        let fine = (10..=200).step_by(10);
        let medium = (250..=1000).step_by(50);
        let coarse = (1100..=2000).step_by(100);
        Self(fine.chain(medium).chain(coarse).map(f64::from).collect())
    }
}

impl Deref for CandidateSizes {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Sweeps candidate sizes through the engine and selects one.
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    engine: Engine,
    candidates: CandidateSizes,
}

impl Optimizer {
    pub fn new(engine: Engine, candidates: CandidateSizes) -> Self {
        Self { engine, candidates }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn candidates(&self) -> &CandidateSizes {
        &self.candidates
    }

    /// Simulates every candidate at the sizing C-rate, in candidate order.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `site`, if any.
    pub fn sweep(&self, site: &SiteInput) -> Result<Vec<SimulationResult>, SimulationError> {
        self.simulate_sizes(site, &self.candidates)
    }

    /// Finds the most economical battery size for `site`.
    ///
    /// The candidate with the shortest positive payback wins. If no
    /// candidate ever pays back, the one with the highest self-sufficiency
    /// is chosen instead. Ties go to the earlier candidate. With no
    /// candidates at all, [`FALLBACK_CAPACITY_KWH`] is simulated.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `site`, if any.
    pub fn find_optimal(&self, site: &SiteInput) -> Result<SimulationResult, SimulationError> {
        let results = self.sweep(site)?;
        match select_best(results) {
            Some(best) => {
                info!(
                    capacity_kwh = best.battery_capacity_kwh,
                    payback = ?best.payback.years(),
                    self_sufficiency = best.self_sufficiency,
                    candidates = self.candidates.len(),
                    "selected battery size"
                );
                Ok(best)
            }
            None => {
                warn!(
                    capacity_kwh = FALLBACK_CAPACITY_KWH,
                    "no candidate sizes configured, using fallback"
                );
                self.engine
                    .simulate(&site.with_battery(FALLBACK_CAPACITY_KWH), false)
            }
        }
    }

    /// Simulates the fixed comparison sizes for side-by-side display.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `site`, if any.
    pub fn compare(&self, site: &SiteInput) -> Result<Vec<SimulationResult>, SimulationError> {
        self.compare_sizes(site, &COMPARISON_SIZES)
    }

    /// Simulates arbitrary `sizes` at the sizing C-rate, in the given order.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `site`, or of the first size that
    /// fails validation.
    pub fn compare_sizes(
        &self,
        site: &SiteInput,
        sizes: &[f64],
    ) -> Result<Vec<SimulationResult>, SimulationError> {
        self.simulate_sizes(site, sizes)
    }

    #[cfg(not(feature = "parallel"))]
    fn simulate_sizes(
        &self,
        site: &SiteInput,
        sizes: &[f64],
    ) -> Result<Vec<SimulationResult>, SimulationError> {
        site.validate()?;
        sizes
            .iter()
            .map(|&size| self.engine.simulate(&site.with_battery(size), false))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn simulate_sizes(
        &self,
        site: &SiteInput,
        sizes: &[f64],
    ) -> Result<Vec<SimulationResult>, SimulationError> {
        use rayon::prelude::*;

        site.validate()?;
        sizes
            .par_iter()
            .map(|&size| self.engine.simulate(&site.with_battery(size), false))
            .collect()
    }
}

/// Applies the payback-first, self-sufficiency-fallback rule.
///
/// Strict comparisons keep the first of equal candidates.
pub fn select_best(results: Vec<SimulationResult>) -> Option<SimulationResult> {
    let profitable = results
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.payback.years().filter(|&y| y > 0.0).map(|y| (i, y)))
        .fold(None, |best: Option<(usize, f64)>, (i, y)| match best {
            Some((_, best_y)) if y >= best_y => best,
            _ => Some((i, y)),
        });

    let index = profitable.map(|(i, _)| i).or_else(|| {
        results
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, r)| match best {
                Some((_, best_s)) if r.self_sufficiency <= best_s => best,
                _ => Some((i, r.self_sufficiency)),
            })
            .map(|(i, _)| i)
    })?;

    results.into_iter().nth(index)
}

/// Finds the optimal size with the default cost curve and candidates.
///
/// # Errors
///
/// Returns the validation error of `site`, if any.
pub fn find_optimal_size(site: &SiteInput) -> Result<SimulationResult, SimulationError> {
    Optimizer::default().find_optimal(site)
}

/// Power rating the optimizer pairs with `capacity_kwh`.
pub fn sizing_power_kw(capacity_kwh: f64) -> f64 {
    capacity_kwh * C_RATE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::economics::Payback;

    fn result(capacity: f64, payback: Payback, self_sufficiency: f64) -> SimulationResult {
        SimulationResult {
            battery_capacity_kwh: capacity,
            max_power_kw: capacity * C_RATE,
            investment: 0.0,
            grid_import_with_battery: 0.0,
            grid_export_with_battery: 0.0,
            grid_import_without_battery: 0.0,
            grid_export_without_battery: 0.0,
            annual_cost_with_battery: 0.0,
            annual_cost_without_battery: 0.0,
            annual_savings: 0.0,
            self_sufficiency,
            self_consumption: 0.0,
            payback,
            daily: None,
        }
    }

    #[test]
    fn default_candidates() {
        let sizes = CandidateSizes::default();
        assert_eq!(sizes.len(), 46);
        assert_eq!(sizes.first(), Some(&10.0));
        assert_eq!(sizes[19], 200.0);
        assert_eq!(sizes[20], 250.0);
        assert_eq!(sizes.last(), Some(&2000.0));
        assert!(sizes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn shortest_payback_wins() {
        let picked = select_best(vec![
            result(10.0, Payback::Years(9.0), 0.5),
            result(20.0, Payback::Years(7.0), 0.6),
            result(30.0, Payback::Never, 0.9),
            result(40.0, Payback::Years(8.0), 0.7),
        ]);
        assert_eq!(picked.map(|r| r.battery_capacity_kwh), Some(20.0));
    }

    #[test]
    fn payback_ties_keep_first() {
        let picked = select_best(vec![
            result(10.0, Payback::Years(7.0), 0.5),
            result(20.0, Payback::Years(7.0), 0.6),
        ]);
        assert_eq!(picked.map(|r| r.battery_capacity_kwh), Some(10.0));
    }

    #[test]
    fn falls_back_to_self_sufficiency() {
        let picked = select_best(vec![
            result(10.0, Payback::Never, 0.5),
            result(20.0, Payback::Never, 0.8),
            result(30.0, Payback::Never, 0.8),
            result(40.0, Payback::Never, 0.7),
        ]);
        assert_eq!(picked.map(|r| r.battery_capacity_kwh), Some(20.0));
    }

    #[test]
    fn zero_payback_is_not_profitable() {
        let picked = select_best(vec![
            result(10.0, Payback::Years(0.0), 0.1),
            result(20.0, Payback::Never, 0.4),
        ]);
        assert_eq!(picked.map(|r| r.battery_capacity_kwh), Some(20.0));
    }

    #[test]
    fn empty_selection_is_none() {
        assert!(select_best(Vec::new()).is_none());
    }

    #[test]
    fn empty_candidates_use_fallback() {
        let optimizer = Optimizer::new(Engine::default(), CandidateSizes::from_vec(Vec::new()));
        let r = optimizer.find_optimal(&SiteInput::default()).unwrap();
        assert_eq!(r.battery_capacity_kwh, FALLBACK_CAPACITY_KWH);
        assert_eq!(r.max_power_kw, 50.0);
    }

    #[test]
    fn unprofitable_prices_pick_highest_self_sufficiency() {
        let site = SiteInput {
            electricity_price: 0.0,
            feed_in_tariff: 0.0,
            ..SiteInput::default()
        };
        let optimizer = Optimizer::new(
            Engine::default(),
            CandidateSizes::from_vec(vec![10.0, 100.0, 400.0]),
        );
        let sweep = optimizer.sweep(&site).unwrap();
        assert!(sweep.iter().all(|r| r.payback == Payback::Never));
        let best = optimizer.find_optimal(&site).unwrap();
        let max = sweep
            .iter()
            .map(|r| r.self_sufficiency)
            .fold(f64::MIN, f64::max);
        assert_eq!(best.self_sufficiency, max);
    }

    #[test]
    fn comparison_covers_fixed_sizes() {
        let sizes: Vec<f64> = Optimizer::default()
            .compare(&SiteInput::default())
            .unwrap()
            .iter()
            .map(|r| r.battery_capacity_kwh)
            .collect();
        assert_eq!(sizes, COMPARISON_SIZES);
    }

    #[test]
    fn compare_sizes_rejects_negative_size() {
        let r = Optimizer::default().compare_sizes(&SiteInput::default(), &[50.0, -1.0]);
        assert!(r.is_err());
    }
}
