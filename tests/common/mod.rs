//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use bess_sizer::profile::BusinessCategory;
use bess_sizer::sim::SiteInput;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Reference site: Allgemein, 50 MWh load, 60 MWh PV, 0.28 / 0.07 tariff,
/// 90% efficiency, 100 per kW subsidy.
pub fn reference_site() -> SiteInput {
    SiteInput {
        business_category: BusinessCategory::General,
        annual_consumption_kwh: 50_000.0,
        annual_production_kwh: 60_000.0,
        electricity_price: 0.28,
        feed_in_tariff: 0.07,
        efficiency: 0.9,
        subsidy_per_kw: 100.0,
    }
}

/// Deterministic RNG for randomized invariant checks.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random but valid site drawn from `rng`.
pub fn random_site(rng: &mut StdRng) -> SiteInput {
    let category = BusinessCategory::ALL[rng.random_range(0..BusinessCategory::ALL.len())];
    SiteInput {
        business_category: category,
        annual_consumption_kwh: rng.random_range(1_000.0..500_000.0),
        annual_production_kwh: rng.random_range(0.0..500_000.0),
        electricity_price: rng.random_range(0.05..0.5),
        feed_in_tariff: rng.random_range(0.0..0.15),
        efficiency: rng.random_range(0.5..=1.0),
        subsidy_per_kw: rng.random_range(0.0..200.0),
    }
}
