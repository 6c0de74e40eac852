//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::cost::{CostBreakpoint, CostCurve, DEFAULT_BREAKPOINTS};
use crate::profile::BusinessCategory;
use crate::sim::optimizer::{COMPARISON_SIZES, CandidateSizes, Optimizer, sizing_power_kw};
use crate::sim::types::{SimulationInput, SiteInput};
use crate::sim::Engine;

/// Top-level scenario configuration parsed from TOML.
///
/// All sections have defaults matching the `default` preset. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::from_preset`] for a built-in scenario.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Consumer, PV and tariff parameters.
    #[serde(default)]
    pub site: SiteConfig,
    /// Fixed battery, bypassing the optimizer when a capacity is set.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Candidate sizes for the sweep.
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    /// Unit-cost curve.
    #[serde(default)]
    pub cost: CostConfig,
}

/// Consumer, PV and tariff parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Business category name (unknown names fall back to `Allgemein`).
    pub category: BusinessCategory,
    /// Annual consumption (kWh).
    pub annual_consumption_kwh: f64,
    /// Annual PV production (kWh).
    pub annual_production_kwh: f64,
    /// Grid price per kWh.
    pub electricity_price: f64,
    /// Feed-in tariff per kWh.
    pub feed_in_tariff: f64,
    /// Battery round-trip efficiency (0.0-1.0).
    pub efficiency: f64,
    /// Construction subsidy per kW of battery power.
    pub subsidy_per_kw: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let site = SiteInput::default();
        Self {
            category: site.business_category,
            annual_consumption_kwh: site.annual_consumption_kwh,
            annual_production_kwh: site.annual_production_kwh,
            electricity_price: site.electricity_price,
            feed_in_tariff: site.feed_in_tariff,
            efficiency: site.efficiency,
            subsidy_per_kw: site.subsidy_per_kw,
        }
    }
}

/// Fixed battery parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Capacity (kWh); when absent the optimizer chooses one.
    pub capacity_kwh: Option<f64>,
    /// Power (kW); defaults to half the capacity.
    pub max_power_kw: Option<f64>,
}

/// Optimizer sweep parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizerConfig {
    /// Candidate capacities (kWh), swept in order.
    pub candidates: Vec<f64>,
    /// Capacities for the side-by-side comparison (kWh).
    pub comparison_sizes: Vec<f64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            candidates: CandidateSizes::default().to_vec(),
            comparison_sizes: COMPARISON_SIZES.to_vec(),
        }
    }
}

/// Unit-cost curve breakpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostConfig {
    pub breakpoints: Vec<CostBreakpoint>,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            breakpoints: DEFAULT_BREAKPOINTS.to_vec(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"site.efficiency"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["default", "farm", "office"];

    /// Pig farm with heating-driven winter load and a small PV array.
    pub fn farm() -> Self {
        Self {
            site: SiteConfig {
                category: BusinessCategory::PigletBreeding,
                annual_consumption_kwh: 180_000.0,
                annual_production_kwh: 120_000.0,
                electricity_price: 0.26,
                ..SiteConfig::default()
            },
            ..Self::default()
        }
    }

    /// Administration building closed at weekends and in summer holidays.
    pub fn office() -> Self {
        Self {
            site: SiteConfig {
                category: BusinessCategory::Administration,
                annual_consumption_kwh: 90_000.0,
                annual_production_kwh: 70_000.0,
                electricity_price: 0.31,
                feed_in_tariff: 0.08,
                ..SiteConfig::default()
            },
            ..Self::default()
        }
    }

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "default" => Ok(Self::default()),
            "farm" => Ok(Self::farm()),
            "office" => Ok(Self::office()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Site parameters as an engine input.
    pub fn site_input(&self) -> SiteInput {
        let s = &self.site;
        SiteInput {
            business_category: s.category,
            annual_consumption_kwh: s.annual_consumption_kwh,
            annual_production_kwh: s.annual_production_kwh,
            electricity_price: s.electricity_price,
            feed_in_tariff: s.feed_in_tariff,
            efficiency: s.efficiency,
            subsidy_per_kw: s.subsidy_per_kw,
        }
    }

    /// Fixed-battery input, if the scenario pins a capacity.
    pub fn fixed_battery_input(&self) -> Option<SimulationInput> {
        let capacity = self.battery.capacity_kwh?;
        let power = self
            .battery
            .max_power_kw
            .unwrap_or_else(|| sizing_power_kw(capacity));
        Some(self.site_input().with_battery_power(capacity, power))
    }

    /// Builds the optimizer described by the `[optimizer]` and `[cost]`
    /// sections.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the cost breakpoints are unusable.
    pub fn optimizer(&self) -> Result<Optimizer, ConfigError> {
        let curve = CostCurve::new(self.cost.breakpoints.clone())
            .map_err(|e| ConfigError::new("cost.breakpoints", e.to_string()))?;
        Ok(Optimizer::new(
            Engine::new(curve),
            CandidateSizes::from_vec(self.optimizer.candidates.clone()),
        ))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.site;

        for (field, value) in [
            ("site.annual_consumption_kwh", s.annual_consumption_kwh),
            ("site.annual_production_kwh", s.annual_production_kwh),
            ("site.subsidy_per_kw", s.subsidy_per_kw),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(ConfigError::new(field, "must be a finite value >= 0"));
            }
        }
        if !(0.0..=1.0).contains(&s.efficiency) {
            errors.push(ConfigError::new("site.efficiency", "must be in [0.0, 1.0]"));
        }
        if !s.electricity_price.is_finite() {
            errors.push(ConfigError::new("site.electricity_price", "must be finite"));
        }
        if !s.feed_in_tariff.is_finite() {
            errors.push(ConfigError::new("site.feed_in_tariff", "must be finite"));
        }

        let bat = &self.battery;
        if bat.capacity_kwh.is_some_and(|c| !c.is_finite() || c < 0.0) {
            errors.push(ConfigError::new("battery.capacity_kwh", "must be >= 0"));
        }
        if bat.max_power_kw.is_some_and(|p| !p.is_finite() || p < 0.0) {
            errors.push(ConfigError::new("battery.max_power_kw", "must be >= 0"));
        }
        if bat.max_power_kw.is_some() && bat.capacity_kwh.is_none() {
            errors.push(ConfigError::new(
                "battery.max_power_kw",
                "requires battery.capacity_kwh",
            ));
        }

        let opt = &self.optimizer;
        if opt.candidates.is_empty() {
            errors.push(ConfigError::new("optimizer.candidates", "must not be empty"));
        }
        if opt.candidates.iter().any(|&c| !c.is_finite() || c <= 0.0) {
            errors.push(ConfigError::new("optimizer.candidates", "sizes must be > 0"));
        }
        if opt.comparison_sizes.iter().any(|&c| !c.is_finite() || c <= 0.0) {
            errors.push(ConfigError::new(
                "optimizer.comparison_sizes",
                "sizes must be > 0",
            ));
        }

        if let Err(e) = CostCurve::new(self.cost.breakpoints.clone()) {
            errors.push(ConfigError::new("cost.breakpoints", e.to_string()));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preset_valid() {
        let cfg = ScenarioConfig::default();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "default should be valid: {errors:?}");
    }

    #[test]
    fn default_matches_site_defaults() {
        assert_eq!(ScenarioConfig::default().site_input(), SiteInput::default());
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[site]
category = "Hotel"
annual_consumption_kwh = 120000.0
annual_production_kwh = 80000.0
electricity_price = 0.30
feed_in_tariff = 0.06
efficiency = 0.92
subsidy_per_kw = 80.0

[battery]
capacity_kwh = 300.0
max_power_kw = 100.0

[optimizer]
candidates = [50.0, 100.0, 200.0]
comparison_sizes = [100.0]

[[cost.breakpoints]]
capacity_kwh = 0.0
unit_cost = 600.0

[[cost.breakpoints]]
capacity_kwh = 500.0
unit_cost = 300.0
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(
            cfg.as_ref().map(|c| c.site.category),
            Some(BusinessCategory::Hotel)
        );
        let input = cfg.as_ref().and_then(ScenarioConfig::fixed_battery_input);
        assert_eq!(input.as_ref().map(|i| i.max_power_kw), Some(100.0));
        let optimizer = cfg.as_ref().map(ScenarioConfig::optimizer);
        assert!(matches!(optimizer, Some(Ok(ref o)) if o.candidates().len() == 3));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[site]
annual_consumption_kwh = 75000.0
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).ok();
        assert_eq!(
            cfg.as_ref().map(|c| c.site.annual_consumption_kwh),
            Some(75_000.0)
        );
        assert_eq!(cfg.as_ref().map(|c| c.site.efficiency), Some(0.9));
        assert_eq!(cfg.as_ref().map(|c| c.optimizer.candidates.len()), Some(46));
        assert!(cfg.as_ref().is_some_and(|c| c.fixed_battery_input().is_none()));
    }

    #[test]
    fn fixed_battery_defaults_to_half_c_rate() {
        let toml = "[battery]\ncapacity_kwh = 80.0\n";
        let cfg = ScenarioConfig::from_toml_str(toml).ok();
        let input = cfg.as_ref().and_then(ScenarioConfig::fixed_battery_input);
        assert_eq!(input.map(|i| i.max_power_kw), Some(40.0));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[site]
bogus_field = true
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn validation_catches_bad_efficiency() {
        let mut cfg = ScenarioConfig::default();
        cfg.site.efficiency = 1.5;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "site.efficiency"));
    }

    #[test]
    fn validation_catches_negative_consumption() {
        let mut cfg = ScenarioConfig::default();
        cfg.site.annual_consumption_kwh = -10.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "site.annual_consumption_kwh"));
    }

    #[test]
    fn validation_catches_empty_candidates_and_breakpoints() {
        let mut cfg = ScenarioConfig::default();
        cfg.optimizer.candidates.clear();
        cfg.cost.breakpoints.clear();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "optimizer.candidates"));
        assert!(errors.iter().any(|e| e.field == "cost.breakpoints"));
    }

    #[test]
    fn validation_catches_power_without_capacity() {
        let mut cfg = ScenarioConfig::default();
        cfg.battery.max_power_kw = Some(10.0);
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "battery.max_power_kw"));
    }

    #[test]
    fn farm_has_winter_load() {
        let farm = ScenarioConfig::farm();
        assert_eq!(
            farm.site.category.load_shape().seasonal,
            crate::profile::SeasonalMode::WinterPeak
        );
    }
}
