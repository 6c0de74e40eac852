//! Plain-text rendering of results for the terminal.

use std::fmt;

use crate::cost::InvestmentDetails;
use crate::sim::{Payback, SimulationResult};

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Years(y) => write!(f, "{y:.1} years"),
            Self::Never => f.write_str("never"),
        }
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Battery Report ---")?;
        writeln!(
            f,
            "Battery:               {:.0} kWh / {:.0} kW",
            self.battery_capacity_kwh, self.max_power_kw
        )?;
        writeln!(f, "Investment:            {:.2}", self.investment)?;
        writeln!(
            f,
            "Grid import:           {:.0} kWh (without battery {:.0} kWh)",
            self.grid_import_with_battery, self.grid_import_without_battery
        )?;
        writeln!(
            f,
            "Grid export:           {:.0} kWh (without battery {:.0} kWh)",
            self.grid_export_with_battery, self.grid_export_without_battery
        )?;
        writeln!(
            f,
            "Annual cost:           {:.2} (without battery {:.2})",
            self.annual_cost_with_battery, self.annual_cost_without_battery
        )?;
        writeln!(f, "Annual savings:        {:.2}", self.annual_savings)?;
        writeln!(f, "Self-sufficiency:      {:.1}%", self.self_sufficiency * 100.0)?;
        writeln!(f, "Self-consumption:      {:.1}%", self.self_consumption * 100.0)?;
        write!(f, "Payback:               {}", self.payback)
    }
}

impl fmt::Display for InvestmentDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Unit cost:             {:.2} per kWh", self.unit_cost)?;
        writeln!(f, "Storage cost:          {:.2}", self.storage_cost)?;
        writeln!(f, "Construction subsidy:  {:.2}", self.subsidy_cost)?;
        write!(f, "Total investment:      {:.2}", self.total_investment)
    }
}

/// Side-by-side table of several battery sizes.
pub struct ComparisonTable<'a>(pub &'a [SimulationResult]);

impl fmt::Display for ComparisonTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>10} {:>12} {:>12} {:>12} {:>8} {:>8}",
            "kWh", "investment", "savings/yr", "payback", "autarky", "own use"
        )?;
        for r in self.0 {
            let payback = r
                .payback
                .years()
                .map_or_else(|| "never".to_string(), |y| format!("{y:.1}"));
            writeln!(
                f,
                "{:>10.0} {:>12.2} {:>12.2} {:>12} {:>7.1}% {:>7.1}%",
                r.battery_capacity_kwh,
                r.investment,
                r.annual_savings,
                payback,
                r.self_sufficiency * 100.0,
                r.self_consumption * 100.0
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::simulate;
    use crate::sim::types::SiteInput;

    #[test]
    fn payback_display() {
        assert_eq!(Payback::Years(4.26).to_string(), "4.3 years");
        assert_eq!(Payback::Never.to_string(), "never");
    }

    #[test]
    fn report_lists_key_figures() {
        let r = simulate(&SiteInput::default().with_battery(100.0), false).unwrap();
        let text = r.to_string();
        assert!(text.starts_with("--- Battery Report ---"));
        assert!(text.contains("100 kWh / 50 kW"));
        assert!(text.contains("Self-sufficiency:"));
        assert!(text.contains("years"));
    }

    #[test]
    fn investment_display() {
        let text = crate::cost::investment(100.0, 50.0, 100.0).to_string();
        assert!(text.contains("Unit cost:             400.00 per kWh"));
        assert!(text.contains("Total investment:      45000.00"));
    }

    #[test]
    fn comparison_has_one_row_per_size() {
        let site = SiteInput::default();
        let results: Vec<SimulationResult> = [50.0, 500.0]
            .iter()
            .map(|&c| simulate(&site.with_battery(c), false).unwrap())
            .collect();
        let table = ComparisonTable(&results).to_string();
        assert_eq!(table.lines().count(), 3);
        assert!(table.lines().nth(2).unwrap_or("").trim_start().starts_with("500"));
    }
}
