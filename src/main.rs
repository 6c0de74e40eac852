//! Battery sizer entry point: CLI wiring and config-driven optimization.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bess_sizer::config::ScenarioConfig;
use bess_sizer::io::export::{export_detail_csv, export_sweep_csv};
use bess_sizer::profile::BusinessCategory;
use bess_sizer::report::ComparisonTable;
use bess_sizer::sim::types::DailyBreakdown;
use bess_sizer::sim::{SimulationInput, SimulationResult, SiteInput};

/// Finds the most economical battery size for a PV site.
#[derive(Debug, Parser)]
#[command(name = "bess-sizer", version, about)]
struct Cli {
    /// Load scenario from TOML config file
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    scenario: Option<PathBuf>,

    /// Use a built-in preset (default, farm, office)
    #[arg(long, value_name = "NAME")]
    preset: Option<String>,

    /// Simulate a fixed capacity (kWh) instead of optimizing
    #[arg(long, value_name = "KWH")]
    capacity: Option<f64>,

    /// Re-simulate the chosen size scaled by this factor (e.g. 2 or 0.5)
    #[arg(long, value_name = "FACTOR")]
    scale: Option<f64>,

    /// Print hourly flows of the representative days
    #[arg(long)]
    detail: bool,

    /// Export representative-day detail to CSV
    #[arg(long, value_name = "PATH")]
    detail_out: Option<PathBuf>,

    /// Export every swept candidate to CSV
    #[arg(long, value_name = "PATH")]
    sweep_out: Option<PathBuf>,

    /// List business categories and exit
    #[arg(long)]
    list_categories: bool,

    /// Start REST API server after the optimization
    #[cfg(feature = "api")]
    #[arg(long)]
    serve: bool,

    /// API server port
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    port: u16,
}

fn load_scenario(cli: &Cli) -> Result<ScenarioConfig> {
    let scenario = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path)?
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name)?
    } else {
        ScenarioConfig::default()
    };

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        bail!("scenario has {} invalid field(s)", errors.len());
    }
    Ok(scenario)
}

/// Battery input pinned by the CLI or the scenario, if any.
fn fixed_input(cli: &Cli, scenario: &ScenarioConfig, site: &SiteInput) -> Option<SimulationInput> {
    cli.capacity
        .map(|capacity| site.with_battery(capacity))
        .or_else(|| scenario.fixed_battery_input())
}

fn print_detail(daily: &DailyBreakdown) {
    for (month, points) in daily {
        println!("\n{month} (representative day)");
        println!(
            "{:>4} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}",
            "hour", "load", "pv", "import", "export", "charge", "soc"
        );
        for p in points {
            println!(
                "{:>4} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2}",
                p.hour,
                p.consumption,
                p.production,
                p.grid_import,
                p.grid_export,
                p.battery_charge,
                p.battery_soc
            );
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bess_sizer=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list_categories {
        for category in BusinessCategory::ALL {
            println!("{:<20} {}", category.name(), category.description());
        }
        return Ok(());
    }

    let scenario = load_scenario(&cli)?;
    let site = scenario.site_input();
    let optimizer = scenario.optimizer()?;
    let engine = optimizer.engine();
    let capture = cli.detail || cli.detail_out.is_some();

    info!(
        category = %site.business_category,
        consumption_kwh = site.annual_consumption_kwh,
        production_kwh = site.annual_production_kwh,
        "sizing battery"
    );

    let mut result: SimulationResult = match fixed_input(&cli, &scenario, &site) {
        Some(input) => engine
            .simulate(&input, capture)
            .context("fixed battery simulation failed")?,
        None => {
            let best = optimizer.find_optimal(&site).context("optimization failed")?;
            if capture {
                let input = site.with_battery_power(best.battery_capacity_kwh, best.max_power_kw);
                engine.simulate(&input, true)?
            } else {
                best
            }
        }
    };

    if let Some(factor) = cli.scale {
        result = engine
            .rescale(&site, &result, factor, capture)
            .context("rescaling failed")?;
    }

    println!("{result}\n");
    let investment = engine.cost_curve().investment(
        result.battery_capacity_kwh,
        result.max_power_kw,
        site.subsidy_per_kw,
    );
    println!("{investment}\n");

    let comparison = optimizer.compare_sizes(&site, &scenario.optimizer.comparison_sizes)?;
    print!("{}", ComparisonTable(&comparison));

    if cli.detail
        && let Some(ref daily) = result.daily
    {
        print_detail(daily);
    }

    if let Some(ref path) = cli.detail_out
        && let Some(ref daily) = result.daily
    {
        export_detail_csv(daily, path)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        eprintln!("Detail written to {}", path.display());
    }

    #[cfg(feature = "api")]
    let need_sweep = cli.sweep_out.is_some() || cli.serve;
    #[cfg(not(feature = "api"))]
    let need_sweep = cli.sweep_out.is_some();

    let sweep = if need_sweep {
        optimizer.sweep(&site)?
    } else {
        Vec::new()
    };

    if let Some(ref path) = cli.sweep_out {
        export_sweep_csv(&sweep, path)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        eprintln!("Sweep written to {}", path.display());
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(bess_sizer::api::AppState {
            site,
            optimizer,
            optimal: result,
            candidates: sweep,
            comparison,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
        rt.block_on(bess_sizer::api::serve(state, addr))
            .context("API server failed")?;
    }

    Ok(())
}
