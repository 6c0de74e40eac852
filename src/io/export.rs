//! CSV export for representative-day detail and candidate sweeps.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::SimulationResult;
use crate::sim::types::DailyBreakdown;

/// Column header for the hourly detail export.
const DETAIL_HEADER: &str = "month,hour,consumption_kwh,production_kwh,pv_to_load_kwh,\
                             battery_discharge_kwh,grid_import_kwh,battery_charge_kwh,\
                             grid_export_kwh,battery_soc_kwh";

/// Column header for the sweep export.
const SWEEP_HEADER: &str = "capacity_kwh,investment,annual_savings,payback_years,\
                            self_sufficiency,self_consumption";

/// Exports representative-day detail to a CSV file at the given path.
///
/// # Arguments
///
/// * `daily` - Captured hourly detail, keyed by month
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_detail_csv(daily: &DailyBreakdown, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_detail_csv(daily, io::BufWriter::new(file))
}

/// Writes representative-day detail as CSV to any writer.
///
/// Rows are ordered by month (Jan, Apr, Jul, Nov), then hour of day.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_detail_csv(daily: &DailyBreakdown, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(DETAIL_HEADER.split(',').map(str::trim))?;

    for (month, points) in daily {
        for p in points {
            wtr.write_record(&[
                month.label().to_string(),
                p.hour.to_string(),
                format!("{:.4}", p.consumption),
                format!("{:.4}", p.production),
                format!("{:.4}", p.pv_to_load),
                format!("{:.4}", p.battery_discharge),
                format!("{:.4}", p.grid_import),
                format!("{:.4}", p.battery_charge),
                format!("{:.4}", p.grid_export),
                format!("{:.4}", p.battery_soc),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Exports one row per swept candidate to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_sweep_csv(results: &[SimulationResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_sweep_csv(results, io::BufWriter::new(file))
}

/// Writes candidate results as CSV to any writer.
///
/// The payback column is left empty for sizes that never pay back.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_sweep_csv(results: &[SimulationResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(SWEEP_HEADER.split(',').map(str::trim))?;

    for r in results {
        wtr.write_record(&[
            format!("{}", r.battery_capacity_kwh),
            format!("{:.2}", r.investment),
            format!("{:.2}", r.annual_savings),
            r.payback
                .years()
                .map(|y| format!("{y:.2}"))
                .unwrap_or_default(),
            format!("{:.4}", r.self_sufficiency),
            format!("{:.4}", r.self_consumption),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::types::SiteInput;
    use crate::sim::{Optimizer, simulate};

    fn detailed() -> SimulationResult {
        simulate(&SiteInput::default().with_battery(100.0), true).unwrap()
    }

    fn to_string(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap_or_default()
    }

    #[test]
    fn detail_header_and_row_count() {
        let r = detailed();
        let mut buf = Vec::new();
        write_detail_csv(r.daily.as_ref().unwrap(), &mut buf).unwrap();
        let output = to_string(buf);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0],
            "month,hour,consumption_kwh,production_kwh,pv_to_load_kwh,\
             battery_discharge_kwh,grid_import_kwh,battery_charge_kwh,\
             grid_export_kwh,battery_soc_kwh"
        );
        // 1 header + 4 days x 24 hours
        assert_eq!(lines.len(), 97);
        assert!(lines[1].starts_with("January,0,"));
        assert!(lines[96].starts_with("November,23,"));
    }

    #[test]
    fn detail_columns_parse() {
        let r = detailed();
        let mut buf = Vec::new();
        write_detail_csv(r.daily.as_ref().unwrap(), &mut buf).unwrap();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        for record in rdr.records() {
            let rec = record.unwrap();
            assert_eq!(rec.len(), 10);
            for i in 1..10 {
                assert!(rec[i].parse::<f64>().is_ok(), "column {i} should parse");
            }
        }
    }

    #[test]
    fn sweep_leaves_never_payback_empty() {
        let site = SiteInput {
            electricity_price: 0.0,
            feed_in_tariff: 0.0,
            ..SiteInput::default()
        };
        let results = Optimizer::default()
            .compare_sizes(&site, &[50.0, 100.0])
            .unwrap();
        let mut buf = Vec::new();
        write_sweep_csv(&results, &mut buf).unwrap();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().unwrap();
        assert_eq!(&headers[3], "payback_years");
        let rows: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r[3].is_empty()));
        assert_eq!(&rows[0][0], "50");
    }

    #[test]
    fn sweep_output_is_deterministic() {
        let results = Optimizer::default()
            .compare_sizes(&SiteInput::default(), &[20.0, 200.0])
            .unwrap();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_sweep_csv(&results, &mut buf1).unwrap();
        write_sweep_csv(&results, &mut buf2).unwrap();
        assert_eq!(buf1, buf2);

        let output = to_string(buf1);
        let first_row = output.lines().nth(1).unwrap_or("");
        let payback = first_row.split(',').nth(3).unwrap_or("");
        assert!(payback.parse::<f64>().is_ok(), "profitable size has a payback");
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("detail.csv");
        export_detail_csv(detailed().daily.as_ref().unwrap(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 97);
    }
}
