//! CSV and JSON export for simulation samples.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::ResultSet;
use crate::timefmt::TIMESTAMP_FORMAT;

/// Column header for CSV export.
const HEADER: &str = "timestamp,charging_power_kw,soc_pct,net_energy_charged_kwh,state";

/// Exports simulation samples to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &ResultSet, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, buf)
}

/// Writes simulation samples as CSV to any writer.
///
/// Writes a header row followed by one data row per sample. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &ResultSet, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for s in results.samples() {
        wtr.write_record(&[
            s.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            format!("{:.4}", s.charging_power_kw),
            format!("{:.4}", s.soc_pct),
            format!("{:.4}", s.net_energy_charged_kwh),
            s.state.as_str().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports simulation samples to a JSON file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation, serialization, or writing fails.
pub fn export_json(results: &ResultSet, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut buf = io::BufWriter::new(file);
    write_json(results, &mut buf)?;
    buf.flush()
}

/// Writes simulation samples as a pretty-printed JSON array of records.
///
/// Timestamps use ISO-8601 (`2025-01-31T09:15:00`).
///
/// # Errors
///
/// Returns an `io::Error` if serialization or writing fails.
pub fn write_json(results: &ResultSet, writer: impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(writer, results.samples())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioConfig;
    use crate::runner::run_scenario;

    fn baseline_results() -> ResultSet {
        run_scenario(&ScenarioConfig::baseline())
            .map(|run| run.results)
            .expect("baseline should run")
    }

    #[test]
    fn header_matches_schema() {
        let mut buf = Vec::new();
        write_csv(&baseline_results(), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let first_line = output.as_deref().unwrap_or("").lines().next().unwrap_or("");
        assert_eq!(
            first_line,
            "timestamp,charging_power_kw,soc_pct,net_energy_charged_kwh,state"
        );
    }

    #[test]
    fn row_count_matches_sample_count() {
        let results = baseline_results();
        let mut buf = Vec::new();
        write_csv(&results, &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        // 1 header + 49 samples
        assert_eq!(lines.len(), results.len() + 1);
        assert_eq!(lines.len(), 50);
        assert!(lines[1].starts_with("2025-01-31 09:00,11.0000,10.0000,0.0000,charging"));
    }

    #[test]
    fn csv_parses_back() {
        let mut buf = Vec::new();
        write_csv(&baseline_results(), &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(5));

        for record in rdr.records() {
            let rec = record.expect("every row should parse");
            for i in 1..4 {
                let val: Result<f32, _> = rec[i].parse();
                assert!(val.is_ok(), "column {i} should parse as f32");
            }
        }
    }

    #[test]
    fn json_records_use_iso_timestamps() {
        let mut buf = Vec::new();
        write_json(&baseline_results(), &mut buf).expect("json export should succeed");
        let json: serde_json::Value = serde_json::from_slice(&buf).expect("valid json");
        let records = json.as_array().expect("top-level array");
        assert_eq!(records.len(), 49);
        assert_eq!(records[0]["timestamp"], "2025-01-31T09:00:00");
        assert_eq!(records[1]["timestamp"], "2025-01-31T09:15:00");
        assert_eq!(records[0]["state"], "charging");
        assert!(records[0].get("soc_pct").is_some());
        assert!(records[0].get("net_energy_charged_kwh").is_some());
    }

    #[test]
    fn deterministic_output() {
        let results = baseline_results();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_json(&results, &mut buf1).ok();
        write_json(&results, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }
}
