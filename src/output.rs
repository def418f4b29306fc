//! Output formatting and persistence for dashboard results.
//!
//! Supports pretty-printing, JSON serialization, JSON files, and CSV append.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fmt::Debug;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::debug;

use crate::clean::CleanReport;
use crate::filter::FilterParams;
use crate::records::CleanRecord;

/// One row of the run log: which page was computed, with what selection and
/// how many rows survived each stage.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub timestamp: DateTime<Utc>,
    pub view: String,
    pub cutoff: NaiveDate,
    /// Selected traffic labels joined with `|`.
    pub traffic: String,
    pub input_rows: usize,
    pub clean_rows: usize,
    pub sentinel_rows: usize,
    pub malformed_rows: usize,
    pub filtered_rows: usize,
}

impl RunSummary {
    pub fn new(view: &str, params: &FilterParams, report: &CleanReport, filtered_rows: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            view: view.to_string(),
            cutoff: params.cutoff,
            traffic: params.traffic.iter().cloned().collect::<Vec<_>>().join("|"),
            input_rows: report.input_rows,
            clean_rows: report.kept_rows,
            sentinel_rows: report.sentinel_rows(),
            malformed_rows: report.errors.len(),
            filtered_rows,
        }
    }
}

/// Prints a value using Rust's debug pretty-print format.
pub fn print_pretty<T: Debug>(value: &T) {
    println!("{:#?}", value);
}

/// Prints a value as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a value as pretty-printed JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let body = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Appends a record as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record<T: Serialize>(path: &str, record: &T) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}

/// Writes the cleaned dataset as CSV, replacing any existing file.
pub fn write_clean_csv(path: &str, records: &[CleanRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    debug!(path, rows = records.len(), "Cleaned dataset written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::default_cutoff;
    use crate::records::tests::clean_record;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn summary() -> RunSummary {
        let params = FilterParams::new(default_cutoff(), ["Low", "Jam"]);
        RunSummary::new("company", &params, &CleanReport::default(), 0)
    }

    #[test]
    fn test_summary_joins_traffic_sorted() {
        assert_eq!(summary().traffic, "Jam|Low");
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&summary());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&summary()).unwrap();
    }

    #[test]
    fn test_append_record_writes_header_once() {
        let path = temp_path("delivery_dashboard_test_header.csv");
        let _ = fs::remove_file(&path);

        append_record(&path, &summary()).unwrap();
        append_record(&path, &summary()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // Header line should appear exactly once
        let header_count = content.lines().filter(|l| l.contains("timestamp")).count();
        assert_eq!(header_count, 1);
        assert_eq!(content.lines().count(), 3);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_json_creates_parent() {
        let dir = env::temp_dir().join("delivery_dashboard_test_json");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("summary.json");

        write_json(&path, &summary()).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["view"], "company");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_clean_csv() {
        let path = temp_path("delivery_dashboard_test_clean.csv");
        let records = vec![
            clean_record("1", "A", "Urban", "Jam"),
            clean_record("2", "B", "Urban", "Low"),
        ];

        write_clean_csv(&path, &records).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let back: Vec<CleanRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(back.len(), 2);
        assert_eq!(back[1].road_traffic_density, "Low");

        fs::remove_file(&path).unwrap();
    }
}
