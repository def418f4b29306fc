//! CSV loader for the delivery dataset.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::records::RawRecord;

/// Decodes CSV bytes (with a header row) into [`RawRecord`]s.
///
/// # Errors
///
/// Returns an error if a row does not match the header or a required column
/// is absent.
pub fn parse_dataset(bytes: &[u8]) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        let record: RawRecord = result.with_context(|| format!("dataset row {i}"))?;
        rows.push(record);
    }

    Ok(rows)
}

/// Reads a dataset file, decompressing it first when the name ends in `.gz`.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read_dataset(path: impl AsRef<Path>) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let file = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    let bytes = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        let mut decoded = Vec::new();
        GzDecoder::new(file.as_slice())
            .read_to_end(&mut decoded)
            .with_context(|| format!("decompressing {}", path.display()))?;
        debug!(compressed = file.len(), decoded = decoded.len(), "Dataset decompressed");
        decoded
    } else {
        file
    };

    let rows = parse_dataset(&bytes)?;
    info!(rows = rows.len(), "Dataset loaded");
    Ok(rows)
}
