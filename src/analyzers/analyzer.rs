use anyhow::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::analyzers::aggregate::{ViewKind, build_view};
use crate::analyzers::types::View;
use crate::clean::{CleanMode, CleanReport, clean_records};
use crate::filter::{FilterParams, SidebarOptions, apply_filter};
use crate::output::write_json;
use crate::parser::read_dataset;
use crate::records::{CleanRecord, RawRecord};

/// Cleaned dataset for one session. Loaded and cleaned once, then read by
/// every interaction.
#[derive(Debug, Clone)]
pub struct Dashboard {
    records: Vec<CleanRecord>,
    report: CleanReport,
}

/// One page computed for one filter selection.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub kind: ViewKind,
    pub filtered_rows: usize,
    pub view: View,
}

impl Dashboard {
    pub fn from_raw(raw: &[RawRecord], mode: CleanMode) -> Result<Self> {
        let cleaned = clean_records(raw, mode)?;
        Ok(Self {
            records: cleaned.records,
            report: cleaned.report,
        })
    }

    /// Reads and cleans the dataset at `path`.
    pub fn load(path: &str, mode: CleanMode) -> Result<Self> {
        let raw = read_dataset(path)?;
        Self::from_raw(&raw, mode)
    }

    pub fn records(&self) -> &[CleanRecord] {
        &self.records
    }

    pub fn report(&self) -> &CleanReport {
        &self.report
    }

    pub fn sidebar(&self, default_cutoff: NaiveDate) -> SidebarOptions {
        SidebarOptions::from_records(&self.records, default_cutoff)
    }

    /// Filters the session's records and computes the requested page.
    #[tracing::instrument(skip(self, params), fields(view = kind.name(), cutoff = %params.cutoff))]
    pub fn render(&self, kind: ViewKind, params: &FilterParams, top_n: usize) -> Rendered {
        let filtered = apply_filter(&self.records, params);
        info!(rows = filtered.len(), "Filter applied");

        Rendered {
            kind,
            filtered_rows: filtered.len(),
            view: build_view(kind, &filtered, top_n),
        }
    }
}

/// Writes a rendered page to `<out_dir>/<view>.json` and returns the path.
pub fn export_view(rendered: &Rendered, out_dir: &Path) -> Result<PathBuf> {
    let path = out_dir.join(format!("{}.json", rendered.kind.name()));
    write_json(&path, &rendered.view)?;
    info!(path = %path.display(), "View exported");
    Ok(path)
}
