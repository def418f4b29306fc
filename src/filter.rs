//! Filter stage: narrows cleaned records by order date and traffic density.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

use crate::records::CleanRecord;

/// Cutoff preselected by the dashboard when nothing else is configured.
pub fn default_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 4, 13).expect("literal date is valid")
}

/// Parameters chosen by the user for one interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterParams {
    /// Exclusive upper bound on the order date.
    pub cutoff: NaiveDate,
    pub traffic: BTreeSet<String>,
}

impl FilterParams {
    pub fn new<I, S>(cutoff: NaiveDate, traffic: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cutoff,
            traffic: traffic.into_iter().map(Into::into).collect(),
        }
    }

    /// Allows every traffic label present in `records`.
    pub fn all_traffic(records: &[CleanRecord], cutoff: NaiveDate) -> Self {
        Self::new(cutoff, distinct_traffic_labels(records))
    }

    pub fn accepts(&self, record: &CleanRecord) -> bool {
        record.order_date < self.cutoff && self.traffic.contains(&record.road_traffic_density)
    }
}

/// Returns the records accepted by `params`, in their original order.
pub fn apply_filter(records: &[CleanRecord], params: &FilterParams) -> Vec<CleanRecord> {
    records
        .iter()
        .filter(|r| params.accepts(r))
        .cloned()
        .collect()
}

/// Traffic labels in order of first appearance.
pub fn distinct_traffic_labels(records: &[CleanRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.road_traffic_density.as_str()))
        .map(|r| r.road_traffic_density.clone())
        .collect()
}

/// Bounds and defaults for the dashboard's date slider and traffic selector.
#[derive(Debug, Clone, Serialize)]
pub struct SidebarOptions {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub default_cutoff: NaiveDate,
    pub traffic_labels: Vec<String>,
}

impl SidebarOptions {
    pub fn from_records(records: &[CleanRecord], default_cutoff: NaiveDate) -> Self {
        Self {
            min_date: records.iter().map(|r| r.order_date).min(),
            max_date: records.iter().map(|r| r.order_date).max(),
            default_cutoff,
            traffic_labels: distinct_traffic_labels(records),
        }
    }

    /// The selection the dashboard starts with: default cutoff, every label.
    pub fn default_params(&self) -> FilterParams {
        FilterParams::new(self.default_cutoff, self.traffic_labels.iter().cloned())
    }
}
