use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::filter::default_cutoff;

/// Settings for a dashboard run.
///
/// Stored as a JSON object on disk; every key is optional:
/// ```json
/// {
///   "dataset_path": "dataset/train.csv",
///   "report_dir": "reports",
///   "default_cutoff": "2022-04-13",
///   "top_n": 10,
///   "strict": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub dataset_path: String,
    pub report_dir: String,
    pub default_cutoff: NaiveDate,
    /// Delivery persons kept per city in the speed rankings.
    pub top_n: usize,
    /// Abort on the first malformed row instead of skipping it.
    pub strict: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: "dataset/train.csv".to_string(),
            report_dir: "reports".to_string(),
            default_cutoff: default_cutoff(),
            top_n: 10,
            strict: false,
        }
    }
}

impl DashboardConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {path}"))?;
        Ok(config)
    }

    /// Applies `DATASET_PATH` and `REPORT_DIR` from the environment.
    pub fn with_env(self) -> Self {
        self.with_overrides(
            std::env::var("DATASET_PATH").ok(),
            std::env::var("REPORT_DIR").ok(),
        )
    }

    fn with_overrides(mut self, dataset_path: Option<String>, report_dir: Option<String>) -> Self {
        if let Some(path) = dataset_path {
            self.dataset_path = path;
        }
        if let Some(dir) = report_dir {
            self.report_dir = dir;
        }
        self
    }

    /// Config file (when given) layered under the environment.
    pub fn resolve(path: Option<&str>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(base.with_env())
    }
}
