//! Metric aggregation and dashboard view assembly.
//!
//! The company, couriers and restaurants modules hold pure functions over
//! filtered [`crate::records::CleanRecord`]s. [`aggregate`] combines them into
//! one serializable view per dashboard page and [`analyzer`] runs the whole
//! session: load, clean, filter, aggregate, export.

pub mod aggregate;
pub mod analyzer;
pub mod company;
pub mod couriers;
pub mod restaurants;
pub mod types;
pub mod utility;
