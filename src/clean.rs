//! Cleaning stage: turns [`RawRecord`]s into [`CleanRecord`]s.
//!
//! Checks run in a fixed order per row. Whitespace is trimmed first, then
//! rows carrying the `NaN` sentinel in a required column are dropped, then
//! the remaining text is typed. Rows that pass the sentinel checks but fail
//! to parse become [`RowError`]s; [`CleanMode`] decides whether that aborts
//! the batch or only excludes the row.

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::errors::RowError;
use crate::records::{CleanRecord, Field, RawRecord};

/// Literal text marking a missing value in the dataset.
pub const SENTINEL: &str = "NaN";

const ORDER_DATE_FORMAT: &str = "%d-%m-%Y";
const TIME_UNIT_SEPARATOR: &str = "(min) ";

/// How a malformed row affects the batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CleanMode {
    /// Record the error in the report and keep going.
    #[default]
    Lenient,
    /// Fail the whole batch on the first malformed row.
    Strict,
}

/// Per-run account of what the cleaning stage kept and threw away.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CleanReport {
    pub input_rows: usize,
    pub kept_rows: usize,
    /// Rows dropped because the named column held the sentinel.
    pub dropped: BTreeMap<Field, usize>,
    /// Rows excluded because a value could not be parsed.
    pub errors: Vec<RowError>,
}

impl CleanReport {
    pub fn sentinel_rows(&self) -> usize {
        self.dropped.values().sum()
    }

    pub fn dropped_rows(&self) -> usize {
        self.sentinel_rows() + self.errors.len()
    }
}

/// Output of [`clean_records`].
#[derive(Debug, Clone)]
pub struct Cleaned {
    pub records: Vec<CleanRecord>,
    pub report: CleanReport,
}

enum Outcome {
    Kept(Box<CleanRecord>),
    Dropped(Field),
}

/// Cleans a full batch of raw rows.
///
/// # Errors
///
/// In [`CleanMode::Strict`], returns the first [`RowError`] encountered.
#[tracing::instrument(skip_all, fields(rows = raw.len(), ?mode))]
pub fn clean_records(raw: &[RawRecord], mode: CleanMode) -> Result<Cleaned> {
    let mut report = CleanReport {
        input_rows: raw.len(),
        ..Default::default()
    };
    let mut records = Vec::with_capacity(raw.len());

    for (row, record) in raw.iter().enumerate() {
        match clean_row(row, record) {
            Ok(Outcome::Kept(mut clean)) => {
                clean.index = records.len();
                records.push(*clean);
            }
            Ok(Outcome::Dropped(field)) => {
                debug!(row, %field, "Dropping row with missing value");
                *report.dropped.entry(field).or_default() += 1;
            }
            Err(err) => match mode {
                CleanMode::Strict => return Err(err.into()),
                CleanMode::Lenient => {
                    if report.errors.len() < 5 {
                        warn!(error = %err, "Excluding malformed row");
                    }
                    report.errors.push(err);
                }
            },
        }
    }

    report.kept_rows = records.len();

    info!(
        input = report.input_rows,
        kept = report.kept_rows,
        sentinel = report.sentinel_rows(),
        malformed = report.errors.len(),
        "Cleaning complete"
    );

    Ok(Cleaned { records, report })
}

fn is_missing(value: &str) -> bool {
    value == SENTINEL
}

fn parse_value<T: FromStr>(row: usize, field: Field, value: &str) -> Result<T, RowError> {
    value.parse().map_err(|_| RowError::Malformed {
        row,
        field,
        value: value.to_string(),
    })
}

fn parse_order_date(row: usize, value: &str) -> Result<NaiveDate, RowError> {
    NaiveDate::parse_from_str(value, ORDER_DATE_FORMAT).map_err(|_| RowError::Malformed {
        row,
        field: Field::OrderDate,
        value: value.to_string(),
    })
}

/// Keeps only the integer that follows the `(min) ` unit prefix.
fn parse_time_taken(row: usize, value: &str) -> Result<i64, RowError> {
    let minutes = value
        .split(TIME_UNIT_SEPARATOR)
        .nth(1)
        .ok_or_else(|| RowError::MissingUnit {
            row,
            value: value.to_string(),
        })?;
    parse_value(row, Field::TimeTaken, minutes.trim())
}

fn clean_row(row: usize, raw: &RawRecord) -> Result<Outcome, RowError> {
    let raw = raw.trimmed();

    if is_missing(&raw.road_traffic_density) {
        return Ok(Outcome::Dropped(Field::RoadTrafficDensity));
    }
    if is_missing(&raw.delivery_person_age) {
        return Ok(Outcome::Dropped(Field::CourierAge));
    }
    let age = parse_value(row, Field::CourierAge, &raw.delivery_person_age)?;

    if is_missing(&raw.delivery_person_rating) {
        return Ok(Outcome::Dropped(Field::CourierRating));
    }
    let rating = parse_value(row, Field::CourierRating, &raw.delivery_person_rating)?;

    if is_missing(&raw.city) {
        return Ok(Outcome::Dropped(Field::City));
    }
    if is_missing(&raw.festival) {
        return Ok(Outcome::Dropped(Field::Festival));
    }

    let order_date = parse_order_date(row, &raw.order_date)?;

    if is_missing(&raw.multiple_deliveries) {
        return Ok(Outcome::Dropped(Field::MultipleDeliveries));
    }
    let multiple_deliveries = parse_value(row, Field::MultipleDeliveries, &raw.multiple_deliveries)?;

    let vehicle_condition = parse_value(row, Field::VehicleCondition, &raw.vehicle_condition)?;
    let restaurant_latitude = parse_value(row, Field::RestaurantLatitude, &raw.restaurant_latitude)?;
    let restaurant_longitude =
        parse_value(row, Field::RestaurantLongitude, &raw.restaurant_longitude)?;
    let delivery_latitude = parse_value(row, Field::DeliveryLatitude, &raw.delivery_latitude)?;
    let delivery_longitude = parse_value(row, Field::DeliveryLongitude, &raw.delivery_longitude)?;

    let time_taken_min = parse_time_taken(row, &raw.time_taken)?;

    Ok(Outcome::Kept(Box::new(CleanRecord {
        index: 0,
        source_row: row,
        id: raw.id,
        delivery_person_id: raw.delivery_person_id,
        delivery_person_age: age,
        delivery_person_rating: rating,
        restaurant_latitude,
        restaurant_longitude,
        delivery_latitude,
        delivery_longitude,
        order_date,
        weather: raw.weather,
        road_traffic_density: raw.road_traffic_density,
        vehicle_condition,
        type_of_order: raw.type_of_order,
        type_of_vehicle: raw.type_of_vehicle,
        multiple_deliveries,
        festival: raw.festival,
        city: raw.city,
        time_taken_min,
    })))
}
