//! Row shapes for the delivery dataset: the loosely typed [`RawRecord`] as it
//! appears in the CSV file and the well-typed [`CleanRecord`] produced by the
//! cleaning stage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::analyzers::utility::haversine_km;

/// Every input column the pipeline reads, named after its CSV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    OrderId,
    CourierId,
    CourierAge,
    CourierRating,
    RestaurantLatitude,
    RestaurantLongitude,
    DeliveryLatitude,
    DeliveryLongitude,
    OrderDate,
    Weather,
    RoadTrafficDensity,
    VehicleCondition,
    OrderType,
    VehicleType,
    MultipleDeliveries,
    Festival,
    City,
    TimeTaken,
}

impl Field {
    pub fn column(&self) -> &'static str {
        match self {
            Field::OrderId => "ID",
            Field::CourierId => "Delivery_person_ID",
            Field::CourierAge => "Delivery_person_Age",
            Field::CourierRating => "Delivery_person_Ratings",
            Field::RestaurantLatitude => "Restaurant_latitude",
            Field::RestaurantLongitude => "Restaurant_longitude",
            Field::DeliveryLatitude => "Delivery_location_latitude",
            Field::DeliveryLongitude => "Delivery_location_longitude",
            Field::OrderDate => "Order_Date",
            Field::Weather => "Weatherconditions",
            Field::RoadTrafficDensity => "Road_traffic_density",
            Field::VehicleCondition => "Vehicle_condition",
            Field::OrderType => "Type_of_order",
            Field::VehicleType => "Type_of_vehicle",
            Field::MultipleDeliveries => "multiple_deliveries",
            Field::Festival => "Festival",
            Field::City => "City",
            Field::TimeTaken => "Time_taken(min)",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.column())
    }
}

/// One delivery order exactly as read from the dataset.
///
/// Every column is kept as text: the numeric columns may carry stray
/// whitespace or the literal `NaN` sentinel, so typing happens in
/// [`crate::clean`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Delivery_person_ID")]
    pub delivery_person_id: String,
    #[serde(rename = "Delivery_person_Age")]
    pub delivery_person_age: String,
    #[serde(rename = "Delivery_person_Ratings")]
    pub delivery_person_rating: String,
    #[serde(rename = "Restaurant_latitude")]
    pub restaurant_latitude: String,
    #[serde(rename = "Restaurant_longitude")]
    pub restaurant_longitude: String,
    #[serde(rename = "Delivery_location_latitude")]
    pub delivery_latitude: String,
    #[serde(rename = "Delivery_location_longitude")]
    pub delivery_longitude: String,
    #[serde(rename = "Order_Date")]
    pub order_date: String,
    #[serde(rename = "Weatherconditions")]
    pub weather: String,
    #[serde(rename = "Road_traffic_density")]
    pub road_traffic_density: String,
    #[serde(rename = "Vehicle_condition")]
    pub vehicle_condition: String,
    #[serde(rename = "Type_of_order")]
    pub type_of_order: String,
    #[serde(rename = "Type_of_vehicle")]
    pub type_of_vehicle: String,
    #[serde(rename = "multiple_deliveries")]
    pub multiple_deliveries: String,
    #[serde(rename = "Festival")]
    pub festival: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Time_taken(min)")]
    pub time_taken: String,
}

impl RawRecord {
    /// Returns a copy with leading and trailing whitespace removed from every field.
    pub fn trimmed(&self) -> RawRecord {
        let t = |s: &String| s.trim().to_string();
        RawRecord {
            id: t(&self.id),
            delivery_person_id: t(&self.delivery_person_id),
            delivery_person_age: t(&self.delivery_person_age),
            delivery_person_rating: t(&self.delivery_person_rating),
            restaurant_latitude: t(&self.restaurant_latitude),
            restaurant_longitude: t(&self.restaurant_longitude),
            delivery_latitude: t(&self.delivery_latitude),
            delivery_longitude: t(&self.delivery_longitude),
            order_date: t(&self.order_date),
            weather: t(&self.weather),
            road_traffic_density: t(&self.road_traffic_density),
            vehicle_condition: t(&self.vehicle_condition),
            type_of_order: t(&self.type_of_order),
            type_of_vehicle: t(&self.type_of_vehicle),
            multiple_deliveries: t(&self.multiple_deliveries),
            festival: t(&self.festival),
            city: t(&self.city),
            time_taken: t(&self.time_taken),
        }
    }
}

/// A cleaned delivery order. Produced once per session and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanRecord {
    /// Contiguous position among the kept rows.
    pub index: usize,
    /// Position of the row in the input file (0-based, header excluded).
    pub source_row: usize,
    pub id: String,
    pub delivery_person_id: String,
    pub delivery_person_age: i64,
    pub delivery_person_rating: f64,
    pub restaurant_latitude: f64,
    pub restaurant_longitude: f64,
    pub delivery_latitude: f64,
    pub delivery_longitude: f64,
    pub order_date: NaiveDate,
    pub weather: String,
    pub road_traffic_density: String,
    pub vehicle_condition: i64,
    pub type_of_order: String,
    pub type_of_vehicle: String,
    pub multiple_deliveries: i64,
    pub festival: String,
    pub city: String,
    pub time_taken_min: i64,
}

impl CleanRecord {
    /// Great-circle distance between the restaurant and the delivery location, in km.
    pub fn distance_km(&self) -> f64 {
        haversine_km(
            (self.restaurant_latitude, self.restaurant_longitude),
            (self.delivery_latitude, self.delivery_longitude),
        )
    }

    /// Sunday-based week of the year, zero padded (`"00"`..=`"53"`).
    pub fn week_of_year(&self) -> String {
        self.order_date.format("%U").to_string()
    }
}
