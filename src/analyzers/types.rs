//! Data types produced by the aggregation library and the view assembly.

use anyhow::bail;
use chrono::NaiveDate;
use serde::Serialize;
use std::str::FromStr;

/// Orders placed on a single day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyOrders {
    pub order_date: NaiveDate,
    pub orders: usize,
}

/// Fraction of the filtered orders that fall in one traffic bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficShare {
    pub road_traffic_density: String,
    pub orders: usize,
    pub share: f64,
}

/// Order count for one city and traffic bucket, sized bubble in the scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityTraffic {
    pub city: String,
    pub road_traffic_density: String,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyOrders {
    pub week_of_year: String,
    pub orders: usize,
}

/// Orders divided by the number of distinct delivery persons active that week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyCourierLoad {
    pub week_of_year: String,
    pub orders: usize,
    pub couriers: usize,
    pub orders_per_courier: f64,
}

/// Map pin at the median delivery location of a city and traffic bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub city: String,
    pub road_traffic_density: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Largest and smallest value of an integer column; both 0 when no rows remain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Extremes {
    pub max: i64,
    pub min: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourierRating {
    pub delivery_person_id: String,
    pub mean_rating: f64,
}

/// Mean and standard deviation of the rating within one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSpread {
    pub group: String,
    pub delivery_mean: f64,
    pub delivery_std: Option<f64>,
}

/// One row of the fastest/slowest delivery person tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourierSpeed {
    pub city: String,
    pub delivery_person_id: String,
    pub mean_time_taken: f64,
    /// 1-based position within the city.
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityDistance {
    pub city: String,
    pub mean_distance_km: f64,
}

/// Delivery time statistics for one group, bar chart with error bars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityTime {
    pub city: String,
    pub avg_time: f64,
    pub std_time: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityTrafficTime {
    pub city: String,
    pub road_traffic_density: String,
    pub avg_time: f64,
    pub std_time: Option<f64>,
}

/// City -> traffic hierarchy for the sunburst chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficTimeBreakdown {
    pub groups: Vec<CityTrafficTime>,
    /// Average of the groups' standard deviations, the color scale midpoint.
    pub color_midpoint: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityOrderTypeTime {
    pub city: String,
    pub type_of_order: String,
    pub avg_time: f64,
    pub std_time: Option<f64>,
}

/// Delivery time during and outside festivals, rounded to two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FestivalTimes {
    pub festival_avg: Option<f64>,
    pub festival_std: Option<f64>,
    pub regular_avg: Option<f64>,
    pub regular_std: Option<f64>,
}

/// Direction of the delivery person ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    Fastest,
    Slowest,
}

/// Value of the festival flag to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Festival {
    Yes,
    No,
}

impl Festival {
    pub fn label(&self) -> &'static str {
        match self {
            Festival::Yes => "Yes",
            Festival::No => "No",
        }
    }
}

/// Which delivery time statistic to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStatistic {
    Avg,
    Std,
}

impl FromStr for TimeStatistic {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "avg" => Ok(TimeStatistic::Avg),
            "std" => Ok(TimeStatistic::Std),
            other => bail!("unknown time statistic '{other}', expected 'avg' or 'std'"),
        }
    }
}

/// Company page: order volume, traffic mix and geography.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyView {
    pub orders_per_day: Vec<DailyOrders>,
    pub traffic_share: Vec<TrafficShare>,
    pub traffic_by_city: Vec<CityTraffic>,
    pub orders_per_week: Vec<WeeklyOrders>,
    pub orders_per_courier_per_week: Vec<WeeklyCourierLoad>,
    pub map_markers: Vec<MapMarker>,
}

/// Delivery person page: fleet extremes, ratings and speed rankings.
#[derive(Debug, Clone, Serialize)]
pub struct CourierView {
    pub age: Extremes,
    pub vehicle_condition: Extremes,
    pub rating_by_courier: Vec<CourierRating>,
    pub rating_by_traffic: Vec<RatingSpread>,
    pub rating_by_weather: Vec<RatingSpread>,
    pub fastest: Vec<CourierSpeed>,
    pub slowest: Vec<CourierSpeed>,
}

/// Restaurant page: distances and delivery times.
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantView {
    pub distinct_couriers: usize,
    pub mean_distance_km: Option<f64>,
    pub festival: FestivalTimes,
    pub distance_by_city: Vec<CityDistance>,
    pub time_by_city: Vec<CityTime>,
    pub time_by_city_and_traffic: TrafficTimeBreakdown,
    pub time_by_city_and_order_type: Vec<CityOrderTypeTime>,
}

/// One rendered dashboard page.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Company(CompanyView),
    Couriers(CourierView),
    Restaurants(RestaurantView),
}
