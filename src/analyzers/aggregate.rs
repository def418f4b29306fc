use clap::ValueEnum;

use crate::analyzers::company::{
    geo_markers, orders_per_courier_per_week, orders_per_day, orders_per_week, traffic_by_city,
    traffic_share,
};
use crate::analyzers::couriers::{
    age_extremes, rating_by_courier, rating_by_traffic, rating_by_weather, top_couriers,
    vehicle_condition_extremes,
};
use crate::analyzers::restaurants::{
    distance_by_city, distinct_couriers, festival_times, mean_distance, time_by_city,
    time_by_city_and_order_type, time_by_city_and_traffic,
};
use crate::analyzers::types::{CompanyView, CourierView, RestaurantView, Speed, View};
use crate::records::CleanRecord;

/// Dashboard page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ViewKind {
    Company,
    Couriers,
    Restaurants,
}

impl ViewKind {
    pub const ALL: [ViewKind; 3] = [ViewKind::Company, ViewKind::Couriers, ViewKind::Restaurants];

    pub fn name(&self) -> &'static str {
        match self {
            ViewKind::Company => "company",
            ViewKind::Couriers => "couriers",
            ViewKind::Restaurants => "restaurants",
        }
    }
}

pub fn company_view(records: &[CleanRecord]) -> CompanyView {
    CompanyView {
        orders_per_day: orders_per_day(records),
        traffic_share: traffic_share(records),
        traffic_by_city: traffic_by_city(records),
        orders_per_week: orders_per_week(records),
        orders_per_courier_per_week: orders_per_courier_per_week(records),
        map_markers: geo_markers(records),
    }
}

pub fn courier_view(records: &[CleanRecord], top_n: usize) -> CourierView {
    CourierView {
        age: age_extremes(records),
        vehicle_condition: vehicle_condition_extremes(records),
        rating_by_courier: rating_by_courier(records),
        rating_by_traffic: rating_by_traffic(records),
        rating_by_weather: rating_by_weather(records),
        fastest: top_couriers(records, Speed::Fastest, top_n),
        slowest: top_couriers(records, Speed::Slowest, top_n),
    }
}

pub fn restaurant_view(records: &[CleanRecord]) -> RestaurantView {
    RestaurantView {
        distinct_couriers: distinct_couriers(records),
        mean_distance_km: mean_distance(records),
        festival: festival_times(records),
        distance_by_city: distance_by_city(records),
        time_by_city: time_by_city(records),
        time_by_city_and_traffic: time_by_city_and_traffic(records),
        time_by_city_and_order_type: time_by_city_and_order_type(records),
    }
}

/// Computes every aggregate the selected page shows.
pub fn build_view(kind: ViewKind, records: &[CleanRecord], top_n: usize) -> View {
    match kind {
        ViewKind::Company => View::Company(company_view(records)),
        ViewKind::Couriers => View::Couriers(courier_view(records, top_n)),
        ViewKind::Restaurants => View::Restaurants(restaurant_view(records)),
    }
}
