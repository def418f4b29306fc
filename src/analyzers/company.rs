//! Company-level aggregates: order volume over time, traffic mix, map markers.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

use crate::analyzers::types::{
    CityTraffic, DailyOrders, MapMarker, TrafficShare, WeeklyCourierLoad, WeeklyOrders,
};
use crate::analyzers::utility::{group_by, median};
use crate::records::CleanRecord;

/// Order count per day, chronological.
pub fn orders_per_day(records: &[CleanRecord]) -> Vec<DailyOrders> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for r in records {
        *counts.entry(r.order_date).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(order_date, orders)| DailyOrders { order_date, orders })
        .collect()
}

/// Share of orders per traffic density. Empty input yields no buckets.
pub fn traffic_share(records: &[CleanRecord]) -> Vec<TrafficShare> {
    let total = records.len();
    if total == 0 {
        return Vec::new();
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in records {
        *counts.entry(r.road_traffic_density.as_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(label, orders)| TrafficShare {
            road_traffic_density: label.to_string(),
            orders,
            share: orders as f64 / total as f64,
        })
        .collect()
}

pub fn traffic_by_city(records: &[CleanRecord]) -> Vec<CityTraffic> {
    let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for r in records {
        *counts
            .entry((r.city.as_str(), r.road_traffic_density.as_str()))
            .or_default() += 1;
    }
    counts
        .into_iter()
        .map(|((city, traffic), orders)| CityTraffic {
            city: city.to_string(),
            road_traffic_density: traffic.to_string(),
            orders,
        })
        .collect()
}

/// Order count per week of year, ordered by week label.
pub fn orders_per_week(records: &[CleanRecord]) -> Vec<WeeklyOrders> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for r in records {
        *counts.entry(r.week_of_year()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(week_of_year, orders)| WeeklyOrders {
            week_of_year,
            orders,
        })
        .collect()
}

/// Weekly orders divided by the distinct delivery persons working that week.
pub fn orders_per_courier_per_week(records: &[CleanRecord]) -> Vec<WeeklyCourierLoad> {
    let weeks = group_by(records, CleanRecord::week_of_year, |r| {
        r.delivery_person_id.as_str()
    });

    weeks
        .into_iter()
        .map(|(week_of_year, couriers)| {
            let orders = couriers.len();
            let distinct = couriers.into_iter().collect::<BTreeSet<_>>().len();
            WeeklyCourierLoad {
                week_of_year,
                orders,
                couriers: distinct,
                orders_per_courier: orders as f64 / distinct as f64,
            }
        })
        .collect()
}

/// One marker per (city, traffic) at the median delivery coordinates.
pub fn geo_markers(records: &[CleanRecord]) -> Vec<MapMarker> {
    let groups = group_by(
        records,
        |r| (r.city.clone(), r.road_traffic_density.clone()),
        |r| (r.delivery_latitude, r.delivery_longitude),
    );

    groups
        .into_iter()
        .filter_map(|((city, road_traffic_density), coords)| {
            let lats: Vec<f64> = coords.iter().map(|c| c.0).collect();
            let lons: Vec<f64> = coords.iter().map(|c| c.1).collect();
            Some(MapMarker {
                city,
                road_traffic_density,
                latitude: median(&lats)?,
                longitude: median(&lons)?,
            })
        })
        .collect()
}
