//! Delivery person aggregates: fleet extremes, ratings and speed rankings.

use std::collections::BTreeMap;

use crate::analyzers::types::{CourierRating, CourierSpeed, Extremes, RatingSpread, Speed};
use crate::analyzers::utility::{group_by, mean, stddev};
use crate::records::CleanRecord;

fn extremes(values: impl Iterator<Item = i64> + Clone) -> Extremes {
    Extremes {
        max: values.clone().max().unwrap_or(0),
        min: values.min().unwrap_or(0),
    }
}

/// Oldest and youngest delivery person age; `(0, 0)` when empty.
pub fn age_extremes(records: &[CleanRecord]) -> Extremes {
    extremes(records.iter().map(|r| r.delivery_person_age))
}

/// Best and worst vehicle condition; `(0, 0)` when empty.
pub fn vehicle_condition_extremes(records: &[CleanRecord]) -> Extremes {
    extremes(records.iter().map(|r| r.vehicle_condition))
}

pub fn rating_by_courier(records: &[CleanRecord]) -> Vec<CourierRating> {
    group_by(
        records,
        |r| r.delivery_person_id.clone(),
        |r| r.delivery_person_rating,
    )
    .into_iter()
    .map(|(delivery_person_id, ratings)| CourierRating {
        delivery_person_id,
        mean_rating: mean(&ratings),
    })
    .collect()
}

fn rating_spread_by<'a>(
    records: &'a [CleanRecord],
    key: impl Fn(&'a CleanRecord) -> &'a str,
) -> Vec<RatingSpread> {
    group_by(records, key, |r| r.delivery_person_rating)
        .into_iter()
        .map(|(group, ratings)| {
            let delivery_mean = mean(&ratings);
            RatingSpread {
                group: group.to_string(),
                delivery_mean,
                delivery_std: stddev(&ratings, delivery_mean),
            }
        })
        .collect()
}

pub fn rating_by_traffic(records: &[CleanRecord]) -> Vec<RatingSpread> {
    rating_spread_by(records, |r| r.road_traffic_density.as_str())
}

pub fn rating_by_weather(records: &[CleanRecord]) -> Vec<RatingSpread> {
    rating_spread_by(records, |r| r.weather.as_str())
}

/// Ranks delivery persons by mean delivery time within each city and keeps
/// the first `limit` per city.
///
/// Every city present is ranked, however many there are. Cities come out
/// ascending for [`Speed::Fastest`] and descending for [`Speed::Slowest`];
/// equal times are broken by delivery person id.
pub fn top_couriers(records: &[CleanRecord], speed: Speed, limit: usize) -> Vec<CourierSpeed> {
    let per_courier = group_by(
        records,
        |r| (r.city.as_str(), r.delivery_person_id.as_str()),
        |r| r.time_taken_min as f64,
    );

    let mut by_city: BTreeMap<&str, Vec<(&str, f64)>> = BTreeMap::new();
    for ((city, courier), times) in per_courier {
        by_city.entry(city).or_default().push((courier, mean(&times)));
    }

    let mut cities: Vec<_> = by_city.into_iter().collect();
    if speed == Speed::Slowest {
        cities.reverse();
    }

    let mut ranked = Vec::new();
    for (city, mut couriers) in cities {
        couriers.sort_by(|a, b| {
            let by_time = match speed {
                Speed::Fastest => a.1.total_cmp(&b.1),
                Speed::Slowest => b.1.total_cmp(&a.1),
            };
            by_time.then_with(|| a.0.cmp(b.0))
        });

        ranked.extend(
            couriers
                .into_iter()
                .take(limit)
                .enumerate()
                .map(|(i, (courier, mean_time_taken))| CourierSpeed {
                    city: city.to_string(),
                    delivery_person_id: courier.to_string(),
                    mean_time_taken,
                    rank: i + 1,
                }),
        );
    }

    ranked
}
