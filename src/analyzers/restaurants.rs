//! Restaurant aggregates: delivery distance and delivery time breakdowns.

use std::collections::BTreeSet;

use crate::analyzers::types::{
    CityDistance, CityOrderTypeTime, CityTime, CityTrafficTime, Festival, FestivalTimes,
    TimeStatistic, TrafficTimeBreakdown,
};
use crate::analyzers::utility::{group_by, mean, round2, stddev};
use crate::records::CleanRecord;

pub fn distinct_couriers(records: &[CleanRecord]) -> usize {
    records
        .iter()
        .map(|r| r.delivery_person_id.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Average restaurant-to-customer distance in km, rounded to two decimals.
pub fn mean_distance(records: &[CleanRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let distances: Vec<f64> = records.iter().map(CleanRecord::distance_km).collect();
    Some(round2(mean(&distances)))
}

/// Mean or standard deviation of the delivery time for orders with the given
/// festival flag, rounded to two decimals. `None` when no order matches (or,
/// for the deviation, fewer than two do).
pub fn festival_time(
    records: &[CleanRecord],
    festival: Festival,
    statistic: TimeStatistic,
) -> Option<f64> {
    let times: Vec<f64> = records
        .iter()
        .filter(|r| r.festival == festival.label())
        .map(|r| r.time_taken_min as f64)
        .collect();

    if times.is_empty() {
        return None;
    }

    let avg = mean(&times);
    match statistic {
        TimeStatistic::Avg => Some(round2(avg)),
        TimeStatistic::Std => stddev(&times, avg).map(round2),
    }
}

pub fn festival_times(records: &[CleanRecord]) -> FestivalTimes {
    FestivalTimes {
        festival_avg: festival_time(records, Festival::Yes, TimeStatistic::Avg),
        festival_std: festival_time(records, Festival::Yes, TimeStatistic::Std),
        regular_avg: festival_time(records, Festival::No, TimeStatistic::Avg),
        regular_std: festival_time(records, Festival::No, TimeStatistic::Std),
    }
}

/// Mean delivery distance per city, pie chart ready.
pub fn distance_by_city(records: &[CleanRecord]) -> Vec<CityDistance> {
    group_by(records, |r| r.city.clone(), CleanRecord::distance_km)
        .into_iter()
        .map(|(city, distances)| CityDistance {
            city,
            mean_distance_km: mean(&distances),
        })
        .collect()
}

fn time_spread(times: &[f64]) -> (f64, Option<f64>) {
    let avg = mean(times);
    (avg, stddev(times, avg))
}

pub fn time_by_city(records: &[CleanRecord]) -> Vec<CityTime> {
    group_by(records, |r| r.city.clone(), |r| r.time_taken_min as f64)
        .into_iter()
        .map(|(city, times)| {
            let (avg_time, std_time) = time_spread(&times);
            CityTime {
                city,
                avg_time,
                std_time,
            }
        })
        .collect()
}

/// Delivery time per city and traffic density, with the color scale midpoint
/// set to the average of the groups' deviations.
pub fn time_by_city_and_traffic(records: &[CleanRecord]) -> TrafficTimeBreakdown {
    let groups: Vec<CityTrafficTime> = group_by(
        records,
        |r| (r.city.clone(), r.road_traffic_density.clone()),
        |r| r.time_taken_min as f64,
    )
    .into_iter()
    .map(|((city, road_traffic_density), times)| {
        let (avg_time, std_time) = time_spread(&times);
        CityTrafficTime {
            city,
            road_traffic_density,
            avg_time,
            std_time,
        }
    })
    .collect();

    let deviations: Vec<f64> = groups.iter().filter_map(|g| g.std_time).collect();
    let color_midpoint = (!deviations.is_empty()).then(|| mean(&deviations));

    TrafficTimeBreakdown {
        groups,
        color_midpoint,
    }
}

pub fn time_by_city_and_order_type(records: &[CleanRecord]) -> Vec<CityOrderTypeTime> {
    group_by(
        records,
        |r| (r.city.clone(), r.type_of_order.clone()),
        |r| r.time_taken_min as f64,
    )
    .into_iter()
    .map(|((city, type_of_order), times)| {
        let (avg_time, std_time) = time_spread(&times);
        CityOrderTypeTime {
            city,
            type_of_order,
            avg_time,
            std_time,
        }
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::tests::clean_record;

    fn order(city: &str, traffic: &str, festival: &str, minutes: i64) -> CleanRecord {
        let mut r = clean_record("x", "C1", city, traffic);
        r.festival = festival.to_string();
        r.time_taken_min = minutes;
        r
    }

    #[test]
    fn test_distinct_couriers() {
        let records = vec![
            clean_record("1", "A", "Urban", "Jam"),
            clean_record("2", "A", "Urban", "Jam"),
            clean_record("3", "B", "Urban", "Jam"),
        ];
        assert_eq!(distinct_couriers(&records), 2);
    }

    #[test]
    fn test_mean_distance_rounded() {
        let mut r = clean_record("1", "A", "Urban", "Jam");
        r.restaurant_latitude = 0.0;
        r.restaurant_longitude = 0.0;
        r.delivery_latitude = 0.0;
        r.delivery_longitude = 1.0;

        assert_eq!(mean_distance(&[r]), Some(111.2));
        assert_eq!(mean_distance(&[]), None);
    }

    #[test]
    fn test_festival_time_avg_and_std() {
        let records = vec![
            order("Urban", "Jam", "Yes", 40),
            order("Urban", "Jam", "Yes", 45),
            order("Urban", "Jam", "No", 20),
        ];

        assert_eq!(
            festival_time(&records, Festival::Yes, TimeStatistic::Avg),
            Some(42.5)
        );
        assert_eq!(
            festival_time(&records, Festival::Yes, TimeStatistic::Std),
            Some(3.54)
        );
        assert_eq!(
            festival_time(&records, Festival::No, TimeStatistic::Avg),
            Some(20.0)
        );
        assert_eq!(festival_time(&records, Festival::No, TimeStatistic::Std), None);
    }

    #[test]
    fn test_festival_time_absent_group() {
        let records = vec![order("Urban", "Jam", "No", 20)];

        let times = festival_times(&records);

        assert_eq!(times.festival_avg, None);
        assert_eq!(times.festival_std, None);
        assert_eq!(times.regular_avg, Some(20.0));
    }

    #[test]
    fn test_distance_by_city() {
        let a = clean_record("1", "A", "Urban", "Jam");
        let b = clean_record("2", "B", "Metropolitian", "Jam");

        let distances = distance_by_city(&[a.clone(), b]);

        assert_eq!(distances.len(), 2);
        assert_eq!(distances[0].city, "Metropolitian");
        assert!((distances[1].mean_distance_km - a.distance_km()).abs() < 1e-9);
    }

    #[test]
    fn test_time_by_city() {
        let records = vec![
            order("Urban", "Jam", "No", 20),
            order("Urban", "Low", "No", 30),
            order("Semi-Urban", "Jam", "No", 50),
        ];

        let times = time_by_city(&records);

        assert_eq!(times[0].city, "Semi-Urban");
        assert_eq!(times[0].std_time, None);
        assert_eq!(times[1].avg_time, 25.0);
        assert!((times[1].std_time.unwrap() - 7.071_067_8).abs() < 1e-6);
    }

    #[test]
    fn test_time_by_city_and_traffic_midpoint() {
        let records = vec![
            order("Urban", "Jam", "No", 20),
            order("Urban", "Jam", "No", 30),
            order("Urban", "Low", "No", 10),
            order("Urban", "Low", "No", 14),
            order("Semi-Urban", "Jam", "No", 50),
        ];

        let breakdown = time_by_city_and_traffic(&records);

        assert_eq!(breakdown.groups.len(), 3);
        let expected = (7.071_067_8 + 2.828_427_1) / 2.0;
        assert!((breakdown.color_midpoint.unwrap() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_time_by_city_and_traffic_empty() {
        let breakdown = time_by_city_and_traffic(&[]);
        assert!(breakdown.groups.is_empty());
        assert_eq!(breakdown.color_midpoint, None);
    }

    #[test]
    fn test_time_by_city_and_order_type() {
        let mut drink = order("Urban", "Jam", "No", 20);
        drink.type_of_order = "Drinks".to_string();
        let snack = order("Urban", "Jam", "No", 30);

        let rows = time_by_city_and_order_type(&[drink, snack]);

        let types: Vec<_> = rows.iter().map(|r| r.type_of_order.as_str()).collect();
        assert_eq!(types, vec!["Drinks", "Snack"]);
        assert_eq!(rows[1].avg_time, 30.0);
    }
}
