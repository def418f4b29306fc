use geo::{Distance, Haversine, Point};
use std::collections::BTreeMap;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the sample (n - 1) standard deviation given a pre-computed mean.
/// Returns `None` when fewer than two values are available.
pub fn stddev(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;

    Some(variance.sqrt())
}

/// Middle value of the slice, averaging the two central values for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Great-circle distance in kilometers between two `(latitude, longitude)` pairs in degrees.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let a = Point::new(from.1, from.0);
    let b = Point::new(to.1, to.0);
    Haversine::distance(a, b) / 1000.0
}

/// Buckets `items` by key, keeping keys sorted.
pub fn group_by<'a, T, K, V>(
    items: &'a [T],
    key: impl Fn(&'a T) -> K,
    value: impl Fn(&'a T) -> V,
) -> BTreeMap<K, Vec<V>>
where
    K: Ord,
{
    let mut groups: BTreeMap<K, Vec<V>> = BTreeMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(value(item));
    }
    groups
}
