use chrono::NaiveDate;
use delivery_dashboard::analyzers::aggregate::{ViewKind, courier_view, restaurant_view};
use delivery_dashboard::analyzers::analyzer::Dashboard;
use delivery_dashboard::analyzers::company::{orders_per_day, orders_per_week, traffic_share};
use delivery_dashboard::analyzers::types::View;
use delivery_dashboard::clean::{CleanMode, SENTINEL, clean_records};
use delivery_dashboard::errors::RowError;
use delivery_dashboard::filter::{FilterParams, apply_filter, default_cutoff};
use delivery_dashboard::parser::parse_dataset;

const FIXTURE: &str = include_str!("fixtures/sample_train.csv");

fn dashboard() -> Dashboard {
    let raw = parse_dataset(FIXTURE.as_bytes()).expect("Failed to parse dataset");
    Dashboard::from_raw(&raw, CleanMode::Strict).expect("Failed to clean dataset")
}

#[test]
fn test_full_pipeline_cleaning() {
    let dashboard = dashboard();
    let report = dashboard.report();

    assert_eq!(report.input_rows, 14);
    assert_eq!(report.kept_rows, 9);
    assert_eq!(report.dropped_rows(), 5);
    assert!(report.errors.is_empty());

    for r in dashboard.records() {
        for text in [&r.id, &r.delivery_person_id, &r.city, &r.road_traffic_density, &r.festival] {
            assert_ne!(text, SENTINEL);
            assert_eq!(text.trim(), text);
        }
    }
}

#[test]
fn test_default_selection_excludes_orders_after_cutoff() {
    let dashboard = dashboard();
    let params = dashboard.sidebar(default_cutoff()).default_params();

    assert_eq!(
        params.traffic.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["High", "Jam", "Low", "Medium"]
    );

    let filtered = apply_filter(dashboard.records(), &params);
    assert_eq!(filtered.len(), 8);

    let days = orders_per_day(&filtered);
    assert_eq!(days.iter().map(|d| d.orders).sum::<usize>(), filtered.len());

    let share: f64 = traffic_share(&filtered).iter().map(|s| s.share).sum();
    assert!((share - 1.0).abs() < 1e-9);

    let weeks: Vec<_> = orders_per_week(&filtered)
        .into_iter()
        .map(|w| w.week_of_year)
        .collect();
    assert_eq!(weeks, vec!["09", "10", "11", "12", "14"]);
}

#[test]
fn test_filter_by_cutoff_and_traffic() {
    let dashboard = dashboard();
    let cutoff = NaiveDate::from_ymd_opt(2022, 4, 13).unwrap();
    let params = FilterParams::new(cutoff, ["Jam", "Low"]);

    let filtered = apply_filter(dashboard.records(), &params);

    assert_eq!(filtered.len(), 5);
    assert!(filtered.iter().all(|r| r.order_date < cutoff));
    assert!(
        filtered
            .iter()
            .all(|r| r.road_traffic_density == "Jam" || r.road_traffic_density == "Low")
    );
    assert_eq!(apply_filter(&filtered, &params), filtered);
}

#[test]
fn test_courier_and_restaurant_metrics() {
    let dashboard = dashboard();
    let filtered = apply_filter(
        dashboard.records(),
        &dashboard.sidebar(default_cutoff()).default_params(),
    );

    let couriers = courier_view(&filtered, 10);
    assert_eq!(couriers.age.max, 38);
    assert_eq!(couriers.age.min, 22);

    assert_eq!(couriers.fastest[0].city, "Metropolitian");
    assert_eq!(couriers.fastest[0].delivery_person_id, "COIMBRES13DEL02");
    let urban_best = couriers
        .fastest
        .iter()
        .find(|c| c.city == "Urban" && c.rank == 1)
        .unwrap();
    assert_eq!(urban_best.delivery_person_id, "INDORES13DEL02");
    assert_eq!(urban_best.mean_time_taken, 23.0);

    assert_eq!(couriers.slowest[0].city, "Urban");
    assert_eq!(couriers.slowest[0].delivery_person_id, "HYDRES09DEL03");

    let restaurants = restaurant_view(&filtered);
    assert_eq!(restaurants.festival.festival_avg, Some(44.5));
    assert_eq!(restaurants.festival.festival_std, Some(6.36));
    assert_eq!(restaurants.festival.regular_avg, Some(26.0));
    assert_eq!(restaurants.distinct_couriers, 7);
    assert!(restaurants.mean_distance_km.unwrap() > 0.0);
}

#[test]
fn test_render_every_view() {
    let dashboard = dashboard();
    let params = dashboard.sidebar(default_cutoff()).default_params();

    for kind in ViewKind::ALL {
        let rendered = dashboard.render(kind, &params, 10);
        assert_eq!(rendered.filtered_rows, 8);
        match (kind, &rendered.view) {
            (ViewKind::Company, View::Company(view)) => {
                assert_eq!(view.map_markers.len(), view.traffic_by_city.len());
            }
            (ViewKind::Couriers, View::Couriers(view)) => {
                assert_eq!(view.rating_by_courier.len(), 7);
            }
            (ViewKind::Restaurants, View::Restaurants(view)) => {
                assert_eq!(view.time_by_city.len(), 3);
            }
            _ => panic!("view does not match {:?}", kind),
        }
    }
}

#[test]
fn test_malformed_row_strict_and_lenient() {
    let broken = FIXTURE.replace("(min) 24", "24 min");
    let raw = parse_dataset(broken.as_bytes()).unwrap();

    let err = clean_records(&raw, CleanMode::Strict).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RowError>(),
        Some(RowError::MissingUnit { row: 0, .. })
    ));

    let cleaned = clean_records(&raw, CleanMode::Lenient).unwrap();
    assert_eq!(cleaned.records.len(), 8);
    assert_eq!(cleaned.report.errors.len(), 1);
}

#[test]
fn test_empty_selection_degrades_to_zero() {
    let dashboard = dashboard();
    let params = FilterParams::new(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(), ["Jam"]);

    let rendered = dashboard.render(ViewKind::Couriers, &params, 10);

    assert_eq!(rendered.filtered_rows, 0);
    match rendered.view {
        View::Couriers(view) => {
            assert_eq!((view.age.max, view.age.min), (0, 0));
            assert!(view.fastest.is_empty());
        }
        other => panic!("unexpected view {:?}", other),
    }
}
