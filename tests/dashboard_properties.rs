use sales_dashboard::{
    average_rating, generate, product_share, region_totals, render, total_sales,
    transaction_count, DatasetGenerator, DateRange, Region, SalesDataProvider, SalesFilter,
    ViewOptions,
};
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, month, day).unwrap()
}

fn full_year() -> DateRange {
    DateRange::new(date(1, 1), date(12, 31))
}

#[test]
fn generated_dataset_has_every_day_of_2023_once() {
    let dataset = generate();
    assert_eq!(dataset.len(), 365);

    let dates: HashSet<NaiveDate> = dataset.records().iter().map(|r| r.date).collect();
    assert_eq!(dates.len(), 365, "No duplicate dates");
    assert!(dates.iter().all(|d| d.year() == 2023));
    assert!(dataset
        .records()
        .windows(2)
        .all(|pair| pair[0].date < pair[1].date));
}

#[test]
fn generated_values_stay_in_range() {
    for seed in 0..5 {
        let dataset = DatasetGenerator::with_seed(seed).generate();
        for record in dataset.records() {
            assert!(record.sales >= 1000 && record.sales < 5000);
            assert!(record.customer_rating >= 3.0 && record.customer_rating < 5.0);
        }
    }
}

#[test]
fn unconstrained_filter_is_identity() {
    let dataset = DatasetGenerator::with_seed(21).generate();
    let filter = SalesFilter::new(Region::ALL, full_year());
    assert_eq!(dataset.query(&filter), dataset.records().to_vec());
}

#[test]
fn empty_region_set_matches_nothing() {
    let dataset = DatasetGenerator::with_seed(21).generate();
    let filter = SalesFilter::new([], full_year());
    assert!(dataset.query(&filter).is_empty());
}

#[test]
fn inverted_interval_matches_nothing() {
    let dataset = DatasetGenerator::with_seed(21).generate();
    let filter = SalesFilter::new(Region::ALL, DateRange::new(date(8, 1), date(2, 1)));
    assert!(dataset.query(&filter).is_empty());
}

#[test]
fn grouped_totals_agree_with_total_sales() {
    let dataset = DatasetGenerator::with_seed(8).generate();
    let filters = [
        SalesFilter::new(Region::ALL, full_year()),
        SalesFilter::new([Region::East, Region::West], DateRange::new(date(3, 1), date(9, 30))),
        SalesFilter::new([Region::South], DateRange::single_day(date(7, 4))),
        SalesFilter::new([], full_year()),
    ];

    for filter in &filters {
        let records = dataset.query(filter);
        let total = total_sales(&records);

        let by_region: u64 = region_totals(&records).iter().map(|r| r.sales).sum();
        let by_product: u64 = product_share(&records).iter().map(|p| p.sales).sum();
        assert_eq!(by_region, total);
        assert_eq!(by_product, total);
    }
}

#[test]
fn north_in_june_counts_matching_days() {
    let dataset = DatasetGenerator::with_seed(99).generate();
    let filter = SalesFilter::new([Region::North], DateRange::new(date(6, 1), date(6, 30)));
    let filtered = dataset.query(&filter);

    let expected = dataset
        .records()
        .iter()
        .filter(|r| r.date.month() == 6 && r.region == Region::North)
        .count();

    assert_eq!(transaction_count(&filtered), expected);
    assert!(filtered.iter().all(|r| r.region == Region::North && r.date.month() == 6));
}

#[test]
fn average_rating_of_nothing_is_no_data() {
    let dataset = DatasetGenerator::with_seed(4).generate();
    let filter = SalesFilter::new([], full_year());
    let filtered = dataset.query(&filter);
    assert_eq!(average_rating(&filtered), None);

    let view = render(&dataset, &filter, &ViewOptions::default());
    assert_eq!(view.metrics.average_rating.display, "no data");
    assert_eq!(view.metrics.total_sales.display, "¥0");
}

#[test]
fn rendered_view_is_consistent_with_aggregates() {
    let dataset = DatasetGenerator::with_seed(17).generate();
    let filter = SalesFilter::new([Region::North, Region::South], DateRange::new(date(1, 1), date(3, 31)));
    let view = render(&dataset, &filter, &ViewOptions::default());
    let records = dataset.query(&filter);

    assert_eq!(view.metrics.total_sales.value, total_sales(&records));
    assert_eq!(view.metrics.transaction_count.value, records.len());
    assert_eq!(view.trend.points.len(), records.len());
    assert_eq!(view.raw.rows.len(), records.len());
    assert!(view
        .regions
        .rows
        .iter()
        .all(|r| r.region == Region::North || r.region == Region::South));

    // raw table is newest first
    let raw_dates: Vec<&String> = view.raw.rows.iter().map(|r| &r.date).collect();
    let mut sorted = raw_dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(raw_dates, sorted);
}
