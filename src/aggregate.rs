//! Aggregations over filtered sales records
//!
//! Every function here is a pure function of a record slice and is defined
//! for the empty slice: totals are zero, tables are empty and the average
//! rating is `None`.

use crate::record::{Product, Region, SalesRecord};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Summed sales for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub sales: u64,
}

/// Summed sales for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionSales {
    pub region: Region,
    pub sales: u64,
}

/// Summed sales for one product and its share of the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductShare {
    pub product: Product,
    pub sales: u64,
    /// Fraction of total sales in [0, 1]
    pub share: f64,
}

/// One unaggregated point of the rating/sales relationship.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSalesPoint {
    pub rating: f64,
    pub sales: u32,
    pub product: Product,
    /// Marker size, equal to the sales amount
    pub size: u32,
}

pub fn total_sales(records: &[SalesRecord]) -> u64 {
    records.iter().map(|r| u64::from(r.sales)).sum()
}

/// Mean customer rating, or `None` when there are no records.
pub fn average_rating(records: &[SalesRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }

    let sum: f64 = records.iter().map(|r| r.customer_rating).sum();
    Some(sum / records.len() as f64)
}

pub fn transaction_count(records: &[SalesRecord]) -> usize {
    records.len()
}

/// Sales summed per distinct date, ascending by date.
pub fn daily_trend(records: &[SalesRecord]) -> Vec<DailySales> {
    sum_by(records, |r| r.date)
        .into_iter()
        .map(|(date, sales)| DailySales { date, sales })
        .collect()
}

/// Sales summed per distinct region, in region order.
pub fn region_totals(records: &[SalesRecord]) -> Vec<RegionSales> {
    sum_by(records, |r| r.region)
        .into_iter()
        .map(|(region, sales)| RegionSales { region, sales })
        .collect()
}

/// Sales summed per distinct product together with each product's share.
pub fn product_share(records: &[SalesRecord]) -> Vec<ProductShare> {
    let total = total_sales(records);
    sum_by(records, |r| r.product)
        .into_iter()
        .map(|(product, sales)| ProductShare {
            product,
            sales,
            share: if total == 0 {
                0.0
            } else {
                sales as f64 / total as f64
            },
        })
        .collect()
}

pub fn rating_vs_sales(records: &[SalesRecord]) -> Vec<RatingSalesPoint> {
    records
        .iter()
        .map(|r| RatingSalesPoint {
            rating: r.customer_rating,
            sales: r.sales,
            product: r.product,
            size: r.sales,
        })
        .collect()
}

fn sum_by<K, F>(records: &[SalesRecord], key: F) -> BTreeMap<K, u64>
where
    K: Ord,
    F: Fn(&SalesRecord) -> K,
{
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(key(record)).or_insert(0u64) += u64::from(record.sales);
    }
    totals
}
