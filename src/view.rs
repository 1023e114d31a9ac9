//! Dashboard view model
//!
//! [`render`] turns a dataset and the selected filter into everything the
//! page displays: formatted metrics, chart series and the raw table.

use crate::aggregate::{self, DailySales, ProductShare, RatingSalesPoint, RegionSales};
use crate::dataset::Dataset;
use crate::filter::{SalesDataProvider, SalesFilter};
use crate::record::{Product, Region, SalesRecord};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

/// Shown in place of the average rating when no records match.
pub const NO_DATA: &str = "no data";

/// Column labels of the raw data table, also used as the CSV header.
pub const RAW_COLUMNS: [&str; 5] = ["日期", "销售额", "Region", "Product", "CustomerRating"];

/// Suffix appended to the formatted average rating.
pub const RATING_SUFFIX: &str = "★";

/// Display options applied while rendering.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Currency symbol prefixed to sales amounts (default: "¥")
    pub currency_symbol: String,
}

impl Default for ViewOptions {
    fn default() -> Self {
        ViewOptions {
            currency_symbol: "¥".to_string(),
        }
    }
}

/// Static page labels.
#[derive(Debug, Clone, Serialize)]
pub struct PageLayout {
    pub page_title: &'static str,
    pub heading: &'static str,
    pub sidebar_header: &'static str,
    pub config_header: &'static str,
    pub overview_header: &'static str,
    pub region_filter_label: &'static str,
    pub date_filter_label: &'static str,
    pub tabs: [&'static str; 4],
}

impl Default for PageLayout {
    fn default() -> Self {
        PageLayout {
            page_title: "dashboard",
            heading: "数据可视化看板",
            sidebar_header: "数据筛选",
            config_header: "配置选项",
            overview_header: "数据概览",
            region_filter_label: "选择地区",
            date_filter_label: "日期范围",
            tabs: ["趋势分析", "区域对比", "产品分布", "原始数据"],
        }
    }
}

/// A labelled metric with its raw and display value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric<T> {
    pub label: &'static str,
    pub value: T,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub total_sales: Metric<u64>,
    pub average_rating: Metric<Option<f64>>,
    pub transaction_count: Metric<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendView {
    pub title: &'static str,
    pub points: Vec<DailySales>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionView {
    pub title: &'static str,
    pub rows: Vec<RegionSales>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub share_title: &'static str,
    pub shares: Vec<ProductShare>,
    pub scatter_title: &'static str,
    pub scatter: Vec<RatingSalesPoint>,
}

/// One display row of the raw data table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawRow {
    /// Date as `YYYY-MM-DD`
    pub date: String,
    /// Sales as a currency-prefixed integer
    pub sales: String,
    pub region: Region,
    pub product: Product,
    pub customer_rating: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RawView {
    pub columns: [&'static str; 5],
    pub rows: Vec<RawRow>,
}

/// Everything the dashboard page needs for one render.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub dataset_id: Uuid,
    /// Seed that reproduces the dataset, when it was generated
    pub dataset_seed: Option<u64>,
    pub filter: SalesFilter,
    pub layout: PageLayout,
    pub metrics: Metrics,
    pub trend: TrendView,
    pub regions: RegionView,
    pub products: ProductView,
    pub raw: RawView,
}

/// Renders the dashboard for `filter` over `dataset`.
///
/// Never fails: a filter matching nothing yields zero metrics and empty
/// tables.
pub fn render(dataset: &Dataset, filter: &SalesFilter, options: &ViewOptions) -> DashboardView {
    let records = dataset.query(filter);
    debug!(
        dataset_id = %dataset.id(),
        regions = filter.regions.len(),
        start = %filter.date_range.start,
        end = %filter.date_range.end,
        matched = records.len(),
        "Rendering dashboard"
    );

    DashboardView {
        dataset_id: dataset.id(),
        dataset_seed: dataset.seed(),
        filter: filter.clone(),
        layout: PageLayout::default(),
        metrics: metrics(&records, options),
        trend: TrendView {
            title: "每日销售趋势",
            points: aggregate::daily_trend(&records),
        },
        regions: RegionView {
            title: "区域销售对比",
            rows: aggregate::region_totals(&records),
        },
        products: ProductView {
            share_title: "产品销售额占比",
            shares: aggregate::product_share(&records),
            scatter_title: "评分与销售额关系",
            scatter: aggregate::rating_vs_sales(&records),
        },
        raw: RawView {
            columns: RAW_COLUMNS,
            rows: raw_rows(&records, options),
        },
    }
}

fn metrics(records: &[SalesRecord], options: &ViewOptions) -> Metrics {
    let total = aggregate::total_sales(records);
    let average = aggregate::average_rating(records);
    let count = aggregate::transaction_count(records);

    Metrics {
        total_sales: Metric {
            label: "总销售额",
            value: total,
            display: format_currency(&options.currency_symbol, total),
        },
        average_rating: Metric {
            label: "平均评分",
            value: average,
            display: format_rating(average),
        },
        transaction_count: Metric {
            label: "交易次数",
            value: count,
            display: count.to_string(),
        },
    }
}

/// Filtered records sorted by date, newest first, formatted for display.
pub fn raw_rows(records: &[SalesRecord], options: &ViewOptions) -> Vec<RawRow> {
    let mut sorted: Vec<&SalesRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    sorted
        .into_iter()
        .map(|r| RawRow {
            date: r.date.format("%Y-%m-%d").to_string(),
            sales: format!("{}{}", options.currency_symbol, r.sales),
            region: r.region,
            product: r.product,
            customer_rating: r.customer_rating,
        })
        .collect()
}

/// Formats an amount with thousands separators, e.g. `¥1,234,567`.
pub fn format_currency(symbol: &str, amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}", symbol, grouped)
}

/// Formats a rating to one decimal with a star, or [`NO_DATA`].
pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(value) if value.is_finite() => format!("{:.1} {}", value, RATING_SUFFIX),
        _ => NO_DATA.to_string(),
    }
}
