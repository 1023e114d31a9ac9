//! HTTP request handlers for API endpoints

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::trace;
use uuid::Uuid;

use super::error::ApiError;
use super::state::AppState;
use super::DataRefresh;
use crate::dataset::Dataset;
use crate::filter::{DateRange, SalesDataProvider, SalesFilter};
use crate::record::Region;
use crate::view::{self, DashboardView, PageLayout};

/// Health check endpoint
///
/// Returns a simple status response to verify the server is running
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}

/// Query parameters shared by the dashboard and export endpoints
///
/// `regions` is a comma separated list; omitted means every region and an
/// empty value means none. `dates` carries the one or two dates of the
/// date-input widget and cannot be combined with `start`/`end`. `seed` is
/// the `dataset_seed` of a previously rendered view; in per-request refresh
/// mode it replays that dataset instead of drawing a new one.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQueryParams {
    pub regions: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub dates: Option<String>,
    pub seed: Option<u64>,
}

fn parse_date(value: &str, which: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| ApiError::InvalidDateRange(format!("Invalid {} date: {}", which, e)))
}

fn parse_regions(value: &str) -> Result<Vec<Region>, ApiError> {
    value
        .split(',')
        .filter(|name| !name.trim().is_empty())
        .map(|name| name.parse::<Region>().map_err(ApiError::from))
        .collect()
}

/// Builds the filter for a request, falling back to the dataset defaults.
pub(crate) fn build_filter(
    dataset: &Dataset,
    params: &FilterQueryParams,
) -> Result<SalesFilter, ApiError> {
    let regions = match &params.regions {
        Some(list) => parse_regions(list)?,
        None => dataset.regions(),
    };

    let date_range = match &params.dates {
        Some(dates) => {
            if params.start.is_some() || params.end.is_some() {
                return Err(ApiError::InvalidParameter(
                    "Use either 'dates' or 'start'/'end', not both".to_string(),
                ));
            }
            let endpoints = dates
                .split(',')
                .filter(|d| !d.trim().is_empty())
                .map(|d| parse_date(d, "interval"))
                .collect::<Result<Vec<_>, _>>()?;
            DateRange::from_endpoints(&endpoints)?
        }
        None => {
            let bounds = dataset.date_bounds();
            let start = match (&params.start, bounds) {
                (Some(start), _) => parse_date(start, "start")?,
                (None, Some((first, _))) => first,
                (None, None) => {
                    return Err(ApiError::InvalidDateRange(
                        "Dataset is empty; start date is required".to_string(),
                    ))
                }
            };
            let end = match (&params.end, bounds) {
                (Some(end), _) => parse_date(end, "end")?,
                (None, Some((_, last))) => last,
                (None, None) => {
                    return Err(ApiError::InvalidDateRange(
                        "Dataset is empty; end date is required".to_string(),
                    ))
                }
            };
            DateRange::new(start, end)
        }
    };

    Ok(SalesFilter::new(regions, date_range))
}

/// GET /dashboard - Render the full dashboard view for the given filter
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterQueryParams>,
) -> Result<Json<DashboardView>, ApiError> {
    let dataset = state.dataset_for_request(params.seed).await;
    let filter = build_filter(&dataset, &params)?;
    let view = view::render(&dataset, &filter, &state.view_options);
    Ok(Json(view))
}

/// Widget options and defaults for the sidebar
#[derive(Debug, Serialize)]
pub struct FiltersResponse {
    pub dataset_id: Uuid,
    pub rows: usize,
    pub regions: Vec<Region>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub refresh: DataRefresh,
    pub layout: PageLayout,
}

/// GET /filters - List filter options and their defaults
pub async fn get_filters(State(state): State<Arc<AppState>>) -> Json<FiltersResponse> {
    let dataset = state.current().await;
    let bounds = dataset.date_bounds();

    Json(FiltersResponse {
        dataset_id: dataset.id(),
        rows: dataset.len(),
        regions: dataset.regions(),
        start_date: bounds.map(|(first, _)| first),
        end_date: bounds.map(|(_, last)| last),
        refresh: state.refresh(),
        layout: PageLayout::default(),
    })
}

/// GET /records.csv - Export the filtered raw table as CSV, newest first
pub async fn export_csv(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterQueryParams>,
) -> Result<Response, ApiError> {
    let dataset = state.dataset_for_request(params.seed).await;
    let filter = build_filter(&dataset, &params)?;
    let records = dataset.query(&filter);
    let rows = view::raw_rows(&records, &state.view_options);

    // Header row carries the raw table's column labels, not the field names
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(view::RAW_COLUMNS)?;
    for row in &rows {
        writer.serialize(row)?;
    }
    let body = writer
        .into_inner()
        .map_err(|e| ApiError::InternalError(format!("CSV flush failed: {}", e)))?;

    trace!(rows = rows.len(), bytes = body.len(), "Exported CSV");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"records.csv\""),
        ],
        body,
    )
        .into_response())
}

/// Response for dataset regeneration
#[derive(Debug, Serialize)]
pub struct RegenerateResponse {
    pub dataset_id: Uuid,
    pub rows: usize,
}

/// POST /dataset/regenerate - Replace the cached dataset with fresh data
pub async fn regenerate_dataset(State(state): State<Arc<AppState>>) -> Json<RegenerateResponse> {
    let dataset = state.regenerate().await;
    Json(RegenerateResponse {
        dataset_id: dataset.id(),
        rows: dataset.len(),
    })
}
