use crate::dataset::Dataset;
use crate::record::{Region, SalesRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use tracing::trace;

/// Date range used to filter sales records.
///
/// Both ends are inclusive. A range whose start is after its end is
/// legal and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Start date (inclusive)
    pub start: NaiveDate,
    /// End date (inclusive)
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new DateRange.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// Creates a single-day range.
    pub fn single_day(date: NaiveDate) -> Self {
        DateRange {
            start: date,
            end: date,
        }
    }

    /// Creates a DateRange from a standard inclusive range.
    pub fn from_range(range: RangeInclusive<NaiveDate>) -> Self {
        DateRange {
            start: *range.start(),
            end: *range.end(),
        }
    }

    /// Builds a range from the one or two dates a date-input widget returns.
    ///
    /// A single date is treated as the degenerate range `[d, d]`.
    ///
    /// # Errors
    /// Returns [`FilterError::MalformedInterval`] for zero or more than two dates.
    pub fn from_endpoints(dates: &[NaiveDate]) -> Result<Self, FilterError> {
        match dates {
            [date] => Ok(DateRange::single_day(*date)),
            [start, end] => Ok(DateRange::new(*start, *end)),
            _ => Err(FilterError::MalformedInterval(dates.len())),
        }
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The two user-selected dashboard parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesFilter {
    /// Regions to keep. An empty set keeps nothing.
    pub regions: BTreeSet<Region>,
    pub date_range: DateRange,
}

impl SalesFilter {
    pub fn new(regions: impl IntoIterator<Item = Region>, date_range: DateRange) -> Self {
        SalesFilter {
            regions: regions.into_iter().collect(),
            date_range,
        }
    }

    /// The unconstrained filter for a dataset: every region present and the
    /// full date span. Returns `None` for an empty dataset.
    pub fn defaults_for(dataset: &Dataset) -> Option<Self> {
        let (start, end) = dataset.date_bounds()?;
        Some(SalesFilter::new(
            dataset.regions(),
            DateRange::new(start, end),
        ))
    }

    /// Returns true if the record passes both the region and date predicates.
    pub fn matches(&self, record: &SalesRecord) -> bool {
        is_included(&self.regions, &self.date_range, record)
    }
}

/// Source of sales records that can be queried with a [`SalesFilter`].
///
/// Implementations must return derived copies; the underlying data is never
/// modified by a query.
pub trait SalesDataProvider {
    /// Returns the records matching `filter`, in source order.
    fn query(&self, filter: &SalesFilter) -> Vec<SalesRecord>;
}

impl SalesDataProvider for Dataset {
    fn query(&self, filter: &SalesFilter) -> Vec<SalesRecord> {
        self.records().query(filter)
    }
}

impl SalesDataProvider for [SalesRecord] {
    fn query(&self, filter: &SalesFilter) -> Vec<SalesRecord> {
        filter_records(self, &filter.regions, &filter.date_range)
    }
}

/// Keeps records whose region is selected and whose date lies in `range`.
pub fn filter_records(
    records: &[SalesRecord],
    regions: &BTreeSet<Region>,
    range: &DateRange,
) -> Vec<SalesRecord> {
    if regions.is_empty() || range.is_inverted() {
        trace!(
            regions = regions.len(),
            inverted = range.is_inverted(),
            "Filter matches nothing"
        );
        return Vec::new();
    }

    records
        .iter()
        .filter(|record| is_included(regions, range, record))
        .cloned()
        .collect()
}

fn is_included(regions: &BTreeSet<Region>, range: &DateRange, record: &SalesRecord) -> bool {
    regions.contains(&record.region) && range.contains(record.date)
}

/// Errors that can occur when building a filter from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The date input carried a number of endpoints other than one or two
    MalformedInterval(usize),
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::MalformedInterval(count) => write!(
                f,
                "Date interval needs one or two dates, got {}",
                count
            ),
        }
    }
}

impl std::error::Error for FilterError {}
