//! Synthetic sales dataset generation
//!
//! Produces one [`SalesRecord`] per calendar day of 2023 with independently
//! drawn sales, region, product and rating values.

use crate::record::{Product, Region, SalesRecord};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use tracing::debug;
use uuid::Uuid;

/// Calendar year covered by generated datasets.
pub const DATASET_YEAR: i32 = 2023;

/// Half-open range sales amounts are drawn from.
pub const SALES_RANGE: Range<u32> = 1000..5000;

/// Half-open range customer ratings are drawn from.
pub const RATING_RANGE: Range<f64> = 3.0..5.0;

/// An immutable, generated table of daily sales records.
///
/// Records are sorted ascending by date with exactly one record per date.
#[derive(Debug, Clone)]
pub struct Dataset {
    id: Uuid,
    seed: Option<u64>,
    records: Vec<SalesRecord>,
}

impl Dataset {
    /// Wraps already ordered records into a dataset with a fresh id.
    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        Dataset {
            id: Uuid::new_v4(),
            seed: None,
            records,
        }
    }

    /// Identifier of this generation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Seed the records were drawn from; `None` for hand-built datasets.
    ///
    /// `DatasetGenerator::with_seed(seed).generate()` reproduces the records.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the first and last date in the dataset, or `None` when empty.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.iter().map(|r| r.date).min()?;
        let last = self.records.iter().map(|r| r.date).max()?;
        Some((first, last))
    }

    /// Distinct regions present in the dataset, sorted.
    ///
    /// These are the options (and the default selection) of the region filter.
    pub fn regions(&self) -> Vec<Region> {
        let mut regions: Vec<Region> = self.records.iter().map(|r| r.region).collect();
        regions.sort();
        regions.dedup();
        regions
    }
}

/// Generator for synthetic yearly sales data.
///
/// Without a seed every call to [`DatasetGenerator::generate`] draws a fresh
/// seed from the thread rng. With a seed, every call yields the same records.
#[derive(Debug, Clone, Default)]
pub struct DatasetGenerator {
    seed: Option<u64>,
}

impl DatasetGenerator {
    /// Creates a generator that draws a new seed for every dataset.
    pub fn new() -> Self {
        DatasetGenerator { seed: None }
    }

    /// Creates a generator with a fixed seed for reproducible datasets.
    pub fn with_seed(seed: u64) -> Self {
        DatasetGenerator { seed: Some(seed) }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Generates one record per day of [`DATASET_YEAR`].
    pub fn generate(&self) -> Dataset {
        let seed = self.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let records: Vec<SalesRecord> = year_dates(DATASET_YEAR)
            .map(|date| {
                let sales = rng.gen_range(SALES_RANGE);
                let region = *Region::ALL.choose(&mut rng).unwrap_or(&Region::North);
                let product = *Product::ALL.choose(&mut rng).unwrap_or(&Product::A);
                let customer_rating = rng.gen_range(RATING_RANGE);
                SalesRecord::new(date, sales, region, product, customer_rating)
            })
            .collect();

        let dataset = Dataset {
            id: Uuid::new_v4(),
            seed: Some(seed),
            records,
        };
        debug!(
            dataset_id = %dataset.id(),
            rows = dataset.len(),
            seed,
            fixed_seed = self.seed.is_some(),
            "Generated sales dataset"
        );
        dataset
    }
}

/// Generates a dataset from fresh entropy.
pub fn generate() -> Dataset {
    DatasetGenerator::new().generate()
}

/// Every date of `year`, ascending.
fn year_dates(year: i32) -> impl Iterator<Item = NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1);
    let last = NaiveDate::from_ymd_opt(year, 12, 31);
    first
        .into_iter()
        .flat_map(|d| d.iter_days())
        .take_while(move |d| Some(*d) <= last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_generate_covers_every_day_of_year() {
        let dataset = generate();
        assert_eq!(dataset.len(), 365);

        let records = dataset.records();
        assert_eq!(
            records.first().unwrap().date,
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
        assert_eq!(
            records.last().unwrap().date,
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );

        for pair in records.windows(2) {
            assert_eq!(pair[0].date.succ_opt().unwrap(), pair[1].date);
        }
    }

    #[test]
    fn test_generated_values_within_ranges() {
        let dataset = DatasetGenerator::with_seed(7).generate();
        for record in dataset.records() {
            assert!((1000..5000).contains(&record.sales));
            assert!(record.customer_rating >= 3.0 && record.customer_rating < 5.0);
            assert_eq!(record.date.year(), 2023);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let generator = DatasetGenerator::with_seed(42);
        let first = generator.generate();
        let second = generator.generate();
        assert_eq!(first.records(), second.records());
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_unseeded_dataset_records_replayable_seed() {
        let dataset = generate();
        let seed = dataset.seed().unwrap();
        let replayed = DatasetGenerator::with_seed(seed).generate();
        assert_eq!(dataset.records(), replayed.records());
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = DatasetGenerator::with_seed(1).generate();
        let b = DatasetGenerator::with_seed(2).generate();
        assert_ne!(a.records(), b.records());
    }

    #[test]
    fn test_date_bounds_and_regions() {
        let dataset = DatasetGenerator::with_seed(3).generate();
        let (first, last) = dataset.date_bounds().unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());

        // 365 independent draws over four regions
        assert_eq!(dataset.regions(), Region::ALL.to_vec());
    }

    #[test]
    fn test_empty_dataset_bounds() {
        let dataset = Dataset::from_records(Vec::new());
        assert!(dataset.is_empty());
        assert_eq!(dataset.seed(), None);
        assert_eq!(dataset.date_bounds(), None);
        assert!(dataset.regions().is_empty());
    }
}
