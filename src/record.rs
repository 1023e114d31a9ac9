use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sales region a record is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    North,
    South,
    East,
    West,
}

impl Region {
    /// All regions, in display order.
    pub const ALL: [Region; 4] = [Region::North, Region::South, Region::East, Region::West];

    /// Returns the region name as shown in the dashboard.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::North => "North",
            Region::South => "South",
            Region::East => "East",
            Region::West => "West",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Region {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err(ParseError::Empty);
        }

        Region::ALL
            .iter()
            .copied()
            .find(|region| region.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseError::UnknownRegion(name.to_string()))
    }
}

/// Product line a record is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Product {
    A,
    B,
    C,
    D,
}

impl Product {
    /// All products, in display order.
    pub const ALL: [Product; 4] = [Product::A, Product::B, Product::C, Product::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            Product::A => "A",
            Product::B => "B",
            Product::C => "C",
            Product::D => "D",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Product {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err(ParseError::Empty);
        }

        Product::ALL
            .iter()
            .copied()
            .find(|product| product.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseError::UnknownProduct(name.to_string()))
    }
}

/// A single day of sales.
///
/// The generated dataset holds exactly one record per calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Calendar date of the record
    pub date: NaiveDate,
    /// Sales amount in whole currency units
    pub sales: u32,
    pub region: Region,
    pub product: Product,
    /// Customer rating in [3.0, 5.0)
    pub customer_rating: f64,
}

impl SalesRecord {
    /// Creates a new SalesRecord.
    pub fn new(
        date: NaiveDate,
        sales: u32,
        region: Region,
        product: Product,
        customer_rating: f64,
    ) -> Self {
        SalesRecord {
            date,
            sales,
            region,
            product,
            customer_rating,
        }
    }
}

/// Errors that can occur when parsing region or product names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The name is empty
    Empty,
    /// The name is not one of North, South, East, West
    UnknownRegion(String),
    /// The name is not one of A, B, C, D
    UnknownProduct(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "Name cannot be empty"),
            ParseError::UnknownRegion(name) => write!(f, "Unknown region: {}", name),
            ParseError::UnknownProduct(name) => write!(f, "Unknown product: {}", name),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_parse_is_case_insensitive() {
        assert_eq!("north".parse::<Region>().unwrap(), Region::North);
        assert_eq!(" WEST ".parse::<Region>().unwrap(), Region::West);
    }

    #[test]
    fn test_region_parse_unknown() {
        let result = "Central".parse::<Region>();
        assert_eq!(
            result.unwrap_err(),
            ParseError::UnknownRegion("Central".to_string())
        );
    }

    #[test]
    fn test_region_parse_empty() {
        assert_eq!("  ".parse::<Region>().unwrap_err(), ParseError::Empty);
    }

    #[test]
    fn test_product_display_roundtrips_through_parse() {
        for product in Product::ALL {
            assert_eq!(product.to_string().parse::<Product>().unwrap(), product);
        }
    }

    #[test]
    fn test_product_parse_unknown() {
        assert_eq!(
            "E".parse::<Product>().unwrap_err(),
            ParseError::UnknownProduct("E".to_string())
        );
    }

    #[test]
    fn test_region_ordering_matches_display_order() {
        let mut regions = vec![Region::West, Region::North, Region::East, Region::South];
        regions.sort();
        assert_eq!(regions, Region::ALL.to_vec());
    }
}
