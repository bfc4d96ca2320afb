use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Rand;

/// A query value that did not parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Not one of the fixed price buckets.
    #[error("unknown price range: {0}")]
    UnknownPriceRange(String),
    /// Not one of the sort keys.
    #[error("unknown sort option: {0}")]
    UnknownSort(String),
}

/// Coarse price filter buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PriceRange {
    /// No price constraint, including prices outside every bucket.
    #[default]
    #[serde(rename = "ALL")]
    Any,
    /// R500 to R1500, both inclusive.
    #[serde(rename = "500-1500")]
    R500To1500,
    /// Above R1500 up to R2500.
    #[serde(rename = "1500-2500")]
    R1500To2500,
    /// Above R2500 up to R3500.
    #[serde(rename = "2500-3500")]
    R2500To3500,
    /// Above R3500 up to R5000.
    #[serde(rename = "3500-5000")]
    R3500To5000,
}

impl PriceRange {
    /// Every bucket in display order, `Any` first.
    pub const ALL: [PriceRange; 5] = [
        Self::Any,
        Self::R500To1500,
        Self::R1500To2500,
        Self::R2500To3500,
        Self::R3500To5000,
    ];

    /// True when `price` falls inside the bucket.
    ///
    /// Only the lowest bucket includes its lower bound.
    pub fn contains(self, price: Rand) -> bool {
        match self {
            Self::Any => true,
            Self::R500To1500 => (500..=1500).contains(&price),
            Self::R1500To2500 => price > 1500 && price <= 2500,
            Self::R2500To3500 => price > 2500 && price <= 3500,
            Self::R3500To5000 => price > 3500 && price <= 5000,
        }
    }

    /// Wire and UI token.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Any => "ALL",
            Self::R500To1500 => "500-1500",
            Self::R1500To2500 => "1500-2500",
            Self::R2500To3500 => "2500-3500",
            Self::R3500To5000 => "3500-5000",
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceRange {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::Any);
        }
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| QueryError::UnknownPriceRange(s.to_string()))
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortKey {
    /// Newest first.
    #[default]
    Recent,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Highest safety score first.
    Safety,
}

impl SortKey {
    /// Every sort key, default first.
    pub const ALL: [SortKey; 4] = [Self::Recent, Self::PriceAsc, Self::PriceDesc, Self::Safety];

    /// Wire and UI token.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recent => "RECENT",
            Self::PriceAsc => "PRICE_ASC",
            Self::PriceDesc => "PRICE_DESC",
            Self::Safety => "SAFETY",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| QueryError::UnknownSort(s.to_string()))
    }
}

/// Search box, suburb picker, price bucket and sort selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryParams {
    /// Free text matched against title and description.
    pub search: String,
    /// Exact suburb, or `None` for any.
    pub suburb: Option<String>,
    /// Price bucket.
    pub price: PriceRange,
    /// Ordering of the result.
    pub sort: SortKey,
}

impl QueryParams {
    /// Parameters that match everything, newest first.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Sets the suburb filter; an empty string clears it.
    pub fn suburb(mut self, suburb: impl Into<String>) -> Self {
        let suburb = suburb.into();
        self.suburb = (!suburb.is_empty()).then_some(suburb);
        self
    }

    /// Sets the price bucket.
    pub fn price(mut self, price: PriceRange) -> Self {
        self.price = price;
        self
    }

    /// Sets the ordering.
    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_edges_follow_half_open_ranges() {
        assert!(PriceRange::R500To1500.contains(500));
        assert!(PriceRange::R500To1500.contains(1500));
        assert!(!PriceRange::R1500To2500.contains(1500));
        assert!(PriceRange::R1500To2500.contains(2500));
        assert!(!PriceRange::R2500To3500.contains(2500));
        assert!(PriceRange::R3500To5000.contains(5000));
        assert!(!PriceRange::R3500To5000.contains(5001));
    }

    #[test]
    fn prices_below_lowest_bucket_only_match_any() {
        for range in PriceRange::ALL {
            assert_eq!(range.contains(499), range == PriceRange::Any, "{range}");
        }
        assert!(PriceRange::Any.contains(0));
        assert!(PriceRange::Any.contains(12_000));
    }

    #[test]
    fn tokens_parse_and_print() {
        for range in PriceRange::ALL {
            assert_eq!(range.to_string().parse::<PriceRange>().unwrap(), range);
        }
        for key in SortKey::ALL {
            assert_eq!(key.to_string().parse::<SortKey>().unwrap(), key);
        }
        assert_eq!("".parse::<PriceRange>().unwrap(), PriceRange::Any);
        assert_eq!("price_asc".parse::<SortKey>().unwrap(), SortKey::PriceAsc);
        assert!(matches!(
            "cheap".parse::<SortKey>(),
            Err(QueryError::UnknownSort(_))
        ));
        assert!("100-200".parse::<PriceRange>().is_err());
    }

    #[test]
    fn empty_suburb_means_any() {
        assert_eq!(QueryParams::new().suburb("").suburb, None);
        assert_eq!(
            QueryParams::new().suburb("Soweto").suburb.as_deref(),
            Some("Soweto")
        );
    }
}
