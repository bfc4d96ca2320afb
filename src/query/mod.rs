//! Listing filter and sort over an in-memory collection.

/// Filter predicate and ordering.
pub mod engine;
/// Query parameter types.
pub mod params;

pub use engine::{filter, matches, run, sort_by_key};
pub use params::{PriceRange, QueryError, QueryParams, SortKey};
