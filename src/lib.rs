//! Room-rental listings backed by a single persisted slot, with local
//! search and a stubbed phone-number sign-in.
//!
//! # Examples
//!
//! Querying the seeded collection with [`core::store::ListingStore`]:
//! ```
//! use backroom::{
//!     core::store::{ListingStore, StoreOptions},
//!     persist::memory::MemorySlot,
//!     query::{self, PriceRange, QueryParams, SortKey},
//!     runtime::latency::LatencyProfile,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let opts = StoreOptions { latency: LatencyProfile::immediate(), ..StoreOptions::default() };
//! let mut store = ListingStore::open(MemorySlot::new(), opts);
//! let listings = store.get_listings().await.expect("load");
//!
//! let params = QueryParams::new()
//!     .price(PriceRange::R500To1500)
//!     .sort(SortKey::PriceAsc);
//! let cheapest = query::run(&listings, &params);
//! assert!(cheapest.windows(2).all(|w| w[0].price <= w[1].price));
//! # }
//! ```
//!
//! Runtime usage with a SQLite slot:
//! ```no_run
//! use backroom::{
//!     auth::StubOtp,
//!     config::RuntimeConfig,
//!     core::{fixtures::sample_draft, store::{ListingStore, StoreOptions}},
//!     persist::sqlite::SqliteSlot,
//!     runtime::handle::spawn_backend,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let slot = SqliteSlot::open("backroom.db").expect("open sqlite");
//! let store = ListingStore::open(slot, StoreOptions::default());
//! let handle = spawn_backend(store, StubOtp::default(), &RuntimeConfig::default());
//! let listing = handle.add_listing(sample_draft("Sunny Backroom", 1400)).await.expect("add");
//! assert_eq!(handle.get_listings().await.expect("load")[0].id, listing.id);
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![warn(missing_docs)]

/// OTP gateway and onboarding flow.
pub mod auth;
pub mod config;
/// Listing store and seed data.
pub mod core;
pub mod describe;
pub mod feed;
pub mod geo;
pub mod i18n;
/// Listing records and drafts.
pub mod listing;
/// Slot abstraction with SQLite and in-memory implementations.
pub mod persist;
pub mod query;
pub mod runtime;
/// Shared primitive types and enums.
pub mod types;
