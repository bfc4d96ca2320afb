//! Listing collection, store and seed data.

/// Seed collection and sample drafts.
pub mod fixtures;
/// Slot-backed listing store.
pub mod store;
