use std::collections::BTreeSet;
use std::time::{SystemTime, UNIX_EPOCH};

use hashbrown::HashSet;

use crate::{
    core::fixtures,
    listing::{DraftError, Listing, ListingDraft},
    persist::{DEFAULT_SLOT_KEY, PersistError, Slot, decode_listings, encode_listings},
    runtime::latency::LatencyProfile,
    types::{EpochMs, ListingId},
};

/// Failure of a store operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Slot read, write or decode failed.
    #[error("storage: {0}")]
    Persist(#[from] PersistError),
    /// Draft broke a listing invariant; nothing was written.
    #[error("invalid listing: {0}")]
    InvalidDraft(#[from] DraftError),
    /// Id collision in the collection.
    #[error("listing {0} already exists")]
    AlreadyExists(ListingId),
}

/// Ordered listing collection, newest first, with an id set for uniqueness.
#[derive(Debug, Default, Clone)]
pub struct ListingCollection {
    records: Vec<Listing>,
    ids: HashSet<ListingId>,
}

impl ListingCollection {
    /// Empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps listings in their stored order.
    pub fn from_listings(records: Vec<Listing>) -> Self {
        let ids = records.iter().map(|l| l.id.clone()).collect();
        Self { records, ids }
    }

    /// Unwraps into the ordered records.
    pub fn into_listings(self) -> Vec<Listing> {
        self.records
    }

    /// Records, newest first.
    pub fn as_slice(&self) -> &[Listing] {
        &self.records
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when there are no listings.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when `id` is taken.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Looks up a listing by id.
    pub fn get(&self, id: &str) -> Option<&Listing> {
        self.records.iter().find(|l| l.id == id)
    }

    /// Distinct suburbs present in the collection, sorted.
    pub fn suburbs(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|l| l.address.suburb.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Gives `draft` its identity: `created_at` is `now`, bumped past any
    /// id already taken, and `id` is its decimal form.
    pub fn assign_identity(&self, draft: ListingDraft, now: EpochMs) -> Listing {
        let mut created_at = now;
        while self.ids.contains(created_at.to_string().as_str()) {
            created_at += 1;
        }
        draft.into_listing(created_at.to_string(), created_at)
    }

    /// Inserts `listing` at the front.
    pub fn prepend(&mut self, listing: Listing) -> Result<(), StoreError> {
        if self.ids.contains(listing.id.as_str()) {
            return Err(StoreError::AlreadyExists(listing.id));
        }
        self.ids.insert(listing.id.clone());
        self.records.insert(0, listing);
        Ok(())
    }
}

/// Construction-time settings for a [`ListingStore`].
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Slot key holding the collection.
    pub slot_key: String,
    /// Simulated round-trip delays.
    pub latency: LatencyProfile,
    /// Collection written when the slot is empty.
    pub seed: Vec<Listing>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            latency: LatencyProfile::simulated(),
            seed: fixtures::seed_listings(),
        }
    }
}

/// Source of truth for listings, backed by one slot.
///
/// Every call goes back to the slot; nothing is cached between calls. The
/// read and write inside `add_listing` have no suspension point between them,
/// but the slot itself has no version check: stores in separate processes
/// sharing one SQLite file race, and whichever writes last wins.
pub struct ListingStore<S: Slot> {
    slot: S,
    opts: StoreOptions,
}

impl<S: Slot> ListingStore<S> {
    /// Wraps `slot`; nothing is read until the first call.
    pub fn open(slot: S, opts: StoreOptions) -> Self {
        Self { slot, opts }
    }

    /// Returns the stored collection, seeding the slot on first access.
    pub async fn get_listings(&mut self) -> Result<Vec<Listing>, StoreError> {
        self.opts.latency.get_listings.elapse().await;
        self.load()
    }

    /// Creates a listing from `draft` and persists the whole collection.
    pub async fn add_listing(&mut self, draft: ListingDraft) -> Result<Listing, StoreError> {
        draft.validate()?;
        self.opts.latency.add_listing.elapse().await;

        let current = self.get_listings().await?;
        let mut collection = ListingCollection::from_listings(current);
        let listing = collection.assign_identity(draft, now_ms());
        collection.prepend(listing.clone())?;

        let payload = encode_listings(collection.as_slice())?;
        self.slot.write(&self.opts.slot_key, &payload)?;
        tracing::info!(id = %listing.id, total = collection.len(), "listing added");
        Ok(listing)
    }

    /// Makes prior writes durable.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.slot.flush()?;
        Ok(())
    }

    /// Flushes the slot and hands it back.
    pub fn close(mut self) -> Result<S, StoreError> {
        self.flush()?;
        Ok(self.slot)
    }

    fn load(&mut self) -> Result<Vec<Listing>, StoreError> {
        match self.slot.read(&self.opts.slot_key)? {
            Some(payload) => Ok(decode_listings(&payload)?),
            None => {
                let seed = self.opts.seed.clone();
                let payload = encode_listings(&seed)?;
                self.slot.write(&self.opts.slot_key, &payload)?;
                tracing::info!(count = seed.len(), key = %self.opts.slot_key, "seeded empty listing slot");
                Ok(seed)
            }
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
