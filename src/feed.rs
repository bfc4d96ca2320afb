//! Caller-side listing view kept in sync with the backend.

use crate::{
    i18n::{self, keys},
    listing::{Listing, ListingDraft},
    query::{self, QueryParams},
    runtime::handle::{BackendHandle, RuntimeError},
    types::Language,
};

/// Listings as last loaded, plus the results of local creates.
///
/// Failed loads and failed creates leave the held listings untouched.
#[derive(Debug, Clone, Default)]
pub struct ListingFeed {
    listings: Vec<Listing>,
    loaded: bool,
}

impl ListingFeed {
    /// Empty, not yet loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Listings currently held, newest first.
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// True after the first successful load.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Replaces the held listings with the backend's collection.
    pub async fn refresh(&mut self, backend: &BackendHandle) -> Result<usize, RuntimeError> {
        let listings = backend.get_listings().await?;
        self.listings = listings;
        self.loaded = true;
        Ok(self.listings.len())
    }

    /// Creates a listing and prepends it once the write succeeded.
    ///
    /// On failure the returned message is the localized alert to show.
    pub async fn post(
        &mut self,
        backend: &BackendHandle,
        draft: ListingDraft,
        language: Language,
    ) -> Result<Listing, PostFailed> {
        match backend.add_listing(draft).await {
            Ok(listing) => {
                self.listings.insert(0, listing.clone());
                Ok(listing)
            }
            Err(source) => Err(PostFailed {
                message: i18n::translate(language, keys::POST_FAILED).to_string(),
                source,
            }),
        }
    }

    /// Filtered, ordered view over the held listings.
    pub fn query(&self, params: &QueryParams) -> Vec<&Listing> {
        query::run(&self.listings, params)
    }
}

/// A create that did not reach storage.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct PostFailed {
    /// Localized alert text.
    pub message: String,
    /// What went wrong.
    #[source]
    pub source: RuntimeError,
}
