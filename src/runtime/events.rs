//! Backend event stream payloads.

use crate::types::ListingId;

/// Events emitted from the single-writer backend loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    /// The collection was read.
    ListingsLoaded {
        /// Number of listings returned.
        count: usize,
    },
    /// A listing was created and persisted.
    ListingAdded {
        /// New listing id.
        id: ListingId,
    },
    /// A one-time code was sent.
    OtpSent,
    /// A one-time code was checked.
    OtpChecked {
        /// True when the code matched.
        accepted: bool,
    },
}
