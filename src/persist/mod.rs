/// In-process slot backend.
pub mod memory;
/// SQLite slot backend.
pub mod sqlite;

use serde::{Deserialize, Serialize};

use crate::listing::Listing;

/// Version number for serialized [`SlotEnvelope`] payloads.
pub const SLOT_FORMAT_VERSION: u16 = 1;

/// Key the listing collection is stored under unless configured otherwise.
pub const DEFAULT_SLOT_KEY: &str = "backroom_listings_data_v1";

/// Failure reading or writing a slot.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// SQLite backend failure.
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Payload could not be encoded or decoded.
    #[error("payload: {0}")]
    Serde(#[from] serde_json::Error),
    /// Payload was written by a newer format.
    #[error("unsupported slot format version {0}")]
    UnsupportedFormat(u16),
    /// Backend-specific failure.
    #[error("{0}")]
    Message(String),
}

/// Result alias for slot operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// A key-value store holding one serialized blob per key.
///
/// The listing store only ever uses a single key; backends may hold others.
pub trait Slot: Send {
    /// Returns the blob under `key`, or `None` when the key was never written.
    fn read(&mut self, key: &str) -> PersistResult<Option<Vec<u8>>>;
    /// Replaces the blob under `key`.
    fn write(&mut self, key: &str, payload: &[u8]) -> PersistResult<()>;
    /// Makes prior writes durable.
    fn flush(&mut self) -> PersistResult<()> {
        Ok(())
    }
}

impl<S: Slot + ?Sized> Slot for Box<S> {
    fn read(&mut self, key: &str) -> PersistResult<Option<Vec<u8>>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, payload: &[u8]) -> PersistResult<()> {
        (**self).write(key, payload)
    }

    fn flush(&mut self) -> PersistResult<()> {
        (**self).flush()
    }
}

/// Versioned wrapper for the persisted listing collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotEnvelope {
    /// Payload format version.
    pub format_version: u16,
    /// Listings, newest first as written by the store.
    pub listings: Vec<Listing>,
}

/// Serializes `listings` inside a [`SlotEnvelope`].
pub fn encode_listings(listings: &[Listing]) -> PersistResult<Vec<u8>> {
    #[derive(Serialize)]
    struct Borrowed<'a> {
        format_version: u16,
        listings: &'a [Listing],
    }

    Ok(serde_json::to_vec(&Borrowed {
        format_version: SLOT_FORMAT_VERSION,
        listings,
    })?)
}

#[derive(Deserialize)]
struct EnvelopeHeader {
    format_version: u16,
}

/// Decodes a slot payload, accepting both enveloped and bare-array layouts.
///
/// The version is checked before the records are decoded, so a payload from
/// a newer format fails with [`PersistError::UnsupportedFormat`].
pub fn decode_listings(payload: &[u8]) -> PersistResult<Vec<Listing>> {
    // Unversioned payloads are a bare JSON array of listings.
    if payload.iter().find(|b| !b.is_ascii_whitespace()) == Some(&b'[') {
        return Ok(serde_json::from_slice::<Vec<Listing>>(payload)?);
    }

    let header: EnvelopeHeader = serde_json::from_slice(payload)?;
    if header.format_version != SLOT_FORMAT_VERSION {
        return Err(PersistError::UnsupportedFormat(header.format_version));
    }
    Ok(serde_json::from_slice::<SlotEnvelope>(payload)?.listings)
}
