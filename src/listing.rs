//! Listing record, draft, address and amenity types.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::{AmenityStatus, Availability, EpochMs, ListingId, Rand};

/// Street address plus the coordinates used for map pins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Street line.
    pub street: String,
    /// Suburb or township; the location filter matches on this.
    pub suburb: String,
    /// City.
    pub city: String,
    /// Province.
    pub province: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

/// Utility and facility terms for a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amenities {
    /// Internet access.
    pub wifi: AmenityStatus,
    /// Running water.
    pub water: AmenityStatus,
    /// Prepaid or metered electricity.
    pub electricity: AmenityStatus,
    /// Bathroom access.
    pub bathroom: AmenityStatus,
}

/// Fully materialized listing as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Store-assigned identifier.
    pub id: ListingId,
    /// Residence name shown on the card.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Landlord account identifier.
    pub landlord_id: String,
    /// Landlord display name.
    pub landlord_name: String,
    /// Contact phone number as entered.
    pub contact_phone: String,
    /// True when the landlord accepts WhatsApp messages.
    #[serde(rename = "contactWhatsApp")]
    pub contact_whatsapp: bool,
    /// Landlord national ID number, if supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landlord_id_number: Option<String>,
    /// Monthly rent.
    pub price: Rand,
    /// Deposit due on move-in.
    pub deposit: Rand,
    /// Location.
    pub address: Address,
    /// Photo URLs; the first is the interior shot.
    pub photos: Vec<String>,
    /// Amenity terms.
    pub amenities: Amenities,
    /// Bed count.
    pub beds: u32,
    /// Bathroom count.
    pub baths: u32,
    /// Furnished flag.
    pub furnished: bool,
    /// Safety score, 0 to 100.
    pub safety: u8,
    /// Average rating, 0 to 5.
    pub rating: f32,
    /// Occupancy state.
    #[serde(flatten)]
    pub availability: Availability,
    /// Creation timestamp in milliseconds since epoch.
    pub created_at: EpochMs,
}

/// Caller-proposed listing; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDraft {
    /// Residence name shown on the card.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Landlord account identifier.
    pub landlord_id: String,
    /// Landlord display name.
    pub landlord_name: String,
    /// Contact phone number as entered.
    pub contact_phone: String,
    /// True when the landlord accepts WhatsApp messages.
    pub contact_whatsapp: bool,
    /// Landlord national ID number, if supplied.
    pub landlord_id_number: Option<String>,
    /// Monthly rent.
    pub price: Rand,
    /// Deposit due on move-in.
    pub deposit: Rand,
    /// Location.
    pub address: Address,
    /// Photo URLs; the first is the interior shot.
    pub photos: Vec<String>,
    /// Amenity terms.
    pub amenities: Amenities,
    /// Bed count.
    pub beds: u32,
    /// Bathroom count.
    pub baths: u32,
    /// Furnished flag.
    pub furnished: bool,
    /// Safety score, 0 to 100.
    pub safety: u8,
    /// Average rating, 0 to 5.
    pub rating: f32,
    /// Occupancy state.
    pub availability: Availability,
}

/// Why a draft cannot become a listing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    /// Title was empty or whitespace.
    #[error("listing title is required")]
    MissingTitle,
    /// Safety score above 100.
    #[error("safety score {0} is out of range 0..=100")]
    SafetyOutOfRange(u8),
    /// Rating outside 0..=5 or not a number.
    #[error("rating {0} is out of range 0..=5")]
    RatingOutOfRange(String),
}

impl ListingDraft {
    /// Checks the field invariants a stored listing must satisfy.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingTitle);
        }
        if self.safety > 100 {
            return Err(DraftError::SafetyOutOfRange(self.safety));
        }
        if !self.rating.is_finite() || !(0.0..=5.0).contains(&self.rating) {
            return Err(DraftError::RatingOutOfRange(self.rating.to_string()));
        }
        Ok(())
    }

    /// Materializes the draft with store-assigned identity.
    pub fn into_listing(self, id: ListingId, created_at: EpochMs) -> Listing {
        Listing {
            id,
            title: self.title,
            description: self.description,
            landlord_id: self.landlord_id,
            landlord_name: self.landlord_name,
            contact_phone: self.contact_phone,
            contact_whatsapp: self.contact_whatsapp,
            landlord_id_number: self.landlord_id_number,
            price: self.price,
            deposit: self.deposit,
            address: self.address,
            photos: self.photos,
            amenities: self.amenities,
            beds: self.beds,
            baths: self.baths,
            furnished: self.furnished,
            safety: self.safety,
            rating: self.rating,
            availability: self.availability,
            created_at,
        }
    }
}

impl Listing {
    /// Primary (interior) photo, if any.
    pub fn cover_photo(&self) -> Option<&str> {
        self.photos.first().map(String::as_str)
    }

    /// `wa.me` chat link, or `None` when the landlord opted out of WhatsApp.
    pub fn whatsapp_link(&self) -> Option<String> {
        self.contact_whatsapp
            .then(|| format!("https://wa.me/{}", whatsapp_number(&self.contact_phone)))
    }

    /// `tel:` link for the contact number.
    pub fn phone_link(&self) -> String {
        format!("tel:{}", self.contact_phone)
    }

    /// Google Maps search link for the street address.
    pub fn maps_link(&self) -> Option<Url> {
        let query = format!(
            "{}, {}, {}",
            self.address.street, self.address.suburb, self.address.city
        );
        Url::parse_with_params(
            "https://www.google.com/maps/search/",
            &[("api", "1"), ("query", query.as_str())],
        )
        .ok()
    }
}

/// Digits-only international form of a local South African number.
pub fn whatsapp_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    match digits.strip_prefix('0') {
        Some(rest) => format!("27{rest}"),
        None => digits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures;

    #[test]
    fn whatsapp_number_replaces_trunk_prefix() {
        assert_eq!(whatsapp_number("082 123 4567"), "27821234567");
        assert_eq!(whatsapp_number("+27 82 123 4567"), "27821234567");
        assert_eq!(whatsapp_number(""), "");
    }

    #[test]
    fn links_follow_contact_preferences() {
        let mut listing = fixtures::seed_listings().remove(0);
        listing.contact_whatsapp = false;
        assert!(listing.whatsapp_link().is_none());
        listing.contact_whatsapp = true;
        listing.contact_phone = "0711112222".to_string();
        assert_eq!(
            listing.whatsapp_link().as_deref(),
            Some("https://wa.me/27711112222")
        );

        let maps = listing.maps_link().expect("maps url");
        assert_eq!(maps.host_str(), Some("www.google.com"));
        let query = maps
            .query_pairs()
            .find(|(k, _)| k == "query")
            .map(|(_, v)| v.into_owned())
            .expect("query param");
        assert!(query.contains(&listing.address.suburb));
    }

    #[test]
    fn validate_rejects_out_of_range_scores() {
        let mut draft = fixtures::sample_draft("Room A", 1000);
        assert!(draft.validate().is_ok());

        draft.safety = 101;
        assert_eq!(draft.validate(), Err(DraftError::SafetyOutOfRange(101)));

        draft.safety = 80;
        draft.rating = f32::NAN;
        assert!(matches!(draft.validate(), Err(DraftError::RatingOutOfRange(_))));

        draft.rating = 4.5;
        draft.title = "   ".to_string();
        assert_eq!(draft.validate(), Err(DraftError::MissingTitle));
    }

    #[test]
    fn listing_serializes_with_camel_case_field_names() {
        let listing = fixtures::seed_listings().remove(0);
        let json = serde_json::to_value(&listing).unwrap();
        for key in ["createdAt", "landlordId", "contactWhatsApp", "status"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        let back: Listing = serde_json::from_value(json).unwrap();
        assert_eq!(back, listing);
    }
}
