//! Shared primitive IDs and marketplace enums.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Opaque listing identifier assigned by the store.
pub type ListingId = String;
/// Milliseconds since the Unix epoch.
pub type EpochMs = u64;
/// Monthly rent or deposit in whole rand.
pub type Rand = u32;

/// Who pays for (or whether there is) a given amenity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmenityStatus {
    /// Included in the rent.
    #[serde(rename = "Free")]
    Free,
    /// Available, billed to the tenant.
    #[serde(rename = "Paid by Tenant")]
    PaidByTenant,
    /// Not offered.
    #[serde(rename = "Not Available")]
    NotAvailable,
}

impl AmenityStatus {
    /// Human-readable label used in descriptions and prompts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::PaidByTenant => "Paid by Tenant",
            Self::NotAvailable => "Not Available",
        }
    }

    /// True unless the amenity is not offered at all.
    pub fn is_available(self) -> bool {
        !matches!(self, Self::NotAvailable)
    }
}

/// Occupancy state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "RawAvailability", try_from = "RawAvailability")]
pub enum Availability {
    /// Ready to move in.
    AvailableNow,
    /// Already let.
    Taken,
    /// Free from a future date, when the landlord gave one.
    AvailableFrom(Option<NaiveDate>),
}

/// Status tag as stored on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum StatusTag {
    #[serde(rename = "Available Now")]
    Available,
    #[serde(rename = "Taken")]
    Taken,
    #[serde(rename = "Available From")]
    AvailableFrom,
}

/// Flat `status` + `availableDate` pair kept for payload compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAvailability {
    status: StatusTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    available_date: Option<String>,
}

impl From<Availability> for RawAvailability {
    fn from(value: Availability) -> Self {
        match value {
            Availability::AvailableNow => Self {
                status: StatusTag::Available,
                available_date: None,
            },
            Availability::Taken => Self {
                status: StatusTag::Taken,
                available_date: None,
            },
            Availability::AvailableFrom(date) => Self {
                status: StatusTag::AvailableFrom,
                available_date: date.map(|d| d.format("%Y-%m-%d").to_string()),
            },
        }
    }
}

impl TryFrom<RawAvailability> for Availability {
    type Error = String;

    fn try_from(raw: RawAvailability) -> Result<Self, Self::Error> {
        Ok(match raw.status {
            StatusTag::Available => Self::AvailableNow,
            StatusTag::Taken => Self::Taken,
            StatusTag::AvailableFrom => {
                let date = match raw.available_date.as_deref().map(str::trim) {
                    None | Some("") => None,
                    Some(text) => Some(
                        NaiveDate::parse_from_str(text, "%Y-%m-%d")
                            .map_err(|e| format!("invalid availableDate {text:?}: {e}"))?,
                    ),
                };
                Self::AvailableFrom(date)
            }
        })
    }
}

impl Availability {
    /// True when a tenant could still take the room.
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Taken)
    }
}

/// Interface languages offered during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// isiZulu.
    Zu,
    /// isiXhosa.
    Xh,
    /// Sepedi.
    Nso,
    /// Sesotho.
    St,
    /// Setswana.
    Tn,
    /// Xitsonga.
    Ts,
    /// siSwati.
    Ss,
    /// Tshivenda.
    Ve,
    /// isiNdebele.
    Nr,
}

impl Language {
    /// Every supported language in picker order.
    pub const ALL: [Language; 10] = [
        Self::En,
        Self::Zu,
        Self::Xh,
        Self::Nso,
        Self::St,
        Self::Tn,
        Self::Ts,
        Self::Ss,
        Self::Ve,
        Self::Nr,
    ];

    /// Short language code.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zu => "zu",
            Self::Xh => "xh",
            Self::Nso => "nso",
            Self::St => "st",
            Self::Tn => "tn",
            Self::Ts => "ts",
            Self::Ss => "ss",
            Self::Ve => "ve",
            Self::Nr => "nr",
        }
    }

    /// Endonym shown in the language picker.
    pub fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Zu => "isiZulu",
            Self::Xh => "isiXhosa",
            Self::Nso => "Sepedi",
            Self::St => "Sesotho",
            Self::Tn => "Setswana",
            Self::Ts => "Xitsonga",
            Self::Ss => "siSwati",
            Self::Ve => "Tshivenda",
            Self::Nr => "isiNdebele",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown language code: {s}"))
    }
}

/// Which side of the marketplace the user is acting as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ViewRole {
    /// No role picked yet.
    #[default]
    Home,
    /// Searching for a room.
    Tenant,
    /// Posting rooms.
    Landlord,
}
