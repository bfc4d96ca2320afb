//! Starter collection written into an empty slot.

use crate::{
    listing::{Address, Amenities, Listing, ListingDraft},
    types::{AmenityStatus, Availability},
};

/// Suburbs offered in the location filter and the posting form.
pub const SUBURBS: [&str; 8] = [
    "Soweto",
    "Alexandra",
    "Tembisa",
    "Diepsloot",
    "Katlehong",
    "Mamelodi",
    "Orange Farm",
    "Ivory Park",
];

const INTERIOR_PHOTO: &str =
    "https://images.unsplash.com/photo-1526308593555-539923361e60?auto=format&fit=crop&w=800&q=60";
const EXTERIOR_PHOTO: &str =
    "https://images.unsplash.com/photo-1568605114967-8130f3a36994?auto=format&fit=crop&w=800&q=60";

/// Photo pair attached to listings posted without uploads.
pub fn placeholder_photos() -> Vec<String> {
    vec![INTERIOR_PHOTO.to_string(), EXTERIOR_PHOTO.to_string()]
}

fn address(street: &str, suburb: &str, lat: f64, lng: f64) -> Address {
    Address {
        street: street.to_string(),
        suburb: suburb.to_string(),
        city: "Johannesburg".to_string(),
        province: "Gauteng".to_string(),
        lat,
        lng,
    }
}

fn amenities(
    wifi: AmenityStatus,
    water: AmenityStatus,
    electricity: AmenityStatus,
    bathroom: AmenityStatus,
) -> Amenities {
    Amenities {
        wifi,
        water,
        electricity,
        bathroom,
    }
}

/// The seed collection, newest first.
pub fn seed_listings() -> Vec<Listing> {
    use AmenityStatus::{Free, NotAvailable, PaidByTenant};

    vec![
        Listing {
            id: "seed-1".to_string(),
            title: "Vilakazi Backroom".to_string(),
            description: "Neat backroom a short walk from Vilakazi Street. Quiet yard with a locked gate and prepaid electricity.".to_string(),
            landlord_id: "landlord-1".to_string(),
            landlord_name: "Thandi Mokoena".to_string(),
            contact_phone: "0821234567".to_string(),
            contact_whatsapp: true,
            landlord_id_number: None,
            price: 1800,
            deposit: 1800,
            address: address("12 Vilakazi St", "Soweto", -26.2385, 27.9086),
            photos: placeholder_photos(),
            amenities: amenities(Free, Free, PaidByTenant, Free),
            beds: 1,
            baths: 1,
            furnished: false,
            safety: 78,
            rating: 4.5,
            availability: Availability::AvailableNow,
            created_at: 1_717_200_000_000,
        },
        Listing {
            id: "seed-2".to_string(),
            title: "Alex Garden Room".to_string(),
            description: "Bright room with its own entrance, close to taxis on London Road.".to_string(),
            landlord_id: "landlord-2".to_string(),
            landlord_name: "Sipho Dlamini".to_string(),
            contact_phone: "0739876543".to_string(),
            contact_whatsapp: true,
            landlord_id_number: None,
            price: 1200,
            deposit: 600,
            address: address("45 London Rd", "Alexandra", -26.1030, 28.0937),
            photos: placeholder_photos(),
            amenities: amenities(NotAvailable, Free, PaidByTenant, Free),
            beds: 1,
            baths: 0,
            furnished: true,
            safety: 55,
            rating: 3.8,
            availability: Availability::AvailableNow,
            created_at: 1_717_100_000_000,
        },
        Listing {
            id: "seed-3".to_string(),
            title: "Tembisa Family Cottage".to_string(),
            description: "Two-bed cottage with a secure, safe yard and CCTV. Ideal for a small family.".to_string(),
            landlord_id: "landlord-3".to_string(),
            landlord_name: "Lerato Nkosi".to_string(),
            contact_phone: "0761112233".to_string(),
            contact_whatsapp: false,
            landlord_id_number: None,
            price: 3200,
            deposit: 3200,
            address: address("8 Andrew Mapheto Dr", "Tembisa", -25.9964, 28.2268),
            photos: placeholder_photos(),
            amenities: amenities(Free, Free, Free, Free),
            beds: 2,
            baths: 1,
            furnished: false,
            safety: 90,
            rating: 4.8,
            availability: Availability::Taken,
            created_at: 1_717_000_000_000,
        },
        Listing {
            id: "seed-4".to_string(),
            title: "Mamelodi Student Room".to_string(),
            description: "Room near the university shuttle. Shared kitchen, fibre wifi paid monthly.".to_string(),
            landlord_id: "landlord-4".to_string(),
            landlord_name: "Kagiso Molefe".to_string(),
            contact_phone: "0845550101".to_string(),
            contact_whatsapp: true,
            landlord_id_number: None,
            price: 950,
            deposit: 500,
            address: address("301 Tsamaya Ave", "Mamelodi", -25.7236, 28.3980),
            photos: placeholder_photos(),
            amenities: amenities(PaidByTenant, Free, PaidByTenant, Free),
            beds: 1,
            baths: 0,
            furnished: true,
            safety: 62,
            rating: 4.1,
            availability: Availability::AvailableFrom(chrono::NaiveDate::from_ymd_opt(2024, 7, 1)),
            created_at: 1_716_900_000_000,
        },
        Listing {
            id: "seed-5".to_string(),
            title: "Katlehong Flatlet".to_string(),
            description: "Self-contained flatlet with private bathroom and parking for one car.".to_string(),
            landlord_id: "landlord-5".to_string(),
            landlord_name: "Nomsa Khumalo".to_string(),
            contact_phone: "0712223344".to_string(),
            contact_whatsapp: true,
            landlord_id_number: None,
            price: 4200,
            deposit: 4200,
            address: address("19 Moshoeshoe St", "Katlehong", -26.3330, 28.1500),
            photos: placeholder_photos(),
            amenities: amenities(Free, Free, PaidByTenant, Free),
            beds: 1,
            baths: 1,
            furnished: false,
            safety: 70,
            rating: 4.0,
            availability: Availability::AvailableNow,
            created_at: 1_716_800_000_000,
        },
    ]
}

/// A complete draft for tests, demos and benches.
pub fn sample_draft(title: &str, price: u32) -> ListingDraft {
    ListingDraft {
        title: title.to_string(),
        description: "Clean room with prepaid electricity.".to_string(),
        landlord_id: "landlord-sample".to_string(),
        landlord_name: "Sample Landlord".to_string(),
        contact_phone: "0820000000".to_string(),
        contact_whatsapp: true,
        landlord_id_number: None,
        price,
        deposit: price,
        address: address("1 Sample St", SUBURBS[0], -26.2041, 28.0473),
        photos: placeholder_photos(),
        amenities: amenities(
            AmenityStatus::NotAvailable,
            AmenityStatus::Free,
            AmenityStatus::PaidByTenant,
            AmenityStatus::Free,
        ),
        beds: 1,
        baths: 1,
        furnished: false,
        safety: 70,
        rating: 0.0,
        availability: Availability::AvailableNow,
    }
}
