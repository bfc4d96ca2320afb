//! Coordinates for map pins. Nothing here geocodes a real address.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

/// Johannesburg city centre.
pub const JOHANNESBURG: Coordinates = Coordinates {
    lat: -26.2041,
    lng: 28.0473,
};

/// Width of the jitter box in degrees.
pub const DEFAULT_SPREAD: f64 = 0.1;

/// A point drawn uniformly from the box of side `spread` centred on `center`.
///
/// A zero or non-finite `spread` yields `center` unchanged.
pub fn jitter<R: Rng + ?Sized>(center: Coordinates, spread: f64, rng: &mut R) -> Coordinates {
    let half = spread.abs() / 2.0;
    if !half.is_finite() || half == 0.0 {
        return center;
    }
    Coordinates {
        lat: center.lat + rng.gen_range(-half..half),
        lng: center.lng + rng.gen_range(-half..half),
    }
}

/// Jittered point around Johannesburg, as used for newly posted rooms.
pub fn pin_near_johannesburg() -> Coordinates {
    jitter(JOHANNESBURG, DEFAULT_SPREAD, &mut rand::thread_rng())
}
