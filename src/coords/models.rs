use serde::{Deserialize, Serialize};

/// A latitude/longitude pair where both values are finite.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoordinatePair {
    pub lat: f64,
    pub lng: f64,
}

impl CoordinatePair {
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if lat.is_finite() && lng.is_finite() {
            Some(Self { lat, lng })
        } else {
            None
        }
    }
}
