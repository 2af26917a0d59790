use crate::coords::CoordinatePair;
use crate::extraction::models::FallbackMiss;
use regex::Regex;
use std::sync::LazyLock;

static COORDINATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-?\d+\.\d+,-?\d+\.\d+").expect("Coordinate pattern must be a valid regex.")
});

/// Takes the first `lat,lng`-looking substring of the raw body.
pub fn scan(body: &str) -> Result<CoordinatePair, FallbackMiss> {
    let found = COORDINATE_PATTERN
        .find(body)
        .ok_or(FallbackMiss::NoMatch)?;
    let (lat, lng) = found
        .as_str()
        .split_once(',')
        .ok_or(FallbackMiss::UnparsableMatch)?;
    match (lat.parse::<f64>(), lng.parse::<f64>()) {
        (Ok(lat), Ok(lng)) => CoordinatePair::new(lat, lng).ok_or(FallbackMiss::UnparsableMatch),
        _ => Err(FallbackMiss::UnparsableMatch),
    }
}
