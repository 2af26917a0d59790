//! Coordinate extraction from `GetMetadata` responses.
//!
//! The structured path is tried first because it is exact. The pattern scan only runs when the
//! structured path does not yield two finite numbers, since it may match unrelated pairs.

use crate::coords::CoordinatePair;
use models::{ExtractionAttempt, ParseFailure, Provenance, StructuredMiss};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

pub mod fallback;
pub mod metadata_path;
pub mod models;
#[cfg(test)]
mod tests;

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("Leading number pattern must be a valid regex.")
});

pub fn extract(body: &str) -> ExtractionAttempt {
    let structured_miss = match structured(body) {
        Ok((coordinates, provenance)) => {
            return ExtractionAttempt::Extracted {
                coordinates,
                provenance,
            }
        }
        Err(miss) => miss,
    };
    match fallback::scan(body) {
        Ok(coordinates) => ExtractionAttempt::Extracted {
            coordinates,
            provenance: Provenance::PatternFallback,
        },
        Err(fallback_miss) => ExtractionAttempt::Failed(ParseFailure {
            structured: structured_miss,
            fallback: fallback_miss,
        }),
    }
}

fn structured(body: &str) -> Result<(CoordinatePair, Provenance), StructuredMiss> {
    let document: Value = serde_json::from_str(body).map_err(|_| StructuredMiss::InvalidJson)?;
    let (lat, lng) = metadata_path::location_leaves(&document).ok_or(StructuredMiss::PathMissing)?;
    match (lat, lng) {
        (Value::Number(lat), Value::Number(lng)) => lat
            .as_f64()
            .zip(lng.as_f64())
            .and_then(|(lat, lng)| CoordinatePair::new(lat, lng))
            .map(|coordinates| (coordinates, Provenance::Structured))
            .ok_or(StructuredMiss::LeavesNotNumeric),
        (Value::String(lat), Value::String(lng)) => coerce(lat)
            .zip(coerce(lng))
            .and_then(|(lat, lng)| CoordinatePair::new(lat, lng))
            .map(|coordinates| (coordinates, Provenance::StructuredStringCoerced))
            .ok_or(StructuredMiss::LeavesNotNumeric),
        _ => Err(StructuredMiss::LeavesNotNumeric),
    }
}

/// Reads the number a string starts with and ignores whatever follows it, so `"12.5deg"` is 12.5.
fn coerce(raw: &str) -> Option<f64> {
    LEADING_NUMBER
        .find(raw.trim_start())
        .and_then(|found| found.as_str().parse::<f64>().ok())
}
