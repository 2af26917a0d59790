use crate::coords::CoordinatePair;
use crate::extraction::extract;
use crate::extraction::metadata_path::location_leaves;
use crate::extraction::models::{
    ExtractionAttempt, FallbackMiss, ParseFailure, Provenance, StructuredMiss,
};
use serde_json::{json, Value};

/// Wraps `location` at `response[1][0][5][0][1][0]`, padding every level with noise.
fn metadata_response(location: Value) -> Value {
    json!([
        [0, "status"],
        [[
            "pano",
            null,
            [],
            "copyright",
            null,
            [[null, [location, "heading"]]],
        ]],
    ])
}

#[test]
fn test_location_leaves_follow_the_fixed_path() {
    let document = metadata_response(json!([null, null, 1.5, 2.5]));

    let (lat, lng) = location_leaves(&document).expect("Location leaves must be found.");

    assert_eq!(lat, &json!(1.5));
    assert_eq!(lng, &json!(2.5));
}

#[test]
fn test_numeric_leaves_are_taken_as_is() {
    let body = metadata_response(json!([null, null, 40.75, -74.125])).to_string();

    let attempt = extract(&body);

    assert_eq!(
        attempt,
        ExtractionAttempt::Extracted {
            coordinates: CoordinatePair {
                lat: 40.75,
                lng: -74.125
            },
            provenance: Provenance::Structured,
        }
    );
}

#[test]
fn test_string_leaves_are_coerced() {
    let body = metadata_response(json!([null, null, "12.5", "-70.25"])).to_string();

    let attempt = extract(&body);

    assert_eq!(
        attempt,
        ExtractionAttempt::Extracted {
            coordinates: CoordinatePair {
                lat: 12.5,
                lng: -70.25
            },
            provenance: Provenance::StructuredStringCoerced,
        }
    );
}

#[test]
fn test_unparsable_string_leaves_fall_back_to_pattern() {
    let body = metadata_response(json!([null, null, "north", "west", "51.5074,-0.1278"]))
        .to_string();

    let attempt = extract(&body);

    assert_eq!(
        attempt,
        ExtractionAttempt::Extracted {
            coordinates: CoordinatePair {
                lat: 51.5074,
                lng: -0.1278
            },
            provenance: Provenance::PatternFallback,
        }
    );
}

#[test]
fn test_mixed_leaf_types_are_not_structured() {
    let body = metadata_response(json!([null, null, 12.5, "-70.25"])).to_string();

    assert_eq!(
        extract(&body),
        ExtractionAttempt::Failed(ParseFailure {
            structured: StructuredMiss::LeavesNotNumeric,
            fallback: FallbackMiss::NoMatch,
        })
    );
}

#[test]
fn test_short_location_entry_is_a_missing_path() {
    let body = metadata_response(json!([null, null, 12.5])).to_string();

    assert_eq!(
        extract(&body),
        ExtractionAttempt::Failed(ParseFailure {
            structured: StructuredMiss::PathMissing,
            fallback: FallbackMiss::NoMatch,
        })
    );
}

#[test]
fn test_pattern_fallback_on_unstructured_body() {
    let body = r#")]}'
[[null,"pano"],["48.8566,2.3522"],["1.0,2.0"]]"#;

    let attempt = extract(body);

    assert_eq!(
        attempt,
        ExtractionAttempt::Extracted {
            coordinates: CoordinatePair {
                lat: 48.8566,
                lng: 2.3522
            },
            provenance: Provenance::PatternFallback,
        }
    );
}

#[test]
fn test_pattern_fallback_keeps_signs() {
    let attempt = extract("garbage -33.8688,-151.2093 trailing");

    assert_eq!(
        attempt,
        ExtractionAttempt::Extracted {
            coordinates: CoordinatePair {
                lat: -33.8688,
                lng: -151.2093
            },
            provenance: Provenance::PatternFallback,
        }
    );
}

#[test]
fn test_nothing_to_extract() {
    let attempt = extract("not json, 12,34 and 1.5 , 2.5");

    assert_eq!(
        attempt,
        ExtractionAttempt::Failed(ParseFailure {
            structured: StructuredMiss::InvalidJson,
            fallback: FallbackMiss::NoMatch,
        })
    );
    assert_eq!(attempt.provenance(), Provenance::Failed);
}

#[test]
fn test_provenance_tags() {
    assert_eq!(Provenance::Structured.to_string(), "structured");
    assert_eq!(
        Provenance::StructuredStringCoerced.to_string(),
        "structured-string-coerced"
    );
    assert_eq!(Provenance::PatternFallback.to_string(), "pattern-fallback");
    assert_eq!(Provenance::Failed.to_string(), "failed");
}

#[test]
fn test_string_leaves_keep_their_leading_number() {
    let body = metadata_response(json!([null, null, " 12.5deg", "-70.25deg"])).to_string();

    assert_eq!(
        extract(&body),
        ExtractionAttempt::Extracted {
            coordinates: CoordinatePair {
                lat: 12.5,
                lng: -70.25
            },
            provenance: Provenance::StructuredStringCoerced,
        }
    );
}

#[test]
fn test_string_leaves_in_exponent_form() {
    let body = metadata_response(json!([null, null, "1.25e1", "-7e1x"])).to_string();

    assert_eq!(
        extract(&body),
        ExtractionAttempt::Extracted {
            coordinates: CoordinatePair {
                lat: 12.5,
                lng: -70.0
            },
            provenance: Provenance::StructuredStringCoerced,
        }
    );
}

#[test]
fn test_string_leaves_without_a_leading_number() {
    let body = metadata_response(json!([null, null, "deg12.5", "."])).to_string();

    assert_eq!(
        extract(&body),
        ExtractionAttempt::Failed(ParseFailure {
            structured: StructuredMiss::LeavesNotNumeric,
            fallback: FallbackMiss::NoMatch,
        })
    );
}
