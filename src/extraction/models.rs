use crate::coords::CoordinatePair;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which stage of the extraction produced (or failed to produce) a coordinate pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    Structured,
    StructuredStringCoerced,
    PatternFallback,
    Failed,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Structured => "structured",
            Provenance::StructuredStringCoerced => "structured-string-coerced",
            Provenance::PatternFallback => "pattern-fallback",
            Provenance::Failed => "failed",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq)]
pub enum ExtractionAttempt {
    Extracted {
        coordinates: CoordinatePair,
        provenance: Provenance,
    },
    Failed(ParseFailure),
}

impl ExtractionAttempt {
    pub fn provenance(&self) -> Provenance {
        match self {
            ExtractionAttempt::Extracted { provenance, .. } => *provenance,
            ExtractionAttempt::Failed(_) => Provenance::Failed,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("no coordinates in metadata response (structured: {structured}, fallback: {fallback})")]
pub struct ParseFailure {
    pub structured: StructuredMiss,
    pub fallback: FallbackMiss,
}

#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum StructuredMiss {
    #[error("body is not JSON")]
    InvalidJson,
    #[error("location path is missing or too short")]
    PathMissing,
    #[error("location leaves are not numeric")]
    LeavesNotNumeric,
}

#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum FallbackMiss {
    #[error("no coordinate-like pattern in body")]
    NoMatch,
    #[error("matched pattern does not parse as two finite numbers")]
    UnparsableMatch,
}
