//! Address-variation sequence for structured queries.
//!
//! Structured input expands into an ordered list of candidate query
//! strings, most specific first, ending with the bare ZIP. Duplicates
//! (common when some fields are empty) are collapsed by exact string
//! equality, first occurrence surviving, before the client iterates.

use once_cell::sync::Lazy;
use regex::Regex;

/// Region token appended to every field-combination variation.
pub const REGION: &str = "Minnesota";

/// Unit/apartment/suite designators stripped from the street line before
/// the first variation is built. Geocoders rarely know unit numbers and
/// they poison otherwise-resolvable addresses.
static UNIT_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[,\s]+(?:apt|apartment|unit|suite|ste|bldg|building|#)\.?\s*#?\s*[\w-]+")
        .expect("unit token pattern")
});

/// Structured address fields as entered by the user. Any field may be
/// empty; at least one must be non-empty for a search to make sense.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructuredQuery {
    pub street: String,
    pub city: String,
    pub zip: String,
}

impl StructuredQuery {
    pub fn is_empty(&self) -> bool {
        self.street.trim().is_empty() && self.city.trim().is_empty() && self.zip.trim().is_empty()
    }
}

pub fn strip_unit_tokens(street: &str) -> String {
    UNIT_TOKEN.replace_all(street, "").trim().to_string()
}

/// The ordered, deduplicated variation sequence for `query`.
///
/// 1. cleaned street + city + region + zip
/// 2. cleaned street + region + zip
/// 3. city + region + zip
/// 4. city + region
/// 5. zip alone
///
/// Only non-empty fields participate; the region token is always included
/// in the combination variations. Empty candidates are dropped.
pub fn variations(query: &StructuredQuery) -> Vec<String> {
    let street = strip_unit_tokens(query.street.trim());
    let city = query.city.trim();
    let zip = query.zip.trim();

    let candidates = [
        join(&[street.as_str(), city, REGION, zip]),
        join(&[street.as_str(), REGION, zip]),
        join(&[city, REGION, zip]),
        join(&[city, REGION]),
        zip.to_string(),
    ];

    let mut sequence: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !candidate.is_empty() && !sequence.contains(&candidate) {
            sequence.push(candidate);
        }
    }
    sequence
}

fn join(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}
