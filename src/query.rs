//! Request validation: turn the raw JSON argument into a [`FlightQuery`].
//!
//! The payload is a single object, `{"icao": "<designator>"}`. A designator is
//! 2 to 4 ASCII letters (either case) followed by 1 to 4 ASCII digits, with
//! nothing before or after.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::model::FlightQuery;

/// Key of the designator field. Matched case-insensitively, exact spelling first.
const ICAO_KEY: &str = "icao";

/// 2-4 ASCII letters then 1-4 ASCII digits, anchored at both ends.
static ICAO_DESIGNATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2,4}[0-9]{1,4}$").expect("designator pattern compiles")
});

/// Errors produced while validating the input payload.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("unable to parse JSON: {0}")]
    MalformedInput(#[from] serde_json::Error),

    #[error(
        "invalid ICAO format: ICAO should consist of 2 to 4 letters \
         followed by 1 to 4 numbers. Your input was: {0}"
    )]
    InvalidDesignator(String),
}

/// Parse and validate the input payload.
///
/// A top-level `null`, a missing `icao` field or a `null` one is treated as
/// the empty string, which never validates. The designator is kept exactly as
/// given, case included.
pub fn parse_flight_query(input: &str) -> Result<FlightQuery, QueryError> {
    let request: Option<Map<String, Value>> = serde_json::from_str(input)?;

    let designator = match request.as_ref().and_then(icao_field) {
        Some(value) => Option::<String>::deserialize(value)?.unwrap_or_default(),
        None => String::new(),
    };

    if !ICAO_DESIGNATOR.is_match(&designator) {
        return Err(QueryError::InvalidDesignator(designator));
    }

    Ok(FlightQuery::new(designator))
}

/// The `icao` field, or failing that the first key equal to it ignoring case.
fn icao_field(fields: &Map<String, Value>) -> Option<&Value> {
    fields.get(ICAO_KEY).or_else(|| {
        fields
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(ICAO_KEY))
            .map(|(_, value)| value)
    })
}
