//! Flight lookup against the Aviation Stack flights endpoint.
//!
//! One GET per lookup. The response envelope is decoded leniently: absent or
//! `null` fields become empty strings, an absent `data` list becomes an empty
//! result. An empty result is not an error here.

pub mod transport;

use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, info};

use crate::model::{FlightQuery, FlightQueryResult, FlightRecord};

pub use transport::{HttpTransport, Transport, TransportError};

/// Endpoint used when the config file does not override it.
pub const DEFAULT_BASE_URL: &str = "http://api.aviationstack.com/v1/flights";

/// Errors that can occur while fetching flight data.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("failed to fetch flight data: {0}")]
    Transport(#[source] TransportError),

    #[error("error from Aviation Stack ({status}): {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("failed to decode flight data: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Looks up flights by designator through an injected [`Transport`].
pub struct FlightLookup<'a> {
    base_url: Url,
    transport: &'a dyn Transport,
}

impl<'a> FlightLookup<'a> {
    pub fn new(base_url: Url, transport: &'a dyn Transport) -> Self {
        Self {
            base_url,
            transport,
        }
    }

    /// Fetch every flight the service reports for `query`.
    pub fn fetch(
        &self,
        query: &FlightQuery,
        api_key: &str,
    ) -> Result<FlightQueryResult, LookupError> {
        let url = self.request_url(query, api_key);

        // The full URL carries the key; log the endpoint only.
        debug!(
            endpoint = %self.base_url,
            designator = query.designator(),
            "requesting flight data"
        );

        let response = self.transport.get(&url).map_err(LookupError::Transport)?;
        debug!(status = %response.status, "received flight data response");

        if response.status != StatusCode::OK {
            return Err(LookupError::Upstream {
                status: response.status,
                body: response.body,
            });
        }

        let envelope: FlightEnvelope =
            serde_json::from_str(&response.body).map_err(LookupError::Decode)?;

        let flights: Vec<FlightRecord> = envelope
            .data
            .unwrap_or_default()
            .into_iter()
            .map(FlightRecord::from)
            .collect();
        info!(
            designator = query.designator(),
            count = flights.len(),
            "decoded flights"
        );

        Ok(FlightQueryResult::new(flights))
    }

    /// `<base>?access_key=<key>&flight_icao=<designator>`, form-urlencoded.
    fn request_url(&self, query: &FlightQuery, api_key: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("access_key", api_key)
            .append_pair("flight_icao", query.designator());
        url
    }
}

// ── Wire format ──

/// JSON envelope returned by the flights endpoint.
#[derive(Deserialize)]
struct FlightEnvelope {
    #[serde(default)]
    data: Option<Vec<WireFlight>>,
}

#[derive(Deserialize)]
struct WireFlight {
    flight_date: Option<String>,
    departure: Option<WireAirport>,
    arrival: Option<WireAirport>,
    airline: Option<WireAirline>,
}

#[derive(Deserialize)]
struct WireAirport {
    airport: Option<String>,
}

#[derive(Deserialize)]
struct WireAirline {
    name: Option<String>,
}

impl From<WireFlight> for FlightRecord {
    fn from(flight: WireFlight) -> Self {
        Self {
            date: flight.flight_date.unwrap_or_default(),
            departure_airport: flight
                .departure
                .and_then(|d| d.airport)
                .unwrap_or_default(),
            arrival_airport: flight.arrival.and_then(|a| a.airport).unwrap_or_default(),
            airline_name: flight.airline.and_then(|a| a.name).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::transport::testing::{Canned, Unreachable};
    use super::*;

    fn query() -> FlightQuery {
        FlightQuery::new("AB1234".into())
    }

    fn base_url() -> Url {
        Url::parse(DEFAULT_BASE_URL).unwrap()
    }

    #[test]
    fn empty_data_is_empty_result() {
        let transport = Canned::ok(r#"{"data":[]}"#);
        let lookup = FlightLookup::new(base_url(), &transport);

        let result = lookup.fetch(&query(), "fakeAPIKey").unwrap();
        assert_eq!(result.len(), 0);
    }

    #[test]
    fn missing_data_is_empty_result() {
        let transport = Canned::ok(r#"{"pagination":{"total":0}}"#);
        let lookup = FlightLookup::new(base_url(), &transport);

        assert_eq!(lookup.fetch(&query(), "fakeAPIKey").unwrap().len(), 0);
    }

    #[test]
    fn upstream_error_passes_body_through() {
        let transport = Canned::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
        let lookup = FlightLookup::new(base_url(), &transport);

        let err = lookup.fetch(&query(), "fakeAPIKey").unwrap_err();
        assert!(
            matches!(&err, LookupError::Upstream { status, body }
                if *status == StatusCode::INTERNAL_SERVER_ERROR && body == "Internal Server Error")
        );
        assert!(err.to_string().ends_with(": Internal Server Error"));
    }

    #[test]
    fn non_200_success_status_is_upstream_error() {
        let transport = Canned::new(StatusCode::NO_CONTENT, "");
        let lookup = FlightLookup::new(base_url(), &transport);

        let err = lookup.fetch(&query(), "fakeAPIKey").unwrap_err();
        assert!(matches!(err, LookupError::Upstream { .. }));
    }

    #[test]
    fn transport_failure_carries_cause() {
        let transport = Unreachable("mock error");
        let lookup = FlightLookup::new(base_url(), &transport);

        let err = lookup.fetch(&query(), "fakeAPIKey").unwrap_err();
        assert!(matches!(err, LookupError::Transport(_)));
        assert_eq!(err.to_string(), "failed to fetch flight data: mock error");
    }

    #[test]
    fn unparsable_body_is_decode_failure() {
        let transport = Canned::ok("<html>maintenance</html>");
        let lookup = FlightLookup::new(base_url(), &transport);

        let err = lookup.fetch(&query(), "fakeAPIKey").unwrap_err();
        assert!(matches!(err, LookupError::Decode(_)));
    }

    #[test]
    fn wrongly_shaped_data_is_decode_failure() {
        let transport = Canned::ok(r#"{"data":"nope"}"#);
        let lookup = FlightLookup::new(base_url(), &transport);

        let err = lookup.fetch(&query(), "fakeAPIKey").unwrap_err();
        assert!(matches!(err, LookupError::Decode(_)));
    }

    #[test]
    fn decodes_records_in_order() {
        let body = r#"{"data":[
            {"flight_date":"2023-01-01","departure":{"airport":"LHR"},
             "arrival":{"airport":"JFK"},"airline":{"name":"British Airways"}},
            {"flight_date":"2023-01-02","departure":{"airport":"LHR"},
             "arrival":{"airport":"JFK"},"airline":{"name":"British Airways"}}
        ]}"#;
        let transport = Canned::ok(body);
        let lookup = FlightLookup::new(base_url(), &transport);

        let result = lookup.fetch(&query(), "fakeAPIKey").unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(
            result.first(),
            Some(&FlightRecord {
                date: "2023-01-01".into(),
                departure_airport: "LHR".into(),
                arrival_airport: "JFK".into(),
                airline_name: "British Airways".into(),
            })
        );
    }

    #[test]
    fn null_and_missing_fields_decode_as_empty() {
        let body = r#"{"data":[{"flight_date":null,"departure":{"airport":null},"airline":null}]}"#;
        let transport = Canned::ok(body);
        let lookup = FlightLookup::new(base_url(), &transport);

        let result = lookup.fetch(&query(), "fakeAPIKey").unwrap();
        assert_eq!(result.first(), Some(&FlightRecord::default()));
    }

    #[test]
    fn request_carries_key_and_designator() {
        let transport = Canned::ok(r#"{"data":[]}"#);
        let lookup = FlightLookup::new(base_url(), &transport);

        lookup.fetch(&query(), "fakeAPIKey").unwrap();

        let requests = transport.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].as_str(),
            "http://api.aviationstack.com/v1/flights?access_key=fakeAPIKey&flight_icao=AB1234"
        );
    }

    #[test]
    fn query_values_are_encoded() {
        let transport = Canned::ok(r#"{"data":[]}"#);
        let lookup = FlightLookup::new(base_url(), &transport);

        lookup.fetch(&query(), "key&with=specials").unwrap();

        let requests = transport.requests.borrow();
        let pairs: Vec<(String, String)> = requests[0]
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            [
                ("access_key".to_string(), "key&with=specials".to_string()),
                ("flight_icao".to_string(), "AB1234".to_string()),
            ]
        );
    }
}
