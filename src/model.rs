//! Core data model for flight lookups.
//!
//! A [`FlightQuery`] goes in, a [`FlightQueryResult`] comes back. Nothing here
//! outlives a single invocation.

/// A validated flight designator, ready to be looked up.
///
/// Only constructed by [`crate::query::parse_flight_query`], so holding one
/// means the designator already matched the ICAO shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightQuery {
    designator: String,
}

impl FlightQuery {
    pub(crate) fn new(designator: String) -> Self {
        Self { designator }
    }

    /// The designator exactly as the caller supplied it.
    pub fn designator(&self) -> &str {
        &self.designator
    }
}

/// One scheduled flight as reported by the flight-data service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightRecord {
    /// Flight date as reported upstream (e.g. `2023-01-01`).
    pub date: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub airline_name: String,
}

/// Flights matching a query, in the order the service returned them.
///
/// Empty is a valid outcome: the lookup succeeded and nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightQueryResult {
    flights: Vec<FlightRecord>,
}

impl FlightQueryResult {
    pub fn new(flights: Vec<FlightRecord>) -> Self {
        Self { flights }
    }

    /// The first match, which is the only one the summary reports.
    pub fn first(&self) -> Option<&FlightRecord> {
        self.flights.first()
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }
}
