//! Output formatting for CLI display.

use crate::model::{FlightQuery, FlightRecord};

/// One-line summary of a flight, keyed by the designator the user asked for.
pub(super) fn format_summary(query: &FlightQuery, flight: &FlightRecord) -> String {
    format!(
        "Flight {} from {} to {} operated by {} on {}",
        query.designator(),
        flight.departure_airport,
        flight.arrival_airport,
        flight.airline_name,
        flight.date,
    )
}
