//! Flight record model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a flight arrives at or departs from its airport
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FlightDirection {
    Arrival,
    Departure,
    /// Any tag other than "arrival" or "departure" in loaded data.
    ///
    /// The original tag is not kept: this serializes as `"unclassified"`.
    #[serde(other)]
    Unclassified,
}

/// Operational status of a flight
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlightStatus {
    #[serde(rename = "On Time")]
    OnTime,
    Delayed,
    Boarding,
    Scheduled,
    Departed,
}

impl FlightStatus {
    /// Label as shown on the flight board
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::OnTime => "On Time",
            FlightStatus::Delayed => "Delayed",
            FlightStatus::Boarding => "Boarding",
            FlightStatus::Scheduled => "Scheduled",
            FlightStatus::Departed => "Departed",
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled arrival or departure at an airport
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    /// Code of the airport whose board lists this flight
    pub airport: String,
    #[serde(rename = "type")]
    pub direction: FlightDirection,
    pub flight_number: String,
    /// Other end of the route (origin for arrivals, destination for departures)
    pub origin: String,
    /// Local time, "HH:MM"
    pub time: String,
    pub status: FlightStatus,
    pub gate: String,
}
