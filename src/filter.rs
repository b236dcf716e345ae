//! Filter engine
//!
//! Pure functions that derive the visible subset of weather and flight rows
//! from the full data set, the airport scope and a free-text search term.
//! Every function is a stable filter: records keep their relative order.

use crate::models::{FlightDirection, FlightRecord, WeatherObservation};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Wire value of the "every airport" choice
pub const ALL_AIRPORTS: &str = "all";

/// Which airport the data panels are scoped to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AirportScope {
    #[default]
    All,
    Airport(String),
}

impl AirportScope {
    /// Parse a dropdown value; `"all"` means no scoping
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == ALL_AIRPORTS {
            AirportScope::All
        } else {
            AirportScope::Airport(value.to_string())
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            AirportScope::All => ALL_AIRPORTS,
            AirportScope::Airport(code) => code,
        }
    }

    /// Whether a record tagged with `code` is visible under this scope
    #[must_use]
    pub fn includes(&self, code: &str) -> bool {
        match self {
            AirportScope::All => true,
            AirportScope::Airport(selected) => selected == code,
        }
    }
}

impl FromStr for AirportScope {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for AirportScope {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<AirportScope> for String {
    fn from(value: AirportScope) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AirportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record that belongs to one airport by code
pub trait AirportScoped {
    fn airport_code(&self) -> &str;
}

impl AirportScoped for WeatherObservation {
    fn airport_code(&self) -> &str {
        &self.airport
    }
}

impl AirportScoped for FlightRecord {
    fn airport_code(&self) -> &str {
        &self.airport
    }
}

/// A record with named text fields that free-text search can look into
pub trait Searchable {
    type Field: Copy;

    fn field_text(&self, field: Self::Field) -> &str;
}

/// Searchable text fields of a flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightField {
    FlightNumber,
    Origin,
    Status,
    Gate,
    Airport,
}

impl FlightField {
    /// The fields the flight board searches by default
    pub const DEFAULT: [FlightField; 5] = [
        FlightField::FlightNumber,
        FlightField::Origin,
        FlightField::Status,
        FlightField::Gate,
        FlightField::Airport,
    ];
}

impl Searchable for FlightRecord {
    type Field = FlightField;

    fn field_text(&self, field: FlightField) -> &str {
        match field {
            FlightField::FlightNumber => &self.flight_number,
            FlightField::Origin => &self.origin,
            FlightField::Status => self.status.as_str(),
            FlightField::Gate => &self.gate,
            FlightField::Airport => &self.airport,
        }
    }
}

/// Searchable text fields of a weather observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherField {
    Airport,
    Condition,
}

impl WeatherField {
    pub const DEFAULT: [WeatherField; 2] = [WeatherField::Airport, WeatherField::Condition];
}

impl Searchable for WeatherObservation {
    type Field = WeatherField;

    fn field_text(&self, field: WeatherField) -> &str {
        match field {
            WeatherField::Airport => &self.airport,
            WeatherField::Condition => self.condition.as_str(),
        }
    }
}

/// Keep the records that belong to the scoped airport.
///
/// `AirportScope::All` passes every record through. A code that matches no
/// record (including codes absent from the catalog) yields an empty list.
pub fn scope_by_selection<'a, R, I>(records: I, scope: &AirportScope) -> Vec<&'a R>
where
    R: AirportScoped + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records
        .into_iter()
        .filter(|record| scope.includes(record.airport_code()))
        .collect()
}

/// Flights split by direction
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlightPartition<'a> {
    pub arrivals: Vec<&'a FlightRecord>,
    pub departures: Vec<&'a FlightRecord>,
    /// Records tagged with neither direction; shown on neither tab
    pub unclassified: Vec<&'a FlightRecord>,
}

/// Split flights into arrivals and departures, keeping relative order
pub fn partition_flights<'a, I>(records: I) -> FlightPartition<'a>
where
    I: IntoIterator<Item = &'a FlightRecord>,
{
    let mut partition = FlightPartition::default();
    for record in records {
        match record.direction {
            FlightDirection::Arrival => partition.arrivals.push(record),
            FlightDirection::Departure => partition.departures.push(record),
            FlightDirection::Unclassified => partition.unclassified.push(record),
        }
    }

    if !partition.unclassified.is_empty() {
        debug!(
            count = partition.unclassified.len(),
            "Dropped flights with no arrival/departure tag"
        );
    }
    partition
}

/// Case-insensitive substring search over the given fields.
///
/// A record is kept when any field contains `term`. The term is used as-is:
/// surrounding whitespace is part of the needle. An empty term keeps all.
pub fn search_filter<'a, R, I>(records: I, term: &str, fields: &[R::Field]) -> Vec<&'a R>
where
    R: Searchable + 'a,
    I: IntoIterator<Item = &'a R>,
{
    if term.is_empty() {
        return records.into_iter().collect();
    }

    let needle = term.to_lowercase();
    records
        .into_iter()
        .filter(|record| {
            fields
                .iter()
                .any(|&field| record.field_text(field).to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FixtureStore;
    use rstest::rstest;

    fn numbers(flights: &[&FlightRecord]) -> Vec<String> {
        flights.iter().map(|f| f.flight_number.clone()).collect()
    }

    #[test]
    fn test_scope_all_is_identity() {
        let store = FixtureStore::builtin();
        let scoped = scope_by_selection(&store.weather, &AirportScope::All);
        let expected: Vec<&WeatherObservation> = store.weather.iter().collect();
        assert_eq!(scoped, expected);
    }

    #[rstest]
    #[case("JFK", 2)]
    #[case("LAX", 2)]
    #[case("LHR", 1)]
    #[case("ZZZ", 0)]
    fn test_scope_weather_by_code(#[case] code: &str, #[case] expected: usize) {
        let store = FixtureStore::builtin();
        let scoped = scope_by_selection(&store.weather, &AirportScope::parse(code));
        assert_eq!(scoped.len(), expected);
        assert!(scoped.iter().all(|w| w.airport == code));
    }

    #[test]
    fn test_scope_preserves_order() {
        let store = FixtureStore::builtin();
        let scoped = scope_by_selection(&store.weather, &AirportScope::parse("JFK"));
        let times: Vec<&str> = scoped.iter().map(|w| w.time.as_str()).collect();
        assert_eq!(times, vec!["14:30", "02:30"]);
    }

    #[test]
    fn test_partition_jfk() {
        let store = FixtureStore::builtin();
        let scoped = scope_by_selection(&store.flights, &AirportScope::parse("JFK"));
        let partition = partition_flights(scoped);
        assert_eq!(numbers(&partition.arrivals), vec!["AA 123", "DL 456"]);
        assert_eq!(numbers(&partition.departures), vec!["AA 654"]);
        assert!(partition.unclassified.is_empty());
    }

    #[test]
    fn test_partition_is_exhaustive_for_known_tags() {
        let store = FixtureStore::builtin();
        let partition = partition_flights(&store.flights);
        assert_eq!(partition.arrivals.len(), 4);
        assert_eq!(partition.departures.len(), 5);
        assert_eq!(
            partition.arrivals.len() + partition.departures.len(),
            store.flights.len()
        );
    }

    #[test]
    fn test_partition_sets_aside_unclassified() {
        let store = FixtureStore::builtin();
        let mut odd = store.flights[0].clone();
        odd.direction = FlightDirection::Unclassified;
        let flights = vec![odd, store.flights[4].clone()];

        let partition = partition_flights(&flights);
        assert!(partition.arrivals.is_empty());
        assert_eq!(numbers(&partition.departures), vec!["AA 654"]);
        assert_eq!(numbers(&partition.unclassified), vec!["AA 123"]);
    }

    #[test]
    fn test_search_delayed_status() {
        let store = FixtureStore::builtin();
        let found = search_filter(&store.flights, "delayed", &[FlightField::Status]);
        assert_eq!(numbers(&found), vec!["DL 456", "EK 567"]);
    }

    #[test]
    fn test_search_empty_term_is_identity() {
        let store = FixtureStore::builtin();
        let found = search_filter(&store.flights, "", &FlightField::DEFAULT);
        assert_eq!(found, store.flights.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_search_any_field_matches() {
        let store = FixtureStore::builtin();
        // "lhr" is the origin of DL 456 and DL 987 and the board of BA 321 and VS 234
        let found = search_filter(&store.flights, "LhR", &FlightField::DEFAULT);
        assert_eq!(numbers(&found), vec!["DL 456", "BA 321", "DL 987", "VS 234"]);
    }

    #[test]
    fn test_search_by_gate() {
        let store = FixtureStore::builtin();
        let found = search_filter(&store.flights, "t2-15", &FlightField::DEFAULT);
        assert_eq!(numbers(&found), vec!["BA 321"]);
    }

    #[test]
    fn test_search_is_idempotent() {
        let store = FixtureStore::builtin();
        let once = search_filter(&store.flights, "a", &FlightField::DEFAULT);
        let twice = search_filter(once.clone(), "a", &FlightField::DEFAULT);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_search_whitespace_is_literal() {
        let store = FixtureStore::builtin();
        // "On Time" contains a space; "Delayed" and the rest do not
        let found = search_filter(&store.flights, " ", &[FlightField::Status]);
        assert!(found.iter().all(|f| f.status.as_str() == "On Time"));
        assert_eq!(found.len(), 3);

        let found = search_filter(&store.flights, "  ", &[FlightField::Status]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_search_weather_condition() {
        let store = FixtureStore::builtin();
        let found = search_filter(&store.weather, "rain", &WeatherField::DEFAULT);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].airport, "LHR");
    }

    #[test]
    fn test_scope_serde_as_string() {
        let scope: AirportScope = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(scope, AirportScope::All);
        let scope: AirportScope = "NRT".parse().unwrap();
        assert_eq!(serde_json::to_string(&scope).unwrap(), "\"NRT\"");
    }
}
