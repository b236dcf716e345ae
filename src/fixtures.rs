//! Fixture store: the immutable airport catalog plus weather and flight rows
//!
//! The built-in fixtures mirror the mock data the dashboard ships with. A
//! store can also be loaded from a JSON document of the same shape.

use crate::models::{
    Airport, FlightDirection, FlightRecord, FlightStatus, WeatherCondition, WeatherObservation,
};
use crate::{DashboardError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Ordered airport catalog with unique, validated codes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AirportCatalog {
    airports: Vec<Airport>,
}

impl AirportCatalog {
    /// Build a catalog, rejecting malformed or duplicate codes
    pub fn new(airports: Vec<Airport>) -> Result<Self> {
        let mut seen = HashSet::new();
        for airport in &airports {
            Airport::validate_code(&airport.code)?;
            if !seen.insert(airport.code.as_str()) {
                return Err(DashboardError::validation(format!(
                    "duplicate airport code '{}'",
                    airport.code
                )));
            }
        }
        Ok(Self { airports })
    }

    /// Look up an airport by its exact code
    #[must_use]
    pub fn find(&self, code: &str) -> Option<&Airport> {
        self.airports.iter().find(|airport| airport.code == code)
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.find(code).is_some()
    }

    #[must_use]
    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.airports.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

impl<'de> Deserialize<'de> for AirportCatalog {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let airports = Vec::<Airport>::deserialize(deserializer)?;
        AirportCatalog::new(airports).map_err(serde::de::Error::custom)
    }
}

/// All dashboard data, fixed for the lifetime of the process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureStore {
    pub airports: AirportCatalog,
    pub weather: Vec<WeatherObservation>,
    pub flights: Vec<FlightRecord>,
}

impl FixtureStore {
    /// The mock data set bundled with the dashboard
    #[must_use]
    pub fn builtin() -> Self {
        let airports = vec![
            Airport::new("JFK", "John F. Kennedy International Airport", "New York", "USA"),
            Airport::new("LAX", "Los Angeles International Airport", "Los Angeles", "USA"),
            Airport::new("LHR", "London Heathrow Airport", "London", "UK"),
            Airport::new("DXB", "Dubai International Airport", "Dubai", "UAE"),
            Airport::new("NRT", "Narita International Airport", "Tokyo", "Japan"),
        ];

        use WeatherCondition::{Clear, Cloudy, Rainy};
        let weather = vec![
            observation("JFK", 22.0, Clear, 15.0, 65, 10.0, 15, "14:30"),
            observation("LAX", 28.0, Cloudy, 8.0, 72, 8.0, 75, "11:30"),
            observation("LHR", 16.0, Rainy, 22.0, 85, 5.0, 95, "19:30"),
            observation("DXB", 35.0, Clear, 12.0, 45, 15.0, 10, "22:30"),
            observation("NRT", 18.0, Cloudy, 18.0, 78, 7.0, 60, "03:30"),
            // past 12 hours
            observation("JFK", 20.0, Clear, 12.0, 62, 10.0, 20, "02:30"),
            observation("LAX", 25.0, Clear, 6.0, 68, 10.0, 25, "23:30"),
        ];

        use FlightDirection::{Arrival, Departure};
        use FlightStatus::{Boarding, Delayed, OnTime, Scheduled};
        let flights = vec![
            flight("JFK", Arrival, "AA 123", "LAX", "18:45", OnTime, "A12"),
            flight("JFK", Arrival, "DL 456", "LHR", "19:20", Delayed, "B5"),
            flight("LAX", Arrival, "UA 789", "NRT", "16:15", OnTime, "C8"),
            flight("LHR", Arrival, "BA 321", "DXB", "22:10", Scheduled, "T2-15"),
            flight("JFK", Departure, "AA 654", "DXB", "20:30", Boarding, "A8"),
            flight("LAX", Departure, "DL 987", "LHR", "17:45", OnTime, "B12"),
            flight("LHR", Departure, "VS 234", "JFK", "23:55", Scheduled, "T3-22"),
            flight("DXB", Departure, "EK 567", "NRT", "02:40", Delayed, "C18"),
            flight("NRT", Departure, "JL 890", "LAX", "11:25", Scheduled, "D7"),
        ];

        Self {
            airports: AirportCatalog { airports },
            weather,
            flights,
        }
    }

    /// Parse a store from a JSON document `{airports, weather, flights}`
    pub fn from_json(json: &str) -> Result<Self> {
        let store: FixtureStore = serde_json::from_str(json)
            .map_err(|e| DashboardError::validation(format!("fixture document: {e}")))?;
        debug!(
            airports = store.airports.len(),
            weather = store.weather.len(),
            flights = store.flights.len(),
            "Parsed fixture document"
        );
        Ok(store)
    }

    /// Load a store from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture file: {}", path.display()))?;
        let store = Self::from_json(&contents)
            .with_context(|| format!("Failed to parse fixture file: {}", path.display()))?;
        info!("Loaded fixtures from {}", path.display());
        Ok(store)
    }
}

#[allow(clippy::too_many_arguments)]
fn observation(
    airport: &str,
    temperature: f32,
    condition: WeatherCondition,
    wind_speed: f32,
    humidity: u8,
    visibility: f32,
    cloud_cover: u8,
    time: &str,
) -> WeatherObservation {
    WeatherObservation {
        airport: airport.to_string(),
        temperature,
        condition,
        wind_speed,
        humidity,
        visibility,
        cloud_cover,
        time: time.to_string(),
    }
}

fn flight(
    airport: &str,
    direction: FlightDirection,
    flight_number: &str,
    origin: &str,
    time: &str,
    status: FlightStatus,
    gate: &str,
) -> FlightRecord {
    FlightRecord {
        airport: airport.to_string(),
        direction,
        flight_number: flight_number.to_string(),
        origin: origin.to_string(),
        time: time.to_string(),
        status,
        gate: gate.to_string(),
    }
}
