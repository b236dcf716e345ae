//! View models for the dashboard panels
//!
//! Panels are pure readers of the selection controller. Anything a panel
//! keeps for itself (the active flight tab, the search box text) stays in
//! the panel and never feeds back into the shared selection.

use crate::filter::{self, FlightField, FlightPartition, WeatherField};
use crate::map::{self, MapMarker};
use crate::models::{Airport, FlightRecord, FlightStatus, WeatherCondition, WeatherObservation};
use crate::selection::{SelectionController, SelectionEvent, SelectionState};
use serde::Serialize;

/// Visual emphasis for a status or condition badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Good,
    Caution,
    Alert,
    Info,
    Neutral,
}

impl From<WeatherCondition> for Tone {
    fn from(condition: WeatherCondition) -> Self {
        match condition {
            WeatherCondition::Clear => Tone::Good,
            WeatherCondition::Cloudy => Tone::Caution,
            WeatherCondition::Rainy => Tone::Alert,
        }
    }
}

impl From<FlightStatus> for Tone {
    fn from(status: FlightStatus) -> Self {
        match status {
            FlightStatus::OnTime => Tone::Good,
            FlightStatus::Delayed => Tone::Alert,
            FlightStatus::Boarding => Tone::Caution,
            FlightStatus::Departed => Tone::Info,
            FlightStatus::Scheduled => Tone::Neutral,
        }
    }
}

/// One entry of the airport dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

/// The airport dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AirportFilterView {
    /// Currently chosen value, mirrors the selection
    pub value: String,
    pub options: Vec<FilterOption>,
}

impl AirportFilterView {
    #[must_use]
    pub fn build(airports: &[Airport], selection: &SelectionState) -> Self {
        let mut options = vec![FilterOption {
            value: filter::ALL_AIRPORTS.to_string(),
            label: "All Airports".to_string(),
        }];
        options.extend(airports.iter().map(|airport| FilterOption {
            value: airport.code.clone(),
            label: format!("{} - {}", airport.code, airport.city),
        }));

        Self {
            value: selection.selected_airport_code().to_string(),
            options,
        }
    }

    /// The event emitted when the user picks an option
    #[must_use]
    pub fn change(value: &str) -> SelectionEvent {
        SelectionEvent::FilterChanged(value.to_string())
    }
}

/// A row of the weather panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherRow {
    pub observation: WeatherObservation,
    pub tone: Tone,
}

/// Weather panel with its local search box
#[derive(Debug, Clone, Default)]
pub struct WeatherPanel {
    pub search: String,
}

impl WeatherPanel {
    #[must_use]
    pub fn rows(&self, controller: &SelectionController) -> Vec<WeatherRow> {
        let scoped = controller.scoped_weather();
        filter::search_filter(scoped, &self.search, &WeatherField::DEFAULT)
            .into_iter()
            .map(|observation| WeatherRow {
                observation: observation.clone(),
                tone: observation.condition.into(),
            })
            .collect()
    }
}

/// Which half of the flight board is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FlightTab {
    #[default]
    Arrivals,
    Departures,
}

/// A row of the flight board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightRow {
    pub flight: FlightRecord,
    pub tone: Tone,
    pub gate_label: String,
}

impl From<&FlightRecord> for FlightRow {
    fn from(flight: &FlightRecord) -> Self {
        Self {
            flight: flight.clone(),
            tone: flight.status.into(),
            gate_label: format!("Gate {}", flight.gate),
        }
    }
}

/// Flight board with its local tab and search box
#[derive(Debug, Clone, Default)]
pub struct FlightPanel {
    pub tab: FlightTab,
    pub search: String,
}

impl FlightPanel {
    /// Scoped and searched flights, split by direction
    #[must_use]
    pub fn partition<'a>(&self, controller: &'a SelectionController) -> FlightPartition<'a> {
        let scoped = controller.scoped_flights();
        let found = filter::search_filter(scoped, &self.search, &FlightField::DEFAULT);
        filter::partition_flights(found)
    }

    /// Rows for the active tab
    #[must_use]
    pub fn rows(&self, controller: &SelectionController) -> Vec<FlightRow> {
        let partition = self.partition(controller);
        let flights = match self.tab {
            FlightTab::Arrivals => partition.arrivals,
            FlightTab::Departures => partition.departures,
        };
        flights.into_iter().map(FlightRow::from).collect()
    }
}

/// Weather readings shown on the selected-airport card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherReadings {
    pub temperature: String,
    pub wind: String,
    pub humidity: String,
    pub visibility: String,
    pub cloud_cover: String,
    pub condition: String,
}

impl From<&WeatherObservation> for WeatherReadings {
    fn from(observation: &WeatherObservation) -> Self {
        Self {
            temperature: observation.format_temperature(),
            wind: observation.format_wind(),
            humidity: observation.format_humidity(),
            visibility: observation.format_visibility(),
            cloud_cover: observation.format_cloud_cover(),
            condition: observation.condition.to_string(),
        }
    }
}

/// Floating card describing the selected airport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedAirportCard {
    pub name: String,
    pub location: String,
    pub code_label: String,
    pub weather: Option<WeatherReadings>,
}

impl SelectedAirportCard {
    /// Build the card, or `None` while nothing is selected
    #[must_use]
    pub fn build(controller: &SelectionController) -> Option<Self> {
        let airport = controller.state().selected_marker()?;
        Some(Self {
            name: airport.name.clone(),
            location: airport.format_location(),
            code_label: format!("Code: {}", airport.code),
            weather: controller.current_weather_summary().map(WeatherReadings::from),
        })
    }
}

/// Everything the dashboard shows for one committed selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub selection: SelectionState,
    pub active_airports: usize,
    pub filter: AirportFilterView,
    pub markers: Vec<MapMarker>,
    pub weather: Vec<WeatherRow>,
    pub arrivals: Vec<FlightRow>,
    pub departures: Vec<FlightRow>,
    pub card: Option<SelectedAirportCard>,
}

impl DashboardSnapshot {
    /// Derive every panel from the controller's current state
    #[must_use]
    pub fn derive(
        controller: &SelectionController,
        weather_panel: &WeatherPanel,
        flight_panel: &FlightPanel,
    ) -> Self {
        let airports = controller.store().airports.airports();
        let selection = controller.state();
        let partition = flight_panel.partition(controller);

        Self {
            selection: selection.clone(),
            active_airports: airports.len(),
            filter: AirportFilterView::build(airports, selection),
            markers: map::build_markers(airports, selection),
            weather: weather_panel.rows(controller),
            arrivals: partition.arrivals.into_iter().map(FlightRow::from).collect(),
            departures: partition.departures.into_iter().map(FlightRow::from).collect(),
            card: SelectedAirportCard::build(controller),
        }
    }
}
