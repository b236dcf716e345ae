//! Map collaborator contract
//!
//! The map surface only consumes markers and reports clicks back as
//! [`SelectionEvent::MarkerSelected`]. Marker positions come from a static
//! code lookup expressed as percentages of the map viewport.

use crate::models::Airport;
use crate::selection::{SelectionEvent, SelectionState};
use serde::{Deserialize, Serialize};

/// Marker position as percentages from the top-left corner of the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPosition {
    pub top_pct: f32,
    pub left_pct: f32,
}

impl MapPosition {
    pub const ORIGIN: MapPosition = MapPosition {
        top_pct: 0.0,
        left_pct: 0.0,
    };
}

/// How a marker's position was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Found in the static position table
    Known,
    /// Code not in the table; drawn at the origin and styled as such
    Fallback,
}

const KNOWN_POSITIONS: [(&str, MapPosition); 5] = [
    ("JFK", MapPosition { top_pct: 20.0, left_pct: 25.0 }),
    ("LAX", MapPosition { top_pct: 35.0, left_pct: 15.0 }),
    ("LHR", MapPosition { top_pct: 45.0, left_pct: 70.0 }),
    ("DXB", MapPosition { top_pct: 60.0, left_pct: 40.0 }),
    ("NRT", MapPosition { top_pct: 25.0, left_pct: 60.0 }),
];

/// Look up where an airport is drawn on the map
#[must_use]
pub fn position_for(code: &str) -> (MapPosition, Placement) {
    KNOWN_POSITIONS
        .iter()
        .find(|(known, _)| *known == code)
        .map_or((MapPosition::ORIGIN, Placement::Fallback), |(_, position)| {
            (*position, Placement::Known)
        })
}

/// Everything the map needs to draw one airport
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub airport: Airport,
    pub position: MapPosition,
    pub placement: Placement,
    /// This marker is the selected airport
    pub selected: bool,
    /// Drawn at full opacity; markers outside the scope are dimmed
    pub in_scope: bool,
}

impl MapMarker {
    /// The event to emit when this marker is clicked
    #[must_use]
    pub fn click(&self) -> SelectionEvent {
        SelectionEvent::MarkerSelected(self.airport.clone())
    }
}

/// Build one marker per airport for the given selection
#[must_use]
pub fn build_markers(airports: &[Airport], selection: &SelectionState) -> Vec<MapMarker> {
    let scope = selection.scope();
    let selected_code = selection.selected_marker().map(|airport| airport.code.as_str());

    airports
        .iter()
        .map(|airport| {
            let (position, placement) = position_for(&airport.code);
            MapMarker {
                airport: airport.clone(),
                position,
                placement,
                selected: selected_code == Some(airport.code.as_str()),
                in_scope: scope.includes(&airport.code),
            }
        })
        .collect()
}

/// A rendering surface for airport markers, such as a web map widget
pub trait MapSurface {
    fn render(&mut self, markers: &[MapMarker], selection: &SelectionState);
}
