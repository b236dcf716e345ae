//! Selection controller
//!
//! Owns the single "which airport is selected" cursor shared by the map,
//! the airport dropdown and the derived weather summary. Every transition
//! either commits a complete new state or leaves the old one untouched, and
//! subscribers are only notified after a commit.

use crate::filter::{self, AirportScope};
use crate::fixtures::FixtureStore;
use crate::models::{Airport, FlightRecord, WeatherObservation};
use crate::{DashboardError, Result};
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// The selection cursor.
///
/// The selected code and the selected marker are one value, so they can
/// never disagree.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected(Airport),
}

impl SelectionState {
    /// The dropdown value: the selected code, or `"all"`
    #[must_use]
    pub fn selected_airport_code(&self) -> &str {
        match self {
            SelectionState::Unselected => filter::ALL_AIRPORTS,
            SelectionState::Selected(airport) => &airport.code,
        }
    }

    /// The airport highlighted on the map, if any
    #[must_use]
    pub fn selected_marker(&self) -> Option<&Airport> {
        match self {
            SelectionState::Unselected => None,
            SelectionState::Selected(airport) => Some(airport),
        }
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        matches!(self, SelectionState::Selected(_))
    }

    /// The scope the data panels are filtered by
    #[must_use]
    pub fn scope(&self) -> AirportScope {
        match self {
            SelectionState::Unselected => AirportScope::All,
            SelectionState::Selected(airport) => AirportScope::Airport(airport.code.clone()),
        }
    }
}

/// A selection request coming from one of the panels
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// A marker was clicked on the map
    MarkerSelected(Airport),
    /// The airport dropdown changed; `"all"` clears the selection
    FilterChanged(String),
    /// A row in one of the lists asked to focus its airport
    ListSelected(String),
}

/// Single owner of the selection cursor
#[derive(Debug)]
pub struct SelectionController {
    store: Arc<FixtureStore>,
    state: SelectionState,
    notifier: watch::Sender<SelectionState>,
}

impl SelectionController {
    /// Create a controller in the `Unselected` state
    #[must_use]
    pub fn new(store: Arc<FixtureStore>) -> Self {
        let (notifier, _) = watch::channel(SelectionState::Unselected);
        Self {
            store,
            state: SelectionState::Unselected,
            notifier,
        }
    }

    #[must_use]
    pub fn store(&self) -> &FixtureStore {
        &self.store
    }

    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Receive every committed selection state from now on
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SelectionState> {
        self.notifier.subscribe()
    }

    /// Select an airport by code, or clear the selection with `"all"`.
    ///
    /// An unknown code is rejected and the current state is kept.
    #[instrument(skip(self))]
    pub fn select_airport_by_code(&mut self, code: &str) -> Result<&SelectionState> {
        let next = match AirportScope::parse(code) {
            AirportScope::All => SelectionState::Unselected,
            AirportScope::Airport(code) => match self.store.airports.find(&code) {
                Some(airport) => SelectionState::Selected(airport.clone()),
                None => {
                    warn!(code = %code, "Rejected selection of unknown airport");
                    return Err(DashboardError::unknown_airport(code));
                }
            },
        };

        self.commit(next);
        Ok(&self.state)
    }

    /// Select the airport behind a clicked map marker
    pub fn select_airport_by_marker(&mut self, airport: &Airport) -> Result<&SelectionState> {
        self.select_airport_by_code(&airport.code)
    }

    /// Route a panel event to the matching transition
    pub fn dispatch(&mut self, event: SelectionEvent) -> Result<&SelectionState> {
        debug!(?event, "Dispatching selection event");
        match event {
            SelectionEvent::MarkerSelected(airport) => self.select_airport_by_marker(&airport),
            SelectionEvent::FilterChanged(code) | SelectionEvent::ListSelected(code) => {
                self.select_airport_by_code(&code)
            }
        }
    }

    /// The observation summarising the selected airport's weather.
    ///
    /// This is the first matching row in fixture order, or `None` when
    /// nothing is selected or the airport has no observations.
    #[must_use]
    pub fn current_weather_summary(&self) -> Option<&WeatherObservation> {
        let airport = self.state.selected_marker()?;
        self.store
            .weather
            .iter()
            .find(|observation| observation.airport == airport.code)
    }

    /// Weather rows visible under the current selection
    #[must_use]
    pub fn scoped_weather(&self) -> Vec<&WeatherObservation> {
        filter::scope_by_selection(&self.store.weather, &self.state.scope())
    }

    /// Flight rows visible under the current selection
    #[must_use]
    pub fn scoped_flights(&self) -> Vec<&FlightRecord> {
        filter::scope_by_selection(&self.store.flights, &self.state.scope())
    }

    fn commit(&mut self, next: SelectionState) {
        if next != self.state {
            info!(
                from = self.state.selected_airport_code(),
                to = next.selected_airport_code(),
                "Selection changed"
            );
        }
        self.state = next;
        self.notifier.send_replace(self.state.clone());
    }
}

/// A controller shared between tasks.
///
/// The mutex makes the controller the one serialization point for
/// selection changes, so readers never observe a half-applied transition.
#[derive(Debug, Clone)]
pub struct SharedSelection {
    inner: Arc<Mutex<SelectionController>>,
}

impl SharedSelection {
    #[must_use]
    pub fn new(controller: SelectionController) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    pub fn select_airport_by_code(&self, code: &str) -> Result<SelectionState> {
        let mut controller = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        controller.select_airport_by_code(code).cloned()
    }

    pub fn dispatch(&self, event: SelectionEvent) -> Result<SelectionState> {
        let mut controller = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        controller.dispatch(event).cloned()
    }

    #[must_use]
    pub fn state(&self) -> SelectionState {
        self.with(|controller| controller.state().clone())
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SelectionState> {
        self.with(SelectionController::subscribe)
    }

    /// Run a read-only derivation against a consistent controller state
    pub fn with<T>(&self, f: impl FnOnce(&SelectionController) -> T) -> T {
        let controller = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&controller)
    }
}
