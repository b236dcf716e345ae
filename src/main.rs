use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use aviation_dashboard::map::{self, MapMarker, MapSurface, Placement};
use aviation_dashboard::view::{FlightPanel, FlightTab, WeatherPanel};
use aviation_dashboard::{
    AdvisoryDesk, DashboardConfig, DashboardSnapshot, FixtureStore, SelectionController,
    SelectionEvent, SelectionState, SimulatedAdvisoryService, logging,
};
use tracing::{info, warn};

/// Prints markers to stdout in place of a web map widget
struct ConsoleMap;

impl MapSurface for ConsoleMap {
    fn render(&mut self, markers: &[MapMarker], selection: &SelectionState) {
        println!("Map ({}):", selection.selected_airport_code());
        for marker in markers {
            let flag = match (marker.selected, marker.in_scope) {
                (true, _) => "*",
                (false, true) => "o",
                (false, false) => ".",
            };
            let fallback = if marker.placement == Placement::Fallback {
                " [unplaced]"
            } else {
                ""
            };
            println!(
                "  {flag} {} at {:.0}%/{:.0}%{fallback}",
                marker.airport.code, marker.position.top_pct, marker.position.left_pct
            );
        }
    }
}

fn show(controller: &SelectionController, surface: &mut impl MapSurface) {
    let flight_panel = FlightPanel {
        tab: FlightTab::Arrivals,
        search: String::new(),
    };
    let snapshot = DashboardSnapshot::derive(controller, &WeatherPanel::default(), &flight_panel);

    surface.render(&snapshot.markers, &snapshot.selection);
    println!(
        "Weather rows: {}  Arrivals: {}  Departures: {}",
        snapshot.weather.len(),
        snapshot.arrivals.len(),
        snapshot.departures.len()
    );
    if let Some(card) = snapshot.card {
        println!("{} ({}) {}", card.name, card.location, card.code_label);
        if let Some(weather) = card.weather {
            println!(
                "  {} {} {} {} {} {}",
                weather.temperature,
                weather.wind,
                weather.humidity,
                weather.visibility,
                weather.cloud_cover,
                weather.condition
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = DashboardConfig::load().context("Failed to load configuration")?;
    logging::init(&config.logging)?;

    let store = match &config.fixtures.path {
        Some(path) => FixtureStore::load(path)?,
        None => FixtureStore::builtin(),
    };
    info!(airports = store.airports.len(), "Aviation Weather Dashboard starting");

    let mut controller = SelectionController::new(Arc::new(store));
    let mut updates = controller.subscribe();
    let watcher = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let code = updates.borrow_and_update().selected_airport_code().to_string();
            info!(selected = %code, "Panels re-derived");
        }
    });

    let mut surface = ConsoleMap;
    show(&controller, &mut surface);

    let jfk_click = map::build_markers(controller.store().airports.airports(), controller.state())
        .into_iter()
        .find(|marker| marker.airport.code == "JFK")
        .map(|marker| marker.click())
        .context("JFK missing from catalog")?;
    let session = [
        SelectionEvent::FilterChanged("LHR".to_string()),
        jfk_click,
        SelectionEvent::ListSelected("ZZZ".to_string()),
        SelectionEvent::FilterChanged("all".to_string()),
    ];
    for event in session {
        match controller.dispatch(event) {
            Ok(_) => show(&controller, &mut surface),
            Err(e) => {
                warn!(error = %e, "Selection rejected");
                println!("{}", e.user_message());
            }
        }
    }

    let advisory = &config.advisory;
    let mut desk = AdvisoryDesk::new(
        SimulatedAdvisoryService::from_config(advisory),
        Duration::from_millis(advisory.timeout_ms),
    );
    match desk.generate().await {
        Ok(draft) => println!("{}", draft.text),
        Err(e) => println!("{}", e.user_message()),
    }
    if desk.draft().is_some() {
        match desk.publish().await {
            Ok(receipt) => println!("{}: {}", receipt.title, receipt.description),
            Err(e) => println!("{}", e.user_message()),
        }
    }

    drop(controller);
    watcher.await.context("Selection watcher panicked")?;
    Ok(())
}
