//! Aviation weather dashboard core
//!
//! This library provides the selection, filtering and derived-view engine
//! behind a mock aviation weather dashboard: a fixed catalog of airports,
//! weather observations and flights, a single selection cursor shared by
//! every panel, and the advisory workflow behind a pluggable service.

pub mod advisory;
pub mod config;
pub mod error;
pub mod filter;
pub mod fixtures;
pub mod logging;
pub mod map;
pub mod models;
pub mod selection;
pub mod view;

// Re-export core types for public API
pub use advisory::{
    Advisory, AdvisoryDesk, AdvisoryService, PublishReceipt, SimulatedAdvisoryService,
};
pub use crate::config::DashboardConfig;
pub use error::DashboardError;
pub use filter::{
    AirportScope, FlightPartition, partition_flights, scope_by_selection, search_filter,
};
pub use fixtures::{AirportCatalog, FixtureStore};
pub use map::{MapMarker, MapSurface};
pub use models::{Airport, FlightRecord, WeatherObservation};
pub use selection::{SelectionController, SelectionEvent, SelectionState, SharedSelection};
pub use view::DashboardSnapshot;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DashboardError>;
