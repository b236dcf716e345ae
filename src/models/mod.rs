//! Data models for the dashboard
//!
//! This module contains the immutable record types organized by concern:
//! - Airport: catalog entries and code validation
//! - Weather: observations and sky conditions
//! - Flight: arrivals and departures with their status

pub mod airport;
pub mod flight;
pub mod weather;

// Re-export all public types for convenient access
pub use airport::Airport;
pub use flight::{FlightDirection, FlightRecord, FlightStatus};
pub use weather::{WeatherCondition, WeatherObservation};
