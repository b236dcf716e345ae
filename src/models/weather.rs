//! Weather observation model and display methods

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sky condition reported with an observation
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    Rainy,
}

impl WeatherCondition {
    /// Label as shown in the weather panel
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::Rainy => "Rainy",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single weather observation at an airport
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherObservation {
    /// Code of the airport this observation belongs to
    pub airport: String,
    /// Temperature in Celsius
    pub temperature: f32,
    /// Sky condition
    pub condition: WeatherCondition,
    /// Wind speed in mph
    pub wind_speed: f32,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Visibility in statute miles
    pub visibility: f32,
    /// Cloud cover percentage (0-100)
    pub cloud_cover: u8,
    /// Local observation time, "HH:MM"
    pub time: String,
}

impl WeatherObservation {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°C", self.temperature)
    }

    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{} mph", self.wind_speed)
    }

    #[must_use]
    pub fn format_humidity(&self) -> String {
        format!("{}%", self.humidity)
    }

    #[must_use]
    pub fn format_visibility(&self) -> String {
        format!("{} mi", self.visibility)
    }

    #[must_use]
    pub fn format_cloud_cover(&self) -> String {
        format!("{}% clouds", self.cloud_cover)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation() -> WeatherObservation {
        WeatherObservation {
            airport: "LHR".to_string(),
            temperature: 16.0,
            condition: WeatherCondition::Rainy,
            wind_speed: 22.0,
            humidity: 85,
            visibility: 5.0,
            cloud_cover: 95,
            time: "19:30".to_string(),
        }
    }

    #[test]
    fn test_formatting() {
        let weather = observation();
        assert_eq!(weather.format_temperature(), "16°C");
        assert_eq!(weather.format_wind(), "22 mph");
        assert_eq!(weather.format_humidity(), "85%");
        assert_eq!(weather.format_visibility(), "5 mi");
        assert_eq!(weather.format_cloud_cover(), "95% clouds");
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"airport":"LHR","temperature":16,"condition":"Rainy","windSpeed":22,
            "humidity":85,"visibility":5,"cloudCover":95,"time":"19:30"}"#;
        let parsed: WeatherObservation = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, observation());
    }
}
