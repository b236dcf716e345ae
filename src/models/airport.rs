//! Airport catalog entry

use crate::{DashboardError, filter};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An airport as listed in the catalog
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct Airport {
    /// IATA code, three uppercase ASCII letters, unique within a catalog
    pub code: String,
    /// Full airport name
    pub name: String,
    /// City served
    pub city: String,
    /// Country name
    pub country: String,
}

impl Airport {
    /// Create a new airport
    #[must_use]
    pub fn new(code: &str, name: &str, city: &str, country: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            city: city.to_string(),
            country: country.to_string(),
        }
    }

    /// Check that a code is exactly three uppercase ASCII letters.
    ///
    /// The `"all"` dropdown value is reserved in any letter case, so it can
    /// never name an airport.
    pub fn validate_code(code: &str) -> crate::Result<()> {
        if code.eq_ignore_ascii_case(filter::ALL_AIRPORTS) {
            return Err(DashboardError::validation(format!(
                "airport code '{code}' is reserved"
            )));
        }
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()) {
            Ok(())
        } else {
            Err(DashboardError::validation(format!(
                "airport code '{code}' must be exactly three uppercase letters"
            )))
        }
    }

    /// Format location as "City, Country"
    #[must_use]
    pub fn format_location(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("JFK", true)]
    #[case("ALL", false)]
    #[case("lhr", false)]
    #[case("all", false)]
    #[case("JF", false)]
    #[case("JFKX", false)]
    #[case("J1K", false)]
    #[case("", false)]
    fn test_validate_code(#[case] code: &str, #[case] valid: bool) {
        assert_eq!(Airport::validate_code(code).is_ok(), valid);
    }

    #[test]
    fn test_format_location() {
        let airport = Airport::new("LHR", "London Heathrow Airport", "London", "UK");
        assert_eq!(airport.format_location(), "London, UK");
        assert_eq!(airport.to_string(), "London Heathrow Airport (LHR)");
    }
}
