//! Error types and handling for the dashboard core

use std::time::Duration;
use thiserror::Error;

/// Main error type for the dashboard core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// A selection referenced a code absent from the airport catalog
    #[error("Unknown airport: {code}")]
    UnknownAirport { code: String },

    /// Input or catalog validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The advisory collaborator reported a failure
    #[error("Advisory error: {message}")]
    Advisory { message: String },

    /// The advisory collaborator did not answer in time
    #[error("Advisory {operation} timed out after {}ms", .after.as_millis())]
    AdvisoryTimeout {
        operation: &'static str,
        after: Duration,
    },
}

impl DashboardError {
    /// Create a new unknown-airport error
    pub fn unknown_airport<S: Into<String>>(code: S) -> Self {
        Self::UnknownAirport { code: code.into() }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new advisory error
    pub fn advisory<S: Into<String>>(message: S) -> Self {
        Self::Advisory {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message for inline display in a panel
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::UnknownAirport { code } => {
                format!("Airport '{code}' is not in the catalog.")
            }
            DashboardError::Validation { message } => format!("Invalid input: {message}"),
            DashboardError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            DashboardError::Advisory { .. } => {
                "The advisory service is unavailable. Please try again.".to_string()
            }
            DashboardError::AdvisoryTimeout { operation, .. } => {
                format!("Advisory {operation} is taking too long. Please try again.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = DashboardError::unknown_airport("ZZZ");
        assert_eq!(
            err,
            DashboardError::UnknownAirport {
                code: "ZZZ".to_string()
            }
        );

        let err = DashboardError::validation("bad code");
        assert!(matches!(err, DashboardError::Validation { .. }));

        let err = DashboardError::advisory("publisher offline");
        assert!(matches!(err, DashboardError::Advisory { .. }));
    }

    #[test]
    fn test_user_messages() {
        let err = DashboardError::unknown_airport("ZZZ");
        assert!(err.user_message().contains("ZZZ"));

        let err = DashboardError::config("test");
        assert!(err.user_message().contains("Configuration error"));

        let err = DashboardError::AdvisoryTimeout {
            operation: "publish",
            after: Duration::from_millis(250),
        };
        assert!(err.user_message().contains("publish"));
        assert_eq!(err.to_string(), "Advisory publish timed out after 250ms");
    }
}
