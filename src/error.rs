//! Error types and handling for the Skycast core

use std::fmt;

use thiserror::Error;

/// Which of the two weather requests failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    /// The current-conditions request
    Current,
    /// The multi-point forecast request
    Forecast,
}

impl fmt::Display for FetchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStage::Current => write!(f, "current"),
            FetchStage::Forecast => write!(f, "forecast"),
        }
    }
}

/// Main error type for the Skycast core
///
/// Every variant is recoverable at the UI boundary: the presentation layer
/// surfaces `user_message()` with a retry affordance.
#[derive(Error, Debug)]
pub enum SkycastError {
    /// Geocoding failure (transport error or provider rejection)
    #[error("Lookup error: {message}")]
    Lookup { message: String },

    /// Weather retrieval failure, tagged with the request that failed
    #[error("Fetch error ({stage}): {message}")]
    Fetch { stage: FetchStage, message: String },

    /// Geolocation denied or unsupported by the platform
    #[error("Location permission error: {message}")]
    Permission { message: String },

    /// Geolocation exceeded its bounded wait
    #[error("Location request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl SkycastError {
    /// Create a new lookup error
    pub fn lookup<S: Into<String>>(message: S) -> Self {
        Self::Lookup {
            message: message.into(),
        }
    }

    /// Create a new fetch error for the given stage
    pub fn fetch<S: Into<String>>(stage: FetchStage, message: S) -> Self {
        Self::Fetch {
            stage,
            message: message.into(),
        }
    }

    /// Create a new permission error
    pub fn permission<S: Into<String>>(message: S) -> Self {
        Self::Permission {
            message: message.into(),
        }
    }

    /// Create a new timeout error
    #[must_use]
    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SkycastError::Lookup { .. } => {
                "City search failed. Please check your connection and try again.".to_string()
            }
            SkycastError::Fetch { stage, .. } => {
                format!("Unable to load {stage} weather data. Please try again.")
            }
            SkycastError::Permission { .. } => {
                "Location access was denied. Allow location access or search for a city instead."
                    .to_string()
            }
            SkycastError::Timeout { .. } => {
                "Finding your location took too long. Try again or search for a city.".to_string()
            }
            SkycastError::Config { message } => {
                format!("Configuration error: {message}")
            }
        }
    }
}
