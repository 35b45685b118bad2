//! Failure taxonomy for one attempt of the location-to-weather pipeline.
//!
//! Every variant is terminal for the attempt that raised it. None of them is
//! fatal to the process: the caller reports the notice and stays interactive.

use thiserror::Error;

use crate::{cache::CacheError, location::LocationError};

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("no usable network transport is active")]
    NetworkUnavailable,

    #[error("location services are disabled")]
    LocationDisabled,

    #[error("location permissions were not granted")]
    PermissionDenied,

    #[error("location error: {0}")]
    Location(#[from] LocationError),

    #[error("weather API answered with HTTP status {status}")]
    Http { status: u16 },

    #[error("{0}")]
    Transport(String),

    #[error("failed to parse weather data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("cache error: {0}")]
    Cache(#[from] CacheError),
}

impl WeatherError {
    pub fn is_bad_request(&self) -> bool {
        matches!(self, WeatherError::Http { status: 400 })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, WeatherError::Http { status: 404 })
    }

    /// Short notice shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::NetworkUnavailable => "No internet available!".to_string(),
            WeatherError::LocationDisabled => "Locations Disabled".to_string(),
            WeatherError::PermissionDenied => "Permissions Required".to_string(),
            WeatherError::Location(e) => format!("Error: {e}"),
            e if e.is_bad_request() => "Error 400: Bad connection".to_string(),
            e if e.is_not_found() => "Error 404: Not Found!".to_string(),
            WeatherError::Http { .. } => "Generic error!".to_string(),
            WeatherError::Transport(msg) => format!("Error: {msg}"),
            WeatherError::Parse(_) => "Error: could not read weather data".to_string(),
            WeatherError::Cache(e) => format!("Error: {e}"),
        }
    }

    /// Whether the failure has already been surfaced through a dialog rather than a notice.
    pub fn is_prompted(&self) -> bool {
        matches!(
            self,
            WeatherError::LocationDisabled | WeatherError::PermissionDenied
        )
    }
}
